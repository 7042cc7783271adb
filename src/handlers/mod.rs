pub mod pairings;
pub mod tournaments;
