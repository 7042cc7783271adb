pub mod pairing_service;
pub mod standings_service;
