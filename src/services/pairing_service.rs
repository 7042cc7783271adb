use std::{collections::HashMap, convert::Infallible, fmt::Display};

use itertools::Itertools;
use rustworkx_core::{
    max_weight_matching::max_weight_matching,
    petgraph::{graph, visit::EdgeRef},
};

use crate::{
    errors::AppError,
    models::tournament::{Pairing, Player, Round, Tournament},
    services::standings_service::compute_standings,
};

/// Decides who sits at which table. Returns one entry per table in table
/// order; `None` as the second player marks a bye.
pub trait PairingStrategy {
    fn pair(&self, tournament: &Tournament, players: &[&Player]) -> Vec<(String, Option<String>)>;
}

/// Pairs players in id order, two at a time. Ignores results and rematches.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdOrderPairing;

impl PairingStrategy for IdOrderPairing {
    fn pair(&self, _tournament: &Tournament, players: &[&Player]) -> Vec<(String, Option<String>)> {
        let sorted = players
            .iter()
            .sorted_by(|a, b| a.id.cmp(&b.id))
            .collect_vec();
        sorted
            .chunks(2)
            .map(|chunk| (chunk[0].id.clone(), chunk.get(1).map(|p| p.id.clone())))
            .collect()
    }
}

/// Score-aware pairing: players are ranked by current standings, the bye goes
/// to the lowest ranked player without one, and the rest are matched so that
/// nobody meets the same opponent twice while keeping ranks close.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwissPairing;

impl SwissPairing {
    fn rank_players<'a>(tournament: &Tournament, players: &[&'a Player]) -> Vec<&'a Player> {
        let ranks: HashMap<String, usize> = compute_standings(tournament)
            .into_iter()
            .enumerate()
            .map(|(rank, entry)| (entry.player_id, rank))
            .collect();
        players
            .iter()
            .copied()
            .sorted_by(|a, b| {
                let rank_a = ranks.get(&a.id).copied().unwrap_or(usize::MAX);
                let rank_b = ranks.get(&b.id).copied().unwrap_or(usize::MAX);
                rank_a.cmp(&rank_b).then_with(|| a.id.cmp(&b.id))
            })
            .collect()
    }

    fn edge_weight(rank_a: usize, rank_b: usize, players: usize) -> i128 {
        // Quadratic distance so that two short gaps beat one long gap
        let distance = rank_a.abs_diff(rank_b) as i128;
        (players * players) as i128 + 1 - distance * distance
    }

    fn matching(tournament: &Tournament, ranked: &[&Player]) -> Vec<(usize, usize)> {
        let mut edges = Vec::new();
        for (a, b) in (0..ranked.len()).tuple_combinations() {
            // skip players that have already played
            if tournament.have_played(&ranked[a].id, &ranked[b].id) {
                continue;
            }
            edges.push((a as u32, b as u32));
        }
        if edges.is_empty() {
            return Vec::new();
        }
        let g = graph::UnGraph::<u32, u32>::from_edges(edges);
        let Ok(matched) = max_weight_matching(
            &g,
            true,
            |edge| {
                Ok::<i128, Infallible>(Self::edge_weight(
                    edge.source().index(),
                    edge.target().index(),
                    ranked.len(),
                ))
            },
            true,
        );
        matched
            .into_iter()
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect()
    }
}

impl PairingStrategy for SwissPairing {
    fn pair(&self, tournament: &Tournament, players: &[&Player]) -> Vec<(String, Option<String>)> {
        let mut ranked = Self::rank_players(tournament, players);
        let bye = if ranked.len() % 2 != 0 {
            let index = ranked
                .iter()
                .rposition(|p| tournament.bye_count(&p.id) == 0)
                .unwrap_or(ranked.len() - 1);
            Some(ranked.remove(index))
        } else {
            None
        };
        let mut pairs = Self::matching(tournament, &ranked);
        let mut unmatched = (0..ranked.len())
            .filter(|i| !pairs.iter().any(|(a, b)| a == i || b == i))
            .collect_vec();
        if !unmatched.is_empty() {
            tracing::warn!(
                "swiss pairing: {} players could not avoid a rematch in round {}",
                unmatched.len(),
                tournament.next_round_number()
            );
            unmatched.sort();
            pairs.extend(unmatched.into_iter().tuples::<(usize, usize)>());
        }
        pairs.sort();
        let mut tables: Vec<(String, Option<String>)> = pairs
            .into_iter()
            .map(|(a, b)| (ranked[a].id.clone(), Some(ranked[b].id.clone())))
            .collect();
        if let Some(player) = bye {
            tables.push((player.id.clone(), None));
        }
        tables
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PairingMethod {
    #[default]
    IdOrder,
    Swiss,
}

impl TryFrom<&str> for PairingMethod {
    type Error = AppError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "id-order" => Ok(Self::IdOrder),
            "swiss" => Ok(Self::Swiss),
            _ => Err(AppError::InvalidPairingMethod(value.to_owned())),
        }
    }
}

impl Display for PairingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingMethod::IdOrder => write!(f, "id-order"),
            PairingMethod::Swiss => write!(f, "swiss"),
        }
    }
}

impl PairingMethod {
    pub fn generate(&self, tournament: &Tournament) -> Round {
        match self {
            PairingMethod::IdOrder => generate_round(tournament),
            PairingMethod::Swiss => generate_round_with(tournament, &SwissPairing),
        }
    }
}

/// Next round using id-order pairing.
pub fn generate_round(tournament: &Tournament) -> Round {
    generate_round_with(tournament, &IdOrderPairing)
}

/// Next round for the active players. The round number only counts the
/// rounds supplied, so the caller must pass the full history.
pub fn generate_round_with(tournament: &Tournament, strategy: &dyn PairingStrategy) -> Round {
    let active = tournament.active_players().collect_vec();
    let pairings = strategy
        .pair(tournament, &active)
        .into_iter()
        .enumerate()
        .map(|(table, (player_a, player_b))| Pairing::new(table as u32 + 1, player_a, player_b))
        .collect_vec();
    let number = tournament.next_round_number();
    tracing::debug!(
        "generated round {} for tournament `{}`: {} tables from {} active players",
        number,
        tournament.id,
        pairings.len(),
        active.len()
    );
    Round { number, pairings }
}
