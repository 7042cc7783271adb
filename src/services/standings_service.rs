use std::collections::HashMap;

use crate::models::tournament::{GameResult, StandingsEntry, Tournament};

/// Ranked standings for every player on the roster, active or not.
///
/// Only pairings with both scores recorded count, and the result is always
/// derived from the scores, never from the stored labels. Byes count for
/// nothing. A side whose id is missing from the roster is dropped while the
/// other side keeps its half of the game.
pub fn compute_standings(tournament: &Tournament) -> Vec<StandingsEntry> {
    let mut scores: HashMap<&str, StandingsEntry> = tournament
        .players
        .iter()
        .map(|p| (p.id.as_str(), StandingsEntry::new(p)))
        .collect();
    for round in tournament.rounds.iter() {
        for pairing in round.pairings.iter() {
            let Some((score_a, score_b)) = pairing.scores() else {
                continue;
            };
            let Some(player_b) = pairing.player_b.as_deref() else {
                continue;
            };
            let result_a = GameResult::from_scores(score_a, score_b);
            match scores.get_mut(pairing.player_a.as_str()) {
                Some(entry) => entry.add_result(result_a, score_a, score_b),
                None => tracing::warn!(
                    "round {} table {}: player `{}` is not registered, dropping their result",
                    round.number,
                    pairing.table,
                    pairing.player_a
                ),
            }
            match scores.get_mut(player_b) {
                Some(entry) => entry.add_result(result_a.opposite(), score_b, score_a),
                None => tracing::warn!(
                    "round {} table {}: player `{}` is not registered, dropping their result",
                    round.number,
                    pairing.table,
                    player_b
                ),
            }
        }
    }
    let mut standings: Vec<StandingsEntry> = tournament
        .players
        .iter()
        .filter_map(|p| scores.remove(p.id.as_str()))
        .collect();
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.score_differential.cmp(&a.score_differential))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });
    tracing::debug!(
        "computed standings for tournament `{}` over {} rounds",
        tournament.id,
        tournament.rounds.len()
    );
    standings
}
