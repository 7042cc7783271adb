use std::collections::HashSet;

use serde::Deserialize;

use crate::{
    errors::AppError,
    models::tournament::{Pairing, Tournament},
};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoundQuery {
    pub strategy: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordScores {
    pub pairing: Pairing,
    pub score_a: i32,
    pub score_b: i32,
}

/// Rejects snapshots that no storage layer could have produced. The pairing
/// and standings functions themselves accept anything.
pub fn validate_tournament(tournament: &Tournament) -> Result<(), AppError> {
    let mut ids = HashSet::new();
    for player in tournament.players.iter() {
        if !ids.insert(player.id.as_str()) {
            return Err(AppError::DuplicatePlayerId(player.id.clone()));
        }
    }
    for pairing in tournament.rounds.iter().flat_map(|r| r.pairings.iter()) {
        if pairing.player_b.as_deref() == Some(pairing.player_a.as_str()) {
            return Err(AppError::SelfPairing {
                table: pairing.table,
                player: pairing.player_a.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tournament::{Player, Round};

    #[test]
    fn test_duplicate_player_id() {
        let tournament = Tournament {
            players: vec![Player::new("p1", "A"), Player::new("p1", "B")],
            ..Default::default()
        };
        assert!(matches!(
            validate_tournament(&tournament),
            Err(AppError::DuplicatePlayerId(id)) if id == "p1"
        ));
    }

    #[test]
    fn test_self_pairing() {
        let tournament = Tournament {
            players: vec![Player::new("p1", "A")],
            rounds: vec![Round {
                number: 1,
                pairings: vec![Pairing::new(2, "p1".to_string(), Some("p1".to_string()))],
            }],
            ..Default::default()
        };
        assert!(matches!(
            validate_tournament(&tournament),
            Err(AppError::SelfPairing { table: 2, .. })
        ));
    }

    #[test]
    fn test_dangling_reference_is_accepted() {
        let tournament = Tournament {
            players: vec![Player::new("p1", "A")],
            rounds: vec![Round {
                number: 1,
                pairings: vec![Pairing::new(1, "p1".to_string(), Some("gone".to_string()))],
            }],
            ..Default::default()
        };
        assert!(validate_tournament(&tournament).is_ok());
    }
}
