use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: String,
    pub timezone: String,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Tournament {
    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.active)
    }

    pub fn next_round_number(&self) -> u32 {
        self.rounds.len() as u32 + 1
    }

    /// True if the two players already met in any earlier round, scored or not.
    pub fn have_played(&self, a: &str, b: &str) -> bool {
        self.rounds
            .iter()
            .flat_map(|r| r.pairings.iter())
            .any(|p| p.involves(a) && p.involves(b) && !p.is_bye())
    }

    pub fn bye_count(&self, player_id: &str) -> usize {
        self.rounds
            .iter()
            .flat_map(|r| r.pairings.iter())
            .filter(|p| p.is_bye() && p.player_a == player_id)
            .count()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faction: Option<String>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pseudo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discord_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RegistrationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_status: Option<ListStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl Player {
    #[cfg(test)]
    pub fn new<S: Into<String>>(id: S, name: S) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            active: true,
            ..Default::default()
        }
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Validated,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListStatus {
    #[serde(rename = "LIST_WAITING")]
    Waiting,
    #[serde(rename = "LIST_ACCEPTED")]
    Accepted,
    #[serde(rename = "LIST_REFUSED")]
    Refused,
    #[default]
    #[serde(rename = "LIST_NOT_SUBMITTED")]
    NotSubmitted,
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[default]
    #[serde(rename = "PAYMENT_PENDING")]
    Pending,
    #[serde(rename = "PAYMENT_ACCEPTED")]
    Accepted,
}

impl Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::Pending => write!(f, "PENDING"),
            RegistrationStatus::Validated => write!(f, "VALIDATED"),
        }
    }
}

impl Display for ListStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListStatus::Waiting => write!(f, "LIST_WAITING"),
            ListStatus::Accepted => write!(f, "LIST_ACCEPTED"),
            ListStatus::Refused => write!(f, "LIST_REFUSED"),
            ListStatus::NotSubmitted => write!(f, "LIST_NOT_SUBMITTED"),
        }
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PAYMENT_PENDING"),
            PaymentStatus::Accepted => write!(f, "PAYMENT_ACCEPTED"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Result for side A given both recorded scores.
    pub fn from_scores(score_a: i32, score_b: i32) -> Self {
        match score_a.cmp(&score_b) {
            std::cmp::Ordering::Greater => Self::Win,
            std::cmp::Ordering::Less => Self::Loss,
            std::cmp::Ordering::Equal => Self::Draw,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            GameResult::Win => Self::Loss,
            GameResult::Loss => Self::Win,
            GameResult::Draw => Self::Draw,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            GameResult::Win => 3,
            GameResult::Draw => 1,
            GameResult::Loss => 0,
        }
    }
}

impl Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win => write!(f, "WIN"),
            GameResult::Loss => write!(f, "LOSS"),
            GameResult::Draw => write!(f, "DRAW"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pairing {
    pub table: u32,
    pub player_a: String,
    #[serde(default)]
    pub player_b: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_a: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_b: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_a: Option<GameResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_b: Option<GameResult>,
}

impl Pairing {
    pub fn new(table: u32, player_a: String, player_b: Option<String>) -> Self {
        Self {
            table,
            player_a,
            player_b,
            ..Default::default()
        }
    }

    pub fn is_bye(&self) -> bool {
        self.player_b.is_none()
    }

    pub fn involves(&self, player_id: &str) -> bool {
        self.player_a == player_id || self.player_b.as_deref() == Some(player_id)
    }

    /// Both scores, if the game has been recorded.
    pub fn scores(&self) -> Option<(i32, i32)> {
        match (self.score_a, self.score_b) {
            (Some(a), Some(b)) => Some((a, b)),
            _ => None,
        }
    }

    /// Sets both scores and derives the result labels from them.
    pub fn record_scores(mut self, score_a: i32, score_b: i32) -> Result<Self, AppError> {
        if self.is_bye() {
            return Err(AppError::ByeCannotBeScored(self.table));
        }
        let result_a = GameResult::from_scores(score_a, score_b);
        self.score_a = Some(score_a);
        self.score_b = Some(score_b);
        self.result_a = Some(result_a);
        self.result_b = Some(result_a.opposite());
        Ok(self)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Round {
    pub number: u32,
    #[serde(default)]
    pub pairings: Vec<Pairing>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsEntry {
    pub player_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo: Option<String>,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    pub score_differential: i64,
}

impl StandingsEntry {
    pub fn new(player: &Player) -> Self {
        Self {
            player_id: player.id.clone(),
            name: player.name.clone(),
            pseudo: player.pseudo.clone(),
            ..Default::default()
        }
    }

    pub fn add_result(&mut self, result: GameResult, own_score: i32, opponent_score: i32) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Loss => self.losses += 1,
        }
        self.points += result.points();
        self.score_differential += i64::from(own_score) - i64::from(opponent_score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_from_scores() {
        assert_eq!(GameResult::from_scores(10, 5), GameResult::Win);
        assert_eq!(GameResult::from_scores(5, 10), GameResult::Loss);
        assert_eq!(GameResult::from_scores(7, 7), GameResult::Draw);
        assert_eq!(GameResult::Win.opposite(), GameResult::Loss);
        assert_eq!(GameResult::Draw.opposite(), GameResult::Draw);
    }

    #[test]
    fn test_record_scores_sets_labels() {
        let pairing = Pairing::new(1, "p1".to_string(), Some("p2".to_string()))
            .record_scores(3, 12)
            .expect("failed to record scores");
        assert_eq!(pairing.scores(), Some((3, 12)));
        assert_eq!(pairing.result_a, Some(GameResult::Loss));
        assert_eq!(pairing.result_b, Some(GameResult::Win));
    }

    #[test]
    fn test_record_scores_rejects_bye() {
        let err = Pairing::new(4, "p5".to_string(), None)
            .record_scores(1, 0)
            .unwrap_err();
        assert!(matches!(err, AppError::ByeCannotBeScored(4)));
    }

    #[test]
    fn test_player_status_labels() {
        let json = r#"{
            "id": "p1",
            "name": "Alice",
            "active": false,
            "discordId": "1234",
            "status": "VALIDATED",
            "listStatus": "LIST_REFUSED",
            "paymentStatus": "PAYMENT_ACCEPTED"
        }"#;
        let player: Player = serde_json::from_str(json).expect("invalid player json");
        assert!(!player.active);
        assert_eq!(player.discord_id.as_deref(), Some("1234"));
        assert_eq!(player.status, Some(RegistrationStatus::Validated));
        assert_eq!(player.list_status, Some(ListStatus::Refused));
        assert_eq!(player.payment_status, Some(PaymentStatus::Accepted));
        assert_eq!(
            player.list_status.map(|s| s.to_string()).as_deref(),
            Some("LIST_REFUSED")
        );
    }

    #[test]
    fn test_unknown_status_label_is_rejected() {
        let json = r#"{"id": "p1", "name": "Alice", "active": true, "status": "MAYBE"}"#;
        assert!(serde_json::from_str::<Player>(json).is_err());
    }

    #[test]
    fn test_bye_pairing_serializes_null_opponent() {
        let value = serde_json::to_value(Pairing::new(3, "p5".to_string(), None))
            .expect("failed to serialize pairing");
        assert_eq!(
            value,
            serde_json::json!({ "table": 3, "playerA": "p5", "playerB": null })
        );
    }

    #[test]
    fn test_have_played_ignores_byes() {
        let tournament = Tournament {
            players: vec![Player::new("p1", "A"), Player::new("p2", "B")],
            rounds: vec![Round {
                number: 1,
                pairings: vec![
                    Pairing::new(1, "p1".to_string(), Some("p2".to_string())),
                    Pairing::new(2, "p3".to_string(), None),
                ],
            }],
            ..Default::default()
        };
        assert!(tournament.have_played("p2", "p1"));
        assert!(!tournament.have_played("p1", "p3"));
        assert_eq!(tournament.bye_count("p3"), 1);
        assert_eq!(tournament.next_round_number(), 2);
    }
}
