use std::fmt;

use serde::{Deserialize, Serialize};

use crate::player::Player;

/// Which match slot a player occupies. Slot order has nothing to do with
/// turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// One attack, as rolled and applied. Scores and damage are `i64` so any
/// `i32` attribute times a die face fits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round: u32,
    pub attacker: String,
    pub defender: String,
    pub attack_die: u8,
    pub defense_die: u8,
    pub attack_score: i64,
    pub defense_score: i64,
    pub damage: i64,
    pub defender_health: i32,
}

impl fmt::Display for RoundRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} attacked {} for {} damage",
            self.attacker, self.defender, self.damage
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player_a: String,
    pub player_b: String,
    pub starting: Side,
    pub rounds: Vec<RoundRecord>,
    pub final_health_a: i32,
    pub final_health_b: i32,
    pub winner: Side,
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl MatchRecord {
    /// Round descriptions in the order they were played.
    pub fn round_log(&self) -> Vec<String> {
        self.rounds.iter().map(ToString::to_string).collect()
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    pub fn winner_name(&self) -> &str {
        match self.winner {
            Side::A => &self.player_a,
            Side::B => &self.player_b,
        }
    }

    pub fn loser_name(&self) -> &str {
        match self.winner {
            Side::A => &self.player_b,
            Side::B => &self.player_a,
        }
    }

    /// Books the outcome into both players' win/loss tallies.
    pub fn settle(&self, player_a: &mut Player, player_b: &mut Player) {
        match self.winner {
            Side::A => {
                player_a.record_win();
                player_b.record_loss();
            }
            Side::B => {
                player_b.record_win();
                player_a.record_loss();
            }
        }
    }
}
