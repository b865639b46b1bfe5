//! Helpers for deterministic regression tests.

use arena_core::{DiceError, DieRoller, Match, Player, ScriptedDice, SeededDice};
use serde_json::json;

pub const DEFAULT_SEED: u64 = 42;

/// PlayerA (100/10/5) against PlayerB (50/5/2).
pub fn reference_players() -> (Player, Player) {
    (
        Player::new("PlayerA", 100, 10, 5),
        Player::new("PlayerB", 50, 5, 2),
    )
}

pub fn sample_match_trace(seed: u64) -> serde_json::Value {
    match_trace(SeededDice::new(seed))
}

pub fn scripted_match_trace(faces: &[u8]) -> Result<serde_json::Value, DiceError> {
    Ok(match_trace(ScriptedDice::new(faces.to_vec())?))
}

fn match_trace<D: DieRoller>(dice: D) -> serde_json::Value {
    let (mut player_a, mut player_b) = reference_players();
    let record = Match::new(&mut player_a, &mut player_b, dice).conduct();
    json!({
        "seed": record.seed,
        "starting": record.starting,
        "rounds": record.round_log(),
        "final_health": [record.final_health_a, record.final_health_b],
        "result": record.result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_is_deterministic() {
        let a = sample_match_trace(DEFAULT_SEED);
        let b = sample_match_trace(DEFAULT_SEED);
        assert_eq!(a, b);
        assert_eq!(json!(DEFAULT_SEED), a["seed"]);
    }

    #[test]
    fn scripted_trace_rejects_bad_faces() {
        assert_eq!(
            Err(DiceError::FaceOutOfRange(9)),
            scripted_match_trace(&[9]).map(|_| ())
        );
    }
}
