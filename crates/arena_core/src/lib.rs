//! Two-player arena combat: players, dice, and the match engine.

pub mod dice;
pub mod engine;
pub mod player;
pub mod record;
pub mod validation;

pub use dice::{DiceError, DiceParams, DieRoller, FixedDie, ScriptedDice, SeededDice};
pub use engine::{
    compute_damage, conduct_match, decide_winner, is_match_over, resolve_round, result_text,
    starting_side, Match,
};
pub use player::{apply_damage, Player};
pub use record::{MatchRecord, RoundRecord, Side};
pub use validation::{validate_matchup, ValidationError};
