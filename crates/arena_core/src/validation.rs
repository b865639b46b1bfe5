//! Pre-match checks. The engine assumes all of these hold.

use thiserror::Error;

use crate::dice::DIE_FACES;
use crate::player::Player;
use crate::record::Side;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Player names must be unique.")]
    DuplicateName,
    #[error("Player health must be greater than 0.")]
    NonPositiveHealth,
    #[error("Player strength must be greater than 0.")]
    NonPositiveStrength,
    #[error("Player attack must be greater than 0.")]
    NonPositiveAttack,
    #[error(
        "Player {} attack is too low to damage Player {}.",
        slot(.attacker),
        slot(&.attacker.other())
    )]
    AttackTooLow { attacker: Side },
    #[error(
        "Player {} attack is too high to damage Player {}.",
        slot(.attacker),
        slot(&.attacker.other())
    )]
    AttackTooHigh { attacker: Side },
}

fn slot(side: &Side) -> u8 {
    match side {
        Side::A => 1,
        Side::B => 2,
    }
}

/// Checks two players against each other, reporting the first failure.
///
/// Order: unique names, positive health, strength and attack, then each
/// attack against the opponent's strength (A on B first).
pub fn validate_matchup(player_a: &Player, player_b: &Player) -> Result<(), ValidationError> {
    if player_a.name() == player_b.name() {
        return Err(ValidationError::DuplicateName);
    }
    if player_a.base_health() <= 0 || player_b.base_health() <= 0 {
        return Err(ValidationError::NonPositiveHealth);
    }
    if player_a.strength() <= 0 || player_b.strength() <= 0 {
        return Err(ValidationError::NonPositiveStrength);
    }
    if player_a.attack() <= 0 || player_b.attack() <= 0 {
        return Err(ValidationError::NonPositiveAttack);
    }
    check_reach(Side::A, player_a.attack(), player_b.strength())?;
    check_reach(Side::B, player_b.attack(), player_a.strength())?;
    Ok(())
}

/// A best attack roll has to beat the weakest defense roll, and the weakest
/// attack roll must not already beat the best defense roll.
fn check_reach(
    attacker: Side,
    attack: i32,
    opponent_strength: i32,
) -> Result<(), ValidationError> {
    let faces = i64::from(DIE_FACES);
    let attack = i64::from(attack);
    let opponent_strength = i64::from(opponent_strength);
    if attack * faces <= opponent_strength {
        return Err(ValidationError::AttackTooLow { attacker });
    }
    if attack >= opponent_strength * faces {
        return Err(ValidationError::AttackTooHigh { attacker });
    }
    Ok(())
}
