//! Die sources for round resolution.
//!
//! The engine never reaches for a global generator. Production code hands it
//! a [`SeededDice`] (seeded from entropy unless a seed is configured), tests
//! hand it a [`ScriptedDice`] or [`FixedDie`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const DIE_FACES: u8 = 6;
pub const SEED_ENV: &str = "ARENA_SEED";

/// Produces faces in `1..=6`.
pub trait DieRoller {
    fn roll(&mut self) -> u8;

    /// Seed to replay this source, if it has one.
    fn seed(&self) -> Option<u64> {
        None
    }
}

impl<R: DieRoller + ?Sized> DieRoller for &mut R {
    fn roll(&mut self) -> u8 {
        (**self).roll()
    }

    fn seed(&self) -> Option<u64> {
        (**self).seed()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiceError {
    #[error("die face {0} is outside 1..=6")]
    FaceOutOfRange(u8),
    #[error("scripted dice need at least one face")]
    EmptyScript,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiceParams {
    pub seed: Option<u64>,
}

impl DiceParams {
    /// Reads `ARENA_SEED`; unparsable values are ignored.
    pub fn from_env() -> Self {
        let seed = std::env::var(SEED_ENV)
            .ok()
            .and_then(|val| val.trim().parse().ok());
        Self { seed }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Keeps `self` where set, otherwise falls back to `other`.
    pub fn or(self, other: DiceParams) -> Self {
        Self {
            seed: self.seed.or(other.seed),
        }
    }

    pub fn into_dice(self) -> SeededDice {
        match self.seed {
            Some(seed) => SeededDice::new(seed),
            None => SeededDice::from_entropy(),
        }
    }
}

/// Seeded `StdRng` dice. The seed is kept so a match can be replayed.
#[derive(Debug, Clone)]
pub struct SeededDice {
    seed: u64,
    rng: StdRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        let seed = StdRng::from_entropy().gen();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DieRoller for SeededDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// Replays a fixed sequence of faces, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<u8>,
    cursor: usize,
}

impl ScriptedDice {
    pub fn new(faces: Vec<u8>) -> Result<Self, DiceError> {
        if faces.is_empty() {
            return Err(DiceError::EmptyScript);
        }
        if let Some(&bad) = faces.iter().find(|&&face| !is_face(face)) {
            return Err(DiceError::FaceOutOfRange(bad));
        }
        Ok(Self { faces, cursor: 0 })
    }

    /// Number of rolls served so far.
    pub fn rolls(&self) -> usize {
        self.cursor
    }
}

impl DieRoller for ScriptedDice {
    fn roll(&mut self) -> u8 {
        let face = self.faces[self.cursor % self.faces.len()];
        self.cursor += 1;
        face
    }
}

/// Always shows the same face.
#[derive(Debug, Clone, Copy)]
pub struct FixedDie(u8);

impl FixedDie {
    pub fn new(face: u8) -> Result<Self, DiceError> {
        if is_face(face) {
            Ok(Self(face))
        } else {
            Err(DiceError::FaceOutOfRange(face))
        }
    }
}

impl DieRoller for FixedDie {
    fn roll(&mut self) -> u8 {
        self.0
    }
}

fn is_face(face: u8) -> bool {
    (1..=DIE_FACES).contains(&face)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_stay_on_the_die() {
        let mut dice = SeededDice::new(42);
        for _ in 0..1_000 {
            let face = dice.roll();
            assert!((1..=6).contains(&face), "rolled {face}");
        }
    }

    #[test]
    fn seeded_dice_are_deterministic() {
        let mut a = SeededDice::new(7);
        let mut b = SeededDice::new(7);
        let left: Vec<u8> = (0..32).map(|_| a.roll()).collect();
        let right: Vec<u8> = (0..32).map(|_| b.roll()).collect();
        assert_eq!(left, right);
        assert_eq!(Some(7), DieRoller::seed(&a));
    }

    #[test]
    fn seed_42_rolls_are_pinned() {
        let mut dice = SeededDice::new(42);
        let rolled: Vec<u8> = (0..12).map(|_| dice.roll()).collect();
        assert_eq!(vec![1, 4, 2, 4, 6, 4, 6, 3, 6, 1, 4, 3], rolled);
    }

    #[test]
    fn seeded_dice_cover_every_face() {
        let mut dice = SeededDice::new(42);
        let mut seen = [false; 6];
        for _ in 0..600 {
            seen[usize::from(dice.roll() - 1)] = true;
        }
        assert!(seen.iter().all(|hit| *hit));
    }

    #[test]
    fn scripted_dice_wrap() {
        let mut dice = ScriptedDice::new(vec![1, 2, 3]).unwrap();
        let rolled: Vec<u8> = (0..7).map(|_| dice.roll()).collect();
        assert_eq!(vec![1, 2, 3, 1, 2, 3, 1], rolled);
        assert_eq!(7, dice.rolls());
    }

    #[test]
    fn scripted_dice_reject_bad_faces() {
        assert_eq!(Err(DiceError::EmptyScript), ScriptedDice::new(Vec::new()).map(|_| ()));
        assert_eq!(
            Err(DiceError::FaceOutOfRange(7)),
            ScriptedDice::new(vec![1, 7]).map(|_| ())
        );
        assert_eq!(Err(DiceError::FaceOutOfRange(0)), FixedDie::new(0).map(|_| ()));
    }

    #[test]
    fn params_prefer_explicit_seed() {
        let explicit = DiceParams::from_seed(3);
        assert_eq!(Some(3), explicit.or(DiceParams::from_seed(9)).seed);
        assert_eq!(Some(9), DiceParams::default().or(DiceParams::from_seed(9)).seed);
        assert_eq!(3, explicit.into_dice().seed());
    }

    #[test]
    fn borrowed_dice_roll_through() {
        fn roll_pair<D: DieRoller>(mut dice: D) -> (u8, u8) {
            (dice.roll(), dice.roll())
        }

        let mut dice = ScriptedDice::new(vec![2, 5]).unwrap();
        assert_eq!((2, 5), roll_pair(&mut dice));
        assert_eq!(2, dice.rolls());
    }
}
