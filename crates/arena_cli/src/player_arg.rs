use std::str::FromStr;

use arena_core::Player;
use thiserror::Error;

/// `NAME,HEALTH,STRENGTH,ATTACK` as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerArg {
    pub name: String,
    pub health: i32,
    pub strength: i32,
    pub attack: i32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayerArgError {
    #[error("expected NAME,HEALTH,STRENGTH,ATTACK but got {0} field(s)")]
    FieldCount(usize),
    #[error("player name is empty")]
    EmptyName,
    #[error("invalid {field}: {input}")]
    NotAnInteger { field: &'static str, input: String },
}

impl FromStr for PlayerArg {
    type Err = PlayerArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [name, health, strength, attack] = fields[..] else {
            return Err(PlayerArgError::FieldCount(fields.len()));
        };
        if name.is_empty() {
            return Err(PlayerArgError::EmptyName);
        }
        Ok(Self {
            name: name.to_owned(),
            health: parse_field("health", health)?,
            strength: parse_field("strength", strength)?,
            attack: parse_field("attack", attack)?,
        })
    }
}

impl PlayerArg {
    pub fn into_player(self) -> Player {
        Player::new(self.name, self.health, self.strength, self.attack)
    }
}

pub fn parse_field(field: &'static str, input: &str) -> Result<i32, PlayerArgError> {
    input
        .trim()
        .parse()
        .map_err(|_| PlayerArgError::NotAnInteger {
            field,
            input: input.to_owned(),
        })
}
