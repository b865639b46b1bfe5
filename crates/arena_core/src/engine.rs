//! Match resolution.
//!
//! A [`Match`] borrows both players mutably for its whole life and consumes
//! itself in [`Match::conduct`], so the result is derived exactly once and the
//! players are handed back to the caller only after the match is over.

use tracing::{debug, info};

use crate::dice::DieRoller;
use crate::player::Player;
use crate::record::{MatchRecord, RoundRecord, Side};

/// The player with less health opens; ties go to side A.
pub fn starting_side(health_a: i32, health_b: i32) -> Side {
    if health_a <= health_b {
        Side::A
    } else {
        Side::B
    }
}

/// `max(0, attack * attack_die - strength * defense_die)`, exact for any
/// `i32` attributes.
pub fn compute_damage(attack: i32, attack_die: u8, strength: i32, defense_die: u8) -> i64 {
    (score(attack, attack_die) - score(strength, defense_die)).max(0)
}

fn score(attribute: i32, die: u8) -> i64 {
    i64::from(attribute) * i64::from(die)
}

pub fn is_match_over(health_a: i32, health_b: i32) -> bool {
    health_a <= 0 || health_b <= 0
}

/// Side A is checked first, so when both players are down side B takes it.
pub fn decide_winner(health_a: i32, health_b: i32) -> Side {
    debug_assert!(is_match_over(health_a, health_b), "match is still running");
    if health_a <= 0 {
        Side::B
    } else {
        Side::A
    }
}

pub fn result_text(winner: &str) -> String {
    format!("{winner} wins")
}

/// One attack from `attacker` on `defender`. Only the defender's health moves.
pub fn resolve_round<D: DieRoller + ?Sized>(
    round: u32,
    attacker: &Player,
    defender: &mut Player,
    dice: &mut D,
) -> RoundRecord {
    let attack_die = dice.roll();
    let defense_die = dice.roll();
    let damage = compute_damage(attacker.attack(), attack_die, defender.strength(), defense_die);
    let defender_health = defender.take_damage(damage);

    let record = RoundRecord {
        round,
        attacker: attacker.name().to_owned(),
        defender: defender.name().to_owned(),
        attack_die,
        defense_die,
        attack_score: score(attacker.attack(), attack_die),
        defense_score: score(defender.strength(), defense_die),
        damage,
        defender_health,
    };
    debug!(
        target: "arena_core.round",
        round,
        attacker = %record.attacker,
        defender = %record.defender,
        attack_die,
        defense_die,
        damage,
        defender_health,
        "round resolved"
    );
    record
}

pub struct Match<'p, D> {
    player_a: &'p mut Player,
    player_b: &'p mut Player,
    dice: D,
    rounds: Vec<RoundRecord>,
}

impl<'p, D: DieRoller> Match<'p, D> {
    pub fn new(player_a: &'p mut Player, player_b: &'p mut Player, dice: D) -> Self {
        Self {
            player_a,
            player_b,
            dice,
            rounds: Vec::new(),
        }
    }

    pub fn starting_player(&self) -> Side {
        starting_side(
            self.player_a.current_health(),
            self.player_b.current_health(),
        )
    }

    pub fn is_over(&self) -> bool {
        is_match_over(
            self.player_a.current_health(),
            self.player_b.current_health(),
        )
    }

    /// Plays one round with `side` attacking and returns its record.
    pub fn play_round(&mut self, side: Side) -> &RoundRecord {
        let round = self.rounds.len() as u32 + 1;
        let (attacker, defender) = match side {
            Side::A => (&*self.player_a, &mut *self.player_b),
            Side::B => (&*self.player_b, &mut *self.player_a),
        };
        let record = resolve_round(round, attacker, defender, &mut self.dice);
        self.rounds.push(record);
        &self.rounds[self.rounds.len() - 1]
    }

    /// Alternates attacks until a player is down and returns the full record.
    ///
    /// There is no round cap: a matchup where neither side can roll past the
    /// other's defense keeps going until the dice allow it.
    pub fn conduct(mut self) -> MatchRecord {
        let starting = self.starting_player();
        info!(
            target: "arena_core.match",
            player_a = %self.player_a.name(),
            player_b = %self.player_b.name(),
            starting = ?starting,
            seed = ?self.dice.seed(),
            "match started"
        );

        let mut acting = starting;
        while !self.is_over() {
            self.play_round(acting);
            acting = acting.other();
        }

        let final_health_a = self.player_a.current_health();
        let final_health_b = self.player_b.current_health();
        let winner = decide_winner(final_health_a, final_health_b);
        let winner_name = match winner {
            Side::A => self.player_a.name(),
            Side::B => self.player_b.name(),
        };
        let result = result_text(winner_name);
        info!(
            target: "arena_core.match",
            rounds = self.rounds.len(),
            final_health_a,
            final_health_b,
            %result,
            "match concluded"
        );

        MatchRecord {
            player_a: self.player_a.name().to_owned(),
            player_b: self.player_b.name().to_owned(),
            starting,
            final_health_a,
            final_health_b,
            winner,
            result,
            seed: self.dice.seed(),
            rounds: self.rounds,
        }
    }
}

/// Runs `game` to completion and returns the round log and result string.
pub fn conduct_match<D: DieRoller>(game: Match<'_, D>) -> (Vec<String>, String) {
    let record = game.conduct();
    (record.round_log(), record.result)
}
