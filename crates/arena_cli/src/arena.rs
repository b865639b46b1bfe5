//! Interactive arena session: menus, attribute prompts, and the per-session
//! match records and standings.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use arena_core::{validate_matchup, DieRoller, Match, MatchRecord, Player};
use console::style;
use thiserror::Error;
use tracing::{info, warn};

use crate::player_arg::parse_field;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("failed to get player {field}: invalid input: {input}")]
    Invalid { field: &'static str, input: String },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Standing {
    pub wins: u32,
    pub losses: u32,
}

pub struct Arena<R, W, D> {
    input: R,
    output: W,
    dice: D,
    next_match: u32,
    records: Vec<(u32, MatchRecord)>,
    standings: BTreeMap<String, Standing>,
}

impl<R: BufRead, W: Write, D: DieRoller> Arena<R, W, D> {
    pub fn new(input: R, output: W, dice: D) -> Self {
        Self {
            input,
            output,
            dice,
            next_match: 1,
            records: Vec::new(),
            standings: BTreeMap::new(),
        }
    }

    pub fn records(&self) -> &[(u32, MatchRecord)] {
        &self.records
    }

    pub fn standings(&self) -> &BTreeMap<String, Standing> {
        &self.standings
    }

    /// Runs the main menu until the user exits or input runs out.
    pub fn run(&mut self) -> anyhow::Result<()> {
        match self.main_menu() {
            Ok(()) | Err(PromptError::Closed) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn main_menu(&mut self) -> Result<(), PromptError> {
        loop {
            writeln!(self.output, "{}", style("Welcome to Magical Arena 1.0!").cyan())?;
            writeln!(
                self.output,
                "{}",
                style("Press 1 to enter the arena or press 0 to exit").magenta()
            )?;
            match self.read_choice("Enter your choice: ")? {
                Some(0) => {
                    let goodbye = style("Exiting the application. Goodbye!").red();
                    writeln!(self.output, "{goodbye}")?;
                    return Ok(());
                }
                Some(1) => self.arena_menu()?,
                Some(_) => self.complain("Invalid choice. Please enter 0 or 1.")?,
                None => self.complain("Please enter a valid choice or press 0 to exit")?,
            }
        }
    }

    fn arena_menu(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "{}", style("Entering the arena...").magenta())?;
        writeln!(self.output, "{}", style("Welcome to the arena!").cyan())?;
        writeln!(
            self.output,
            "{}",
            style("Press 1 to start the match or press 0 to exit").yellow()
        )?;
        match self.read_choice("Enter your choice: ")? {
            Some(1) => self.match_loop(),
            Some(0) => {
                writeln!(self.output, "{}", style("Exiting the arena.").magenta())?;
                Ok(())
            }
            _ => self.complain("Invalid choice. Returning to the main menu."),
        }
    }

    fn match_loop(&mut self) -> Result<(), PromptError> {
        loop {
            writeln!(
                self.output,
                "{}",
                style("Press 1 to enter a match or press 0 to exit the arena").yellow()
            )?;
            match self.read_choice("Enter your choice: ")? {
                Some(0) => {
                    let leaving = style("Exiting the matches section.").magenta();
                    writeln!(self.output, "{leaving}")?;
                    return self.print_session();
                }
                Some(1) => self.play_match()?,
                Some(_) => self.complain("Invalid choice. Please enter 0 or 1.")?,
                None => {
                    self.complain("Please enter a valid choice or press 0 to exit")?;
                    return self.print_session();
                }
            }
        }
    }

    fn play_match(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "{}", style("Entering a new match...").cyan())?;

        let mut player_a = match self.read_player("Player 1") {
            Err(err @ PromptError::Invalid { .. }) => {
                return self.complain(&format!("Error creating Player 1: {err}"));
            }
            other => other?,
        };
        let mut player_b = match self.read_player("Player 2") {
            Err(err @ PromptError::Invalid { .. }) => {
                return self.complain(&format!("Error creating Player 2: {err}"));
            }
            other => other?,
        };

        if let Err(err) = validate_matchup(&player_a, &player_b) {
            warn!(target: "arena_cli.session", %err, "matchup rejected");
            return self.complain(&err.to_string());
        }

        let record = Match::new(&mut player_a, &mut player_b, &mut self.dice).conduct();
        for line in record.round_log() {
            writeln!(self.output, "{}", style(line).blue())?;
        }
        writeln!(
            self.output,
            "{}",
            style(format!("Match result: {}", record.result)).green()
        )?;

        record.settle(&mut player_a, &mut player_b);
        for player in [&player_a, &player_b] {
            let (wins, losses) = player.match_stats();
            let standing = self.standings.entry(player.name().to_owned()).or_default();
            standing.wins += wins;
            standing.losses += losses;
        }

        let number = self.next_match;
        self.next_match += 1;
        info!(target: "arena_cli.session", number, result = %record.result, "match recorded");
        self.records.push((number, record));
        Ok(())
    }

    fn read_player(&mut self, label: &str) -> Result<Player, PromptError> {
        let heading = style(format!("Enter attributes for {label}:")).cyan();
        writeln!(self.output, "{heading}")?;
        let name = self.read_line("Name: ")?;
        let health = self.read_stat("Health: ", "health")?;
        let strength = self.read_stat("Strength: ", "strength")?;
        let attack = self.read_stat("Attack: ", "attack")?;
        Ok(Player::new(name, health, strength, attack))
    }

    fn read_stat(&mut self, prompt: &str, field: &'static str) -> Result<i32, PromptError> {
        let line = self.read_line(prompt)?;
        parse_field(field, &line).map_err(|_| PromptError::Invalid { field, input: line })
    }

    /// `None` when the line is not an integer.
    fn read_choice(&mut self, prompt: &str) -> Result<Option<i64>, PromptError> {
        let line = self.read_line(prompt)?;
        Ok(line.parse().ok())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_owned())
    }

    fn complain(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{}", style(message).red())?;
        Ok(())
    }

    fn print_session(&mut self) -> Result<(), PromptError> {
        if self.records.is_empty() {
            return Ok(());
        }
        writeln!(self.output, "{}", style("Match records:").cyan())?;
        for (number, record) in &self.records {
            writeln!(
                self.output,
                "  #{number}: {} ({} rounds)",
                record.result,
                record.round_count()
            )?;
        }
        writeln!(self.output, "{}", style("Standings:").cyan())?;
        for (name, standing) in &self.standings {
            writeln!(
                self.output,
                "  {name}: {} wins, {} losses",
                standing.wins, standing.losses
            )?;
        }
        Ok(())
    }
}
