use tracing::debug;

/// A combatant. Attributes are fixed for the match; only `current_health`
/// moves while a match runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    base_health: i32,
    strength: i32,
    attack: i32,
    current_health: i32,
    wins: u32,
    losses: u32,
}

impl Player {
    /// Builds a player at full health. Attributes are taken as given; run
    /// [`crate::validation::validate_matchup`] before handing players to a match.
    pub fn new(name: impl Into<String>, health: i32, strength: i32, attack: i32) -> Self {
        Self {
            name: name.into(),
            base_health: health,
            strength,
            attack,
            current_health: health,
            wins: 0,
            losses: 0,
        }
    }

    /// Name, current health, strength and attack.
    pub fn base_attributes(&self) -> (&str, i32, i32, i32) {
        (&self.name, self.current_health, self.strength, self.attack)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_health(&self) -> i32 {
        self.base_health
    }

    pub fn current_health(&self) -> i32 {
        self.current_health
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn is_defeated(&self) -> bool {
        self.current_health <= 0
    }

    /// Applies `damage` and returns the new health, floored at zero.
    pub fn take_damage(&mut self, damage: i64) -> i32 {
        self.current_health = apply_damage(self.current_health, damage);
        debug!(
            target: "arena_core.player",
            player = %self.name,
            current = self.current_health,
            base = self.base_health,
            "health updated"
        );
        self.current_health
    }

    /// Back to full health for a rematch. The win/loss tally is kept.
    pub fn restore(&mut self) {
        self.current_health = self.base_health;
    }

    /// Wins and losses recorded so far.
    pub fn match_stats(&self) -> (u32, u32) {
        (self.wins, self.losses)
    }

    pub fn record_win(&mut self) -> u32 {
        self.wins += 1;
        self.wins
    }

    pub fn record_loss(&mut self) -> u32 {
        self.losses += 1;
        self.losses
    }
}

/// Health after taking `damage`. Never negative.
pub fn apply_damage(health: i32, damage: i64) -> i32 {
    let left = i64::from(health).saturating_sub(damage.max(0)).max(0);
    i32::try_from(left).unwrap_or(health)
}
