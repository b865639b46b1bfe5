use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use arena_core::MatchRecord;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A concluded match as written by `simulate --out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedMatch {
    pub id: String,
    pub timestamp: String,
    pub record: MatchRecord,
}

impl SavedMatch {
    pub fn new(id: impl Into<String>, record: MatchRecord) -> Self {
        Self {
            id: id.into(),
            timestamp: Utc::now().to_rfc3339(),
            record,
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        Ok(())
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read report {}", path.display()))?;
        let saved = serde_json::from_str(&data)
            .with_context(|| format!("{} is not a saved match", path.display()))?;
        Ok(saved)
    }

    pub fn summary(&self) -> String {
        let seed = self
            .record
            .seed
            .map(|seed| format!(", seed {seed}"))
            .unwrap_or_default();
        format!(
            "Match {} ({}{seed}) -> {} after {} rounds",
            self.id,
            self.timestamp,
            self.record.result,
            self.record.round_count()
        )
    }
}

pub fn default_match_id() -> String {
    format!("match-{}", Utc::now().format("%Y%m%dT%H%M%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::{Match, Player, ScriptedDice};

    fn record() -> MatchRecord {
        let mut a = Player::new("PlayerA", 100, 10, 5);
        let mut b = Player::new("PlayerB", 50, 5, 2);
        Match::new(&mut a, &mut b, ScriptedDice::new(vec![6, 1]).unwrap()).conduct()
    }

    #[test]
    fn saved_match_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("match.json");
        let saved = SavedMatch::new("match-1", record());
        saved.write_to(&path).unwrap();

        let loaded = SavedMatch::read_from(&path).unwrap();
        assert_eq!(saved.record, loaded.record);
        assert_eq!("match-1", loaded.id);
    }

    #[test]
    fn summary_names_result_and_rounds() {
        let saved = SavedMatch::new("match-2", record());
        let summary = saved.summary();
        assert!(summary.starts_with("Match match-2 ("));
        assert!(summary.ends_with("-> PlayerA wins after 4 rounds"));
        assert!(!summary.contains("seed"));
    }

    #[test]
    fn garbage_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("match.json");
        fs::write(&path, "{}").unwrap();
        assert!(SavedMatch::read_from(&path).is_err());
    }
}
