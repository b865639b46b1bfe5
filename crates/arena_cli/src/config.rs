use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arena_core::DiceParams;
use serde::Deserialize;

pub const DEFAULT_TRACE_FILTER: &str = "warn";

#[derive(Debug, Deserialize, Default)]
pub struct ArenaConfig {
    #[serde(default)]
    pub dice: DiceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub report: Option<ReportConfig>,
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

impl ArenaConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: ArenaConfig = toml::from_str(&data)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(cfg)
    }

    /// Reads `path` when given, otherwise all defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Dice seed in precedence order: flag, `ARENA_SEED`, config file.
    pub fn dice_params(&self, flag_seed: Option<u64>) -> DiceParams {
        self.resolve_dice(flag_seed, DiceParams::from_env())
    }

    fn resolve_dice(&self, flag_seed: Option<u64>, env: DiceParams) -> DiceParams {
        DiceParams { seed: flag_seed }.or(env).or(DiceParams {
            seed: self.dice.seed,
        })
    }

    pub fn trace_filter(&self) -> &str {
        self.telemetry
            .as_ref()
            .and_then(|t| t.trace_filter.as_deref())
            .unwrap_or(DEFAULT_TRACE_FILTER)
    }

    pub fn report_path(&self) -> Option<&Path> {
        self.report.as_ref().map(|r| r.path.as_path())
    }

    /// `--out` when given, otherwise `[report] path`.
    pub fn output_path(&self, out: Option<PathBuf>) -> Option<PathBuf> {
        out.or_else(|| self.report_path().map(Path::to_path_buf))
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DiceConfig {
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct DisplayConfig {
    #[serde(default)]
    pub color: Option<bool>,
}

impl DisplayConfig {
    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TelemetryConfig {
    #[serde(default)]
    pub trace_filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let cfg: ArenaConfig = toml::from_str("").unwrap();
        assert!(cfg.display.color_enabled());
        assert_eq!(DEFAULT_TRACE_FILTER, cfg.trace_filter());
        assert!(cfg.report_path().is_none());
        assert_eq!(None, cfg.dice.seed);
    }

    #[test]
    fn full_config_parses() {
        let cfg: ArenaConfig = toml::from_str(
            r#"
            [dice]
            seed = 7

            [display]
            color = false

            [report]
            path = "reports/last_match.json"

            [telemetry]
            trace_filter = "arena_core=debug"
            "#,
        )
        .unwrap();
        assert_eq!(Some(7), cfg.dice.seed);
        assert!(!cfg.display.color_enabled());
        assert_eq!(Some(Path::new("reports/last_match.json")), cfg.report_path());
        assert_eq!("arena_core=debug", cfg.trace_filter());
    }

    #[test]
    fn flag_seed_wins_over_file() {
        let cfg: ArenaConfig = toml::from_str("[dice]\nseed = 7\n").unwrap();
        assert_eq!(Some(3), cfg.dice_params(Some(3)).seed);
    }

    #[test]
    fn env_seed_wins_over_file() {
        let cfg: ArenaConfig = toml::from_str("[dice]\nseed = 7\n").unwrap();
        let env = DiceParams::from_seed(11);
        assert_eq!(Some(11), cfg.resolve_dice(None, env).seed);
        assert_eq!(Some(3), cfg.resolve_dice(Some(3), env).seed);
        assert_eq!(Some(7), cfg.resolve_dice(None, DiceParams::default()).seed);
        assert_eq!(None, ArenaConfig::default().resolve_dice(None, DiceParams::default()).seed);
    }

    #[test]
    fn out_flag_falls_back_to_report_path() {
        let cfg: ArenaConfig = toml::from_str("[report]\npath = \"reports/last.json\"\n").unwrap();
        assert_eq!(Some(PathBuf::from("reports/last.json")), cfg.output_path(None));
        assert_eq!(
            Some(PathBuf::from("mine.json")),
            cfg.output_path(Some(PathBuf::from("mine.json")))
        );
        assert_eq!(None, ArenaConfig::default().output_path(None));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arena.toml");
        fs::write(&path, "[display]\ncolor = false\n").unwrap();
        let cfg = ArenaConfig::load(Some(&path)).unwrap();
        assert!(!cfg.display.color_enabled());
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArenaConfig::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
