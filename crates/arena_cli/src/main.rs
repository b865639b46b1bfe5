mod arena;
mod config;
mod player_arg;
mod report;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use arena_core::{validate_matchup, Match};
use clap::{Args, Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use crate::arena::Arena;
use crate::config::ArenaConfig;
use crate::player_arg::PlayerArg;
use crate::report::{default_match_id, SavedMatch};

#[derive(Parser)]
#[command(name = "magical-arena", version, about = "Two-player dice combat arena")]
struct Cli {
    /// Optional arena.toml with dice, display, report and telemetry settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Dice seed; overrides ARENA_SEED and the config file.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive arena menu (the default).
    Play,
    /// Run a single match from command-line attributes.
    Simulate(SimulateArgs),
    /// Pretty-print a saved match.
    Report(ReportArgs),
}

#[derive(Args)]
struct SimulateArgs {
    /// NAME,HEALTH,STRENGTH,ATTACK
    #[arg(long)]
    player_a: PlayerArg,
    /// NAME,HEALTH,STRENGTH,ATTACK
    #[arg(long)]
    player_b: PlayerArg,
    #[arg(long)]
    id: Option<String>,
    /// Write the match as JSON; defaults to the config report path.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args)]
struct ReportArgs {
    #[arg(long)]
    input: PathBuf,
    /// Also print every round.
    #[arg(long)]
    rounds: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ArenaConfig::load(cli.config.as_deref())?;
    init_tracing(&config);
    if !config.display.color_enabled() {
        console::set_colors_enabled(false);
    }

    match cli.command.unwrap_or(Commands::Play) {
        Commands::Play => handle_play(&config, cli.seed),
        Commands::Simulate(args) => handle_simulate(&config, cli.seed, args),
        Commands::Report(args) => handle_report(args),
    }
}

fn init_tracing(config: &ArenaConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.trace_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

fn handle_play(config: &ArenaConfig, seed: Option<u64>) -> Result<()> {
    let dice = config.dice_params(seed).into_dice();
    tracing::info!(target: "arena_cli", seed = dice.seed(), "arena session opened");
    let stdin = io::stdin();
    let mut arena = Arena::new(stdin.lock(), io::stdout(), dice);
    arena.run()
}

fn handle_simulate(config: &ArenaConfig, seed: Option<u64>, args: SimulateArgs) -> Result<()> {
    let mut player_a = args.player_a.into_player();
    let mut player_b = args.player_b.into_player();
    validate_matchup(&player_a, &player_b).context("players cannot be matched")?;

    let dice = config.dice_params(seed).into_dice();
    let record = Match::new(&mut player_a, &mut player_b, dice).conduct();
    for line in record.round_log() {
        println!("{}", style(line).blue());
    }
    println!("{}", style(format!("Match result: {}", record.result)).green());

    if let Some(path) = config.output_path(args.out) {
        let saved = SavedMatch::new(args.id.unwrap_or_else(default_match_id), record);
        saved.write_to(&path)?;
        println!("Match written to {}", path.display());
    }
    Ok(())
}

fn handle_report(args: ReportArgs) -> Result<()> {
    let saved = SavedMatch::read_from(&args.input)?;
    println!("{}", saved.summary());
    if args.rounds {
        for line in saved.record.round_log() {
            println!("  {line}");
        }
    }
    Ok(())
}
