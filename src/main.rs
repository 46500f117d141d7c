//! Console Blackjack against a dealer who stands on 17.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use blackjack_console::{
    config::{to_display_settings, to_game_rules, SessionConfig},
    seeded_rng, BlackjackGame, ConsoleIo, GameError,
};

#[derive(Parser)]
#[command(name = "blackjack")]
#[command(about = "Play Blackjack against the dealer in your terminal")]
struct Args {
    /// JSON file with rules/display settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the shuffle (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Pause before key moments, in milliseconds
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Don't clear the screen between phases
    #[arg(long)]
    no_clear: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<(), GameError> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    if let Some(pace_ms) = args.pace_ms {
        config.display.pace_ms = pace_ms;
    }
    if args.no_clear {
        config.display.clear_screen = Some(false);
    }
    let seed = args.seed.or(config.seed);

    let rules = to_game_rules(&config.rules)?;
    info!(?rules, ?seed, "starting session");

    let mut game = BlackjackGame::new(rules, seeded_rng(seed));
    let mut io = ConsoleIo::stdio(to_display_settings(&config.display));
    game.run(&mut io)?;
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so they never mix with the table on stdout.
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "session aborted");
            eprintln!("blackjack: {err}");
            ExitCode::FAILURE
        }
    }
}
