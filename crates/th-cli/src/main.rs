//! `threshold`: play a text adventure in the terminal.

mod demo;

use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use th_core::{Blueprint, CharacterId, World};
use th_engine::{Engine, EngineConfig, Status};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "threshold",
    about = "Threshold: walk through doors, talk to people, find keys",
    version
)]
struct Args {
    /// JSON world file to play (default: the built-in lighthouse)
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Ask before leaving the game
    #[arg(long)]
    confirm_exit: bool,

    /// Maximum number of nested contexts
    #[arg(long, default_value_t = 64)]
    max_depth: usize,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(status) => process::exit(status.code()),
        Err(e) => {
            debug!(%e, "session failed");
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<Status, String> {
    let (world, player) = match &args.world {
        Some(path) => load_world(path)?,
        None => demo::world().map_err(|e| e.to_string())?,
    };
    let start = world
        .character(player)
        .map_err(|e| e.to_string())?
        .location();

    let config = EngineConfig::default()
        .with_color(!args.no_color && io::stdout().is_terminal())
        .with_confirm_exit(args.confirm_exit)
        .with_max_depth(args.max_depth);
    debug!(?config, "engine configured");

    let mut engine = Engine::new(world, io::stdin().lock(), io::stdout().lock(), config);
    engine.run(player, start).map_err(|e| e.to_string())
}

fn load_world(path: &Path) -> Result<(World, CharacterId), String> {
    let source = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    Blueprint::from_json(&source)
        .and_then(|blueprint| blueprint.build())
        .map_err(|e| format!("{}: {e}", path.display()))
}
