mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shipwright",
    about = "Daily publish cycle: generate project scaffolds with an LLM, push them to a forge, announce them on a board",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the key=value settings file
    #[arg(long, global = true, default_value = ".env", env = "SHIPWRIGHT_ENV_FILE")]
    env_file: PathBuf,

    /// Data directory for cycle state, logbook, and scratch trees
    /// (default: DATA_DIR from the settings file, or .shipwright)
    #[arg(long, global = true, env = "SHIPWRIGHT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run today's publish cycle (no-op if it already ran today)
    Run,

    /// Show cycle state: last run date and per-track rotation cursors
    State,

    /// List the track catalog
    Tracks,

    /// Show recent logbook entries
    Log {
        /// Number of entries to show, newest last
        #[arg(long, default_value = "20")]
        tail: usize,
    },

    /// Scan a directory for credential-shaped strings
    Scan { path: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Run => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let data_dir = cli.data_dir.as_deref();

    let result = match cli.command {
        Commands::Run => cmd::run::run(&cli.env_file, data_dir),
        Commands::State => cmd::state::run(&cli.env_file, data_dir, cli.json),
        Commands::Tracks => cmd::tracks::run(cli.json),
        Commands::Log { tail } => cmd::log::run(&cli.env_file, data_dir, tail, cli.json),
        Commands::Scan { path } => cmd::scan::run(&path, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
