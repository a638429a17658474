use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "caffeine-cli", version, about = "Caffeine level calculator")]
struct Cli {
    /// Dose log file (defaults to ~/.config/caffeine/doses.json)
    #[arg(long, global = true)]
    doses: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Dose log management
    Dose {
        #[command(subcommand)]
        action: commands::dose::DoseAction,
    },
    /// Caffeine curve display and export
    Curve {
        #[command(subcommand)]
        action: commands::curve::CurveAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let store = commands::dose_store(cli.doses);
    let result = match cli.command {
        Commands::Dose { action } => store.and_then(|s| commands::dose::run(action, &s)),
        Commands::Curve { action } => store.and_then(|s| commands::curve::run(action, &s)),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
