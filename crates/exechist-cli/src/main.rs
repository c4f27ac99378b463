//! exechist CLI
//!
//! Command-line interface for inspecting execution history and the output
//! registry

use clap::{Args, Parser, Subcommand};
use exechist_core::logging_facility::{init, Profile};
use exechist_store::config::DEFAULT_STATE_DIR;
use exechist_store::StoreConfig;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "exechist")]
#[command(about = "exechist - Execution history inspection", long_about = None)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Emit debug logs on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Location of the history database and CAS
#[derive(Debug, Args)]
pub struct StoreArgs {
    /// History database path (default: .exechist/history.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// CAS root directory (default: .exechist/cas)
    #[arg(long, global = true)]
    pub cas: Option<PathBuf>,
}

impl StoreArgs {
    pub fn config(&self) -> StoreConfig {
        let defaults = StoreConfig::under(DEFAULT_STATE_DIR);
        StoreConfig::new(
            self.db.clone().unwrap_or(defaults.db_path),
            self.cas.clone().unwrap_or(defaults.cas_root),
        )
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Execution history operations
    History(commands::history::HistoryArgs),
    /// Output registry operations
    Outputs(commands::outputs::OutputsArgs),
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        init(Profile::Development);
    }

    let config = cli.store.config();
    let result = match cli.command {
        Commands::History(args) => commands::history::execute(args, &config),
        Commands::Outputs(args) => commands::outputs::execute(args, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
