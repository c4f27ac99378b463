//! History command
//!
//! Usage: exechist history <show|list|remove> [IDENTITY]

use clap::{Args, Subcommand};
use exechist_core::model::WorkIdentity;
use exechist_engine::commands::{list_history, remove_history, show_history};
use exechist_engine::Stores;
use exechist_store::StoreConfig;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommand,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// Print the stored record of a unit of work as JSON
    Show {
        /// Work identity (e.g. :app:compileJava)
        identity: String,
    },
    /// List every unit of work with stored history
    List,
    /// Forget the stored history of a unit of work
    Remove {
        /// Work identity (e.g. :app:compileJava)
        identity: String,
    },
}

/// Execute history command
pub fn execute(args: HistoryArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stores = Stores::open(config)?;

    match args.command {
        HistoryCommand::Show { identity } => {
            let record = show_history(&stores, &WorkIdentity::new(identity)?)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        HistoryCommand::List => {
            let entries = list_history(&stores)?;
            if entries.is_empty() {
                println!("No execution history stored");
            }
            for entry in entries {
                let stored_at = chrono::DateTime::from_timestamp_millis(entry.stored_at)
                    .map(|t| t.to_rfc3339())
                    .unwrap_or_else(|| entry.stored_at.to_string());
                println!(
                    "{}\t{}\t{}ms\t{}\t{}",
                    entry.identity,
                    if entry.successful { "success" } else { "failed" },
                    entry.execution_time_ms,
                    entry.build_invocation_id,
                    stored_at
                );
            }
        }
        HistoryCommand::Remove { identity } => {
            let identity = WorkIdentity::new(identity)?;
            if remove_history(&stores, &identity)? {
                println!("✓ Removed history for {}", identity);
            } else {
                println!("No history stored for {}", identity);
            }
        }
    }

    Ok(())
}
