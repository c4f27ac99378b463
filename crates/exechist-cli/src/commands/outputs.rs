//! Outputs command
//!
//! Usage: exechist outputs check <PATH>

use clap::{Args, Subcommand};
use exechist_engine::commands::check_output;
use exechist_engine::Stores;
use exechist_store::StoreConfig;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct OutputsArgs {
    #[command(subcommand)]
    pub command: OutputsCommand,
}

#[derive(Debug, Subcommand)]
pub enum OutputsCommand {
    /// Report whether a path was produced by the build tool
    Check {
        /// Absolute path as recorded by the build
        path: PathBuf,
    },
}

/// Execute outputs command
pub fn execute(args: OutputsArgs, config: &StoreConfig) -> Result<(), Box<dyn std::error::Error>> {
    let stores = Stores::open(config)?;

    match args.command {
        OutputsCommand::Check { path } => {
            let status = check_output(&stores, &path)?;
            println!("path: {}", path.display());
            println!("generated_by_tool: {}", status.generated_by_tool);
            println!("contains_generated_files: {}", status.contains_generated_files);
        }
    }

    Ok(())
}
