//! CLI argument definitions using clap
//!
//! Commands:
//! - inventory serve [--config <path>] [--memory] [--json-logs]
//! - inventory check-config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// inventory - product inventory service
#[derive(Parser, Debug)]
#[command(name = "inventory")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Keep products in process memory instead of MongoDB
        #[arg(long)]
        memory: bool,

        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },

    /// Print the resolved configuration and exit
    CheckConfig {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
