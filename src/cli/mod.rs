//! CLI module for inventory
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - check-config: Print the resolved configuration

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check_config, run_command, serve};
pub use errors::{CliError, CliResult};

/// Parse process arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
