//! CLI module for Hundred
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API
//! - check: Print the store diagnostic report and exit

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{check, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::write_json;
