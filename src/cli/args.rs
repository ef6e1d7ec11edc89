//! CLI argument definitions using clap
//!
//! Commands:
//! - hundred serve [--host] [--port] [--database-url] [--database-name]
//! - hundred check [--database-url] [--database-name]
//!
//! Every option falls back to an environment variable.

use clap::{Args, Parser, Subcommand};

use crate::observability::Severity;

/// Hundred - REST backend for the Hundred relationship map
#[derive(Parser, Debug)]
#[command(name = "hundred")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Lowest log severity written (trace, info, warn, error, fatal)
    #[arg(long, global = true, env = "HUNDRED_LOG", default_value = "info")]
    pub log_level: Severity,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8000)]
        port: u16,

        /// Allowed CORS origin (repeatable). Without any, every origin is allowed.
        #[arg(long = "cors-origin")]
        cors_origins: Vec<String>,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Probe the store and print the diagnostic report
    Check {
        #[command(flatten)]
        store: StoreArgs,
    },
}

/// Store selection shared by all commands
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Store URL: mongodb://host:port, mongodb+srv://host, memory:// or file:///abs/path
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Logical database name
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
