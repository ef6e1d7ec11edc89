//! CLI command implementations
//!
//! `serve` owns the process-wide store client and hands it to the router;
//! nothing else in the crate creates one.

use std::net::SocketAddr;
use std::sync::Arc;

use super::args::{Cli, Command, StoreArgs};
use super::errors::{CliError, CliResult};
use super::io::write_json;
use crate::http_server::status_routes::StatusResponse;
use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::Logger;
use crate::store::{StoreClient, StoreConfig};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    Logger::set_min_severity(cli.log_level);
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            host,
            port,
            cors_origins,
            store,
        } => serve(
            HttpServerConfig {
                host,
                port,
                cors_origins,
            },
            store_config(&store),
        ),
        Command::Check { store } => check(store_config(&store)),
    }
}

fn store_config(args: &StoreArgs) -> StoreConfig {
    StoreConfig::new(args.database_url.clone(), args.database_name.clone())
}

/// Start the HTTP server.
///
/// The store connection is not opened here; the first request that needs
/// it does so.
pub fn serve(http_config: HttpServerConfig, store_config: StoreConfig) -> CliResult<()> {
    http_config
        .socket_addr()
        .parse::<SocketAddr>()
        .map_err(|e| CliError::config_error(format!("invalid listen address: {}", e)))?;

    let store = Arc::new(StoreClient::new(store_config));
    let server = HttpServer::with_config(http_config, store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Probe the store once and print the same report `GET /test` returns
pub fn check(store_config: StoreConfig) -> CliResult<()> {
    let store = StoreClient::new(store_config);
    let report = StatusResponse::probe(&store);
    write_json(&report)
}
