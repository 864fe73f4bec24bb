//! CLI command implementations

use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use tracing::warn;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::observability::{self, log_event, log_event_with_fields, Event, LogFormat};
use crate::store::{MemoryProductStore, MongoProductStore, ProductStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            memory,
            json_logs,
        } => {
            let format = if json_logs {
                LogFormat::Json
            } else {
                LogFormat::Text
            };
            serve(config.as_deref(), memory, format)
        }
        Command::CheckConfig { config } => check_config(config.as_deref()),
    }
}

/// Resolve configuration, pick a store, and serve until shutdown.
pub fn serve(config_path: Option<&Path>, memory: bool, format: LogFormat) -> CliResult<()> {
    observability::init(format);
    log_event(Event::BootStart);

    let config = AppConfig::load(config_path)?;
    let store_kind = if memory { "memory" } else { "mongodb" };
    let port = config.http.port.to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("host", config.http.host.as_str()),
            ("port", port.as_str()),
            ("store", store_kind),
        ],
    );

    let store: Arc<dyn ProductStore> = if memory {
        Arc::new(MemoryProductStore::new())
    } else {
        if config.store.uri.is_none() {
            warn!("MONGO_DB_URI is not set; product requests will fail until it is configured");
        }
        Arc::new(MongoProductStore::new(config.store.clone()))
    };

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(async {
        HttpServer::with_store(config.http, store)
            .start()
            .await
            .map_err(|e| CliError::serve_failed(e.to_string()))
    })
}

/// Print the resolved configuration with credentials masked.
pub fn check_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load(config_path)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &config.redacted())?;
    writeln!(out)?;
    Ok(())
}
