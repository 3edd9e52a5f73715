//! CLI command implementations
//!
//! `serve` builds the store explicitly, hands it to the HTTP server, and tears
//! it down after the server stops. Nothing is held in process globals.

use std::sync::Arc;

use crate::http_server::HttpServer;
use crate::observability::Logger;
use crate::storage::{ContentStore, MemoryContentStore, MongoContentStore};

use super::args::{Command, StoreArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            store,
            host,
            port,
            in_memory,
            log_level,
        } => {
            let mut config = resolve_config(&store)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(level) = log_level {
                config.log_level = level;
            }
            config.validate()?;
            serve(&config, in_memory)
        }
        Command::Ping { store } => {
            let config = resolve_config(&store)?;
            config.validate()?;
            ping(&config)
        }
    }
}

fn resolve_config(args: &StoreArgs) -> CliResult<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(ref uri) = args.mongo_uri {
        config.mongo_uri = uri.clone();
    }
    Ok(config)
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))
}

/// Build the configured store
pub async fn open_store(config: &Config, in_memory: bool) -> CliResult<Arc<dyn ContentStore>> {
    if in_memory {
        Logger::info("STORE_OPEN", &[("backend", "memory")]);
        return Ok(Arc::new(MemoryContentStore::new()));
    }

    let store =
        MongoContentStore::connect(&config.mongo_uri, &config.database, &config.collection).await?;
    Logger::info(
        "STORE_OPEN",
        &[
            ("backend", "mongodb"),
            ("collection", config.collection.as_str()),
            ("database", config.database.as_str()),
        ],
    );
    Ok(Arc::new(store))
}

/// Start the HTTP server and block until it shuts down
pub fn serve(config: &Config, in_memory: bool) -> CliResult<()> {
    Logger::set_min_severity(config.severity()?);

    runtime()?.block_on(async {
        let store = open_store(config, in_memory).await?;
        let server = HttpServer::new(config.http_config(), store);
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Round-trip the configured MongoDB deployment once
pub fn ping(config: &Config) -> CliResult<()> {
    runtime()?.block_on(async {
        let store = open_store(config, false).await?;
        let result = store.ping().await;
        store.shutdown().await;
        result?;
        println!("ok: {}/{}", config.database, config.collection);
        Ok::<(), CliError>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory_store() {
        let store = open_store(&Config::default(), true).await.unwrap();
        assert!(store.find_all().await.unwrap().is_empty());
        assert!(store.ping().await.is_ok());
    }

    #[test]
    fn test_resolve_config_flag_wins() {
        let args = StoreArgs {
            config: None,
            mongo_uri: Some("mongodb://flag:27017/".to_string()),
        };
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.mongo_uri, "mongodb://flag:27017/");
    }

    #[test]
    fn test_serve_rejects_invalid_port_before_boot() {
        let result = run_command(Command::Serve {
            store: StoreArgs::default(),
            host: None,
            port: Some(0),
            in_memory: true,
            log_level: None,
        });
        assert!(result.is_err());
    }
}
