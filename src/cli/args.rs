//! CLI argument definitions using clap
//!
//! Commands:
//! - notetree serve [--config <path>] [--host <host>] [--port <port>]
//!   [--mongo-uri <uri>] [--in-memory]
//! - notetree ping [--config <path>] [--mongo-uri <uri>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// notetree - HTTP API for a tree of notes
#[derive(Parser, Debug)]
#[command(name = "notetree")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        #[command(flatten)]
        store: StoreArgs,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Keep content in process memory instead of MongoDB
        #[arg(long)]
        in_memory: bool,

        /// Minimum log level (trace, info, warn, error)
        #[arg(long)]
        log_level: Option<String>,
    },

    /// Check that the configured MongoDB deployment answers a ping
    Ping {
        #[command(flatten)]
        store: StoreArgs,
    },
}

/// Arguments shared by every command that touches the store
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Path to a JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// MongoDB connection string (overrides MONGO_URI)
    #[arg(long)]
    pub mongo_uri: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
