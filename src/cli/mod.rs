//! CLI module for notetree
//!
//! Provides command-line interface for:
//! - serve: Run the HTTP API
//! - ping: Check the store connection

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, StoreArgs};
pub use commands::{open_store, ping, run, run_command, serve};
pub use config::{Config, DEFAULT_MONGO_URI, MONGO_URI_ENV};
pub use errors::{CliError, CliErrorCode, CliResult};
