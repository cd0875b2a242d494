//! CLI module for npsdb
//!
//! Provides command-line interface for:
//! - init: Create and seed the database file
//! - serve: Boot the store and run the HTTP API
//! - query: One-shot raw statement execution

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{init, query, run, run_command, serve, Config, PORT_ENV};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
