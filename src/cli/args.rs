//! CLI argument definitions using clap
//!
//! Commands:
//! - npsdb init --config <path>
//! - npsdb serve --config <path> [--port <port>]
//! - npsdb query --config <path>
//!
//! `--log-format pretty|json` is accepted by every command.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;

/// npsdb - REST API over the National Park Service database
#[derive(Parser, Debug)]
#[command(name = "npsdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log output format (overrides log_format in the config file)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database file, apply the schema and load sample data
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./npsdb.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./npsdb.json")]
        config: PathBuf,

        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Run one raw SQL statement read as {"sql": "..."} from stdin
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./npsdb.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
