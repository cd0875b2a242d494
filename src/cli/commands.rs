//! CLI command implementations
//!
//! Every command loads the JSON config first. A missing config file is
//! not an error: all keys have defaults, so `npsdb serve` works in an
//! empty directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::http_server::{shutdown_signal, HttpServer, HttpServerConfig};
use crate::model::{RawQueryRequest, Validate};
use crate::observability::{init_logging, Event, LogFormat};
use crate::store::{RawStatement, ScriptSource, Store, StoreError, StoreOptions, Table};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_error, write_response};

/// Environment variable that overrides `http.port`
pub const PORT_ENV: &str = "PORT";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file (default "./nps.db")
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,

    /// Schema script; the embedded schema is used when absent
    #[serde(default)]
    pub schema_path: Option<PathBuf>,

    /// Seed script; the embedded sample data is used when absent
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Load the seed script when PERSON is empty (default true)
    #[serde(default = "default_seed_on_empty")]
    pub seed_on_empty: bool,

    /// "pretty" or "json"
    #[serde(default)]
    pub log_format: LogFormat,

    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("./nps.db")
}

fn default_seed_on_empty() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            schema_path: None,
            seed_path: None,
            seed_on_empty: default_seed_on_empty(),
            log_format: LogFormat::default(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when the
    /// file does not exist
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration text
    pub fn from_json(content: &str) -> CliResult<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        Ok(())
    }

    /// Apply the `PORT` environment value and the `--port` flag.
    /// The flag wins over the environment, which wins over the file.
    pub fn apply_port_overrides(
        &mut self,
        env_port: Option<&str>,
        flag_port: Option<u16>,
    ) -> CliResult<()> {
        if let Some(raw) = env_port {
            self.http.port = parse_port(raw)?;
        }
        if let Some(port) = flag_port {
            if port == 0 {
                return Err(CliError::config_error("--port must be > 0"));
            }
            self.http.port = port;
        }
        Ok(())
    }

    /// Apply the `--log-format` flag, which wins over the file
    pub fn apply_log_format(&mut self, flag: Option<LogFormat>) {
        if let Some(format) = flag {
            self.log_format = format;
        }
    }

    /// Store bootstrap options derived from this config
    pub fn store_options(&self) -> StoreOptions {
        let script = |path: &Option<PathBuf>, embedded: ScriptSource| match path {
            Some(path) => ScriptSource::File(path.clone()),
            None => embedded,
        };

        let defaults = StoreOptions::default();
        StoreOptions {
            schema: script(&self.schema_path, defaults.schema),
            seed: script(&self.seed_path, defaults.seed),
            seed_on_empty: self.seed_on_empty,
        }
    }

    fn open_store(&self) -> CliResult<Store> {
        Store::open(&self.database_path, &self.store_options()).map_err(|e| {
            CliError::boot_failed(format!(
                "Failed to open {}: {}",
                self.database_path.display(),
                e
            ))
        })
    }
}

fn parse_port(raw: &str) -> CliResult<u16> {
    match raw.trim().parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(CliError::config_error(format!(
            "Invalid {} value: '{}'",
            PORT_ENV, raw
        ))),
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args())
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<()> {
    let log_format = cli.log_format;
    match cli.command {
        Command::Init { config } => init(&config, log_format),
        Command::Serve { config, port } => serve(&config, port, log_format),
        Command::Query { config } => query(&config, log_format),
    }
}

/// Create the database file, apply the schema and seed it when empty
///
/// Running `init` against an existing database is harmless: the schema is
/// idempotent and seeding only happens while PERSON has no rows.
pub fn init(config_path: &Path, log_format: Option<LogFormat>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    config.apply_log_format(log_format);
    init_logging(config.log_format);

    let store = config.open_store()?;
    let persons = store.count(Table::Person)?;
    let seeded = store.was_seeded();
    store.close()?;

    write_response(json!({
        "initialized": true,
        "seeded": seeded,
        "persons": persons
    }))
}

/// Boot the store and serve the HTTP API until Ctrl-C
pub fn serve(
    config_path: &Path,
    port: Option<u16>,
    log_format: Option<LogFormat>,
) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    let env_port = std::env::var(PORT_ENV).ok();
    config.apply_port_overrides(env_port.as_deref(), port)?;
    config.apply_log_format(log_format);

    init_logging(config.log_format);
    tracing::info!(event = %Event::BootStart, version = env!("CARGO_PKG_VERSION"), "starting npsdb");
    tracing::info!(
        event = %Event::ConfigLoaded,
        database = %config.database_path.display(),
        port = config.http.port,
        raw_query_enabled = config.http.raw_query_enabled,
        "configuration loaded"
    );

    let store = Arc::new(config.open_store()?);
    let server = HttpServer::new(config.http.clone(), Arc::clone(&store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start(shutdown_signal())
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    // The router held the other handle; it is gone once serving returns.
    if let Ok(store) = Arc::try_unwrap(store) {
        store.close()?;
    }
    tracing::info!(event = %Event::ShutdownComplete, "shutdown complete");

    Ok(())
}

/// Execute a single raw statement read from stdin and exit
///
/// Statement failures are reported as an error object on stdout; only
/// boot and I/O problems abort the process.
pub fn query(config_path: &Path, log_format: Option<LogFormat>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    config.apply_log_format(log_format);
    init_logging(config.log_format);

    let store = config.open_store()?;
    let request = read_request()?;

    let outcome = serde_json::from_value::<RawQueryRequest>(request)
        .map_err(|e| CliError::query_failed(format!("Invalid request: {}", e)))
        .and_then(|req| run_statement(&store, &req));

    match outcome {
        Ok(data) => write_response(data)?,
        Err(e) => write_error(e.code_str(), e.message())?,
    }

    store.close()?;
    Ok(())
}

fn run_statement(store: &Store, request: &RawQueryRequest) -> CliResult<serde_json::Value> {
    request
        .validate()
        .map_err(|e| CliError::query_failed(e.to_string()))?;

    let sql = request.sql.as_deref().unwrap_or_default();
    let statement = RawStatement::parse(sql).map_err(query_failed)?;
    let outcome = store.run_raw(&statement).map_err(query_failed)?;

    tracing::info!(event = %Event::RawQueryExecuted, source = "cli", "raw statement executed");
    Ok(outcome.to_json())
}

fn query_failed(e: StoreError) -> CliError {
    CliError::query_failed(e.to_string())
}
