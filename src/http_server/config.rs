//! HTTP Server Configuration
//!
//! Configuration for the HTTP server including host, port, CORS, the
//! browser client directory and the raw-query switch.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory holding the single-page client (default: "./frontend")
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,

    /// Mount `POST /api/query` (default: true)
    #[serde(default = "default_raw_query_enabled")]
    pub raw_query_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("./frontend")
}

fn default_raw_query_enabled() -> bool {
    true
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            frontend_dir: default_frontend_dir(),
            raw_query_enabled: default_raw_query_enabled(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Path of the client entry page
    pub fn index_file(&self) -> PathBuf {
        self.frontend_dir.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.cors_origins.is_empty());
        assert!(config.raw_query_enabled);
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig =
            serde_json::from_str(r#"{"port": 4000, "raw_query_enabled": false}"#).unwrap();
        assert_eq!(config.port, 4000);
        assert!(!config.raw_query_enabled);
        assert_eq!(config.index_file(), PathBuf::from("./frontend/index.html"));
    }
}
