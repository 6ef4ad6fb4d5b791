//! Server configuration.
//!
//! Values resolve as: command-line flag, then environment variable, then
//! built-in default.
//!
//! | Setting | Env var | Default |
//! |---|---|---|
//! | host | `CLASSROLL_HOST` | `0.0.0.0` |
//! | port | `CLASSROLL_PORT` | `3000` |
//! | data file | `CLASSROLL_DATA` | `controllers/mock_dados_app.json` |

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATA_PATH: &str = "controllers/mock_dados_app.json";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// JSON document backing the store.
    pub data_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = lookup("CLASSROLL_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or(defaults.host);

        let port = match lookup("CLASSROLL_PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|e| {
                tracing::warn!("Invalid CLASSROLL_PORT value {:?}: {}, using {}", raw, e, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let data_path = lookup("CLASSROLL_DATA")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);

        Self {
            host,
            port,
            data_path,
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        data_path: Option<PathBuf>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(data_path) = data_path {
            self.data_path = data_path;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
