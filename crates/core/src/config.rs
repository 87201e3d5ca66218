//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the services. The
//! parse helpers take the raw environment value as an `Option<String>` so request handling and
//! tests never read process-wide environment variables.

use crate::constants::{DEFAULT_HOST, DEFAULT_MODEL_PATH, DEFAULT_PORT};
use crate::{CardioError, CardioResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    host: String,
    port: u16,
    model_path: PathBuf,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(host: String, port: u16, model_path: PathBuf) -> CardioResult<Self> {
        if host.trim().is_empty() {
            return Err(CardioError::InvalidConfig("host cannot be empty".into()));
        }

        Ok(Self {
            host,
            port,
            model_path,
        })
    }

    /// Build a config from raw environment values (`HOST`, `PORT`, `CARDIO_MODEL_PATH`).
    pub fn from_env_values(
        host: Option<String>,
        port: Option<String>,
        model_path: Option<String>,
    ) -> CardioResult<Self> {
        let host = non_blank(host).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = port_from_env_value(port)?;
        let model_path = model_path_from_env_value(model_path);
        Self::new(host, port, model_path)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// `host:port` string suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse the listening port from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default port (5000).
pub fn port_from_env_value(value: Option<String>) -> CardioResult<u16> {
    match non_blank(value) {
        None => Ok(DEFAULT_PORT),
        Some(v) => v
            .parse::<u16>()
            .map_err(|_| CardioError::InvalidConfig(format!("PORT must be a port number, got {v:?}"))),
    }
}

/// Resolve the artifact path from an optional string value.
pub fn model_path_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
