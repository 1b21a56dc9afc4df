//! Env-driven configuration for the CLI and the immutable client settings.
//!
//! `Config` is what the binary reads from the process environment (after
//! `dotenv`). `ClientConfig` is the frozen view the client is built from:
//! two endpoints, the ComfyUI port forwarded on every call, and the fixed
//! request timeout.
use std::env;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Port forwarded to the service when none is configured.
pub const DEFAULT_PORT: &str = "8188";

/// Upper bound for a single request, connect through body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    generate_endpoint: String,
    query_endpoint: String,
    port: String,
}

impl ClientConfig {
    /// An empty `port` falls back to [`DEFAULT_PORT`].
    pub fn new(
        generate_endpoint: impl Into<String>,
        query_endpoint: impl Into<String>,
        port: impl Into<String>,
    ) -> Self {
        let port = port.into();
        ClientConfig {
            generate_endpoint: generate_endpoint.into(),
            query_endpoint: query_endpoint.into(),
            port: if port.is_empty() { DEFAULT_PORT.to_string() } else { port },
        }
    }

    pub fn generate_endpoint(&self) -> &str {
        &self.generate_endpoint
    }

    pub fn query_endpoint(&self) -> &str {
        &self.query_endpoint
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn timeout(&self) -> Duration {
        REQUEST_TIMEOUT
    }
}

pub struct Config {
    pub generate_url: String,
    pub query_url: String,
    pub port: String,
    pub download_dir: String,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        Ok(Config {
            generate_url: env::var("HUIXING_GENERATE_URL").unwrap_or_default(),
            query_url: env::var("HUIXING_QUERY_URL").unwrap_or_default(),
            port: env::var("HUIXING_PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string()),
            download_dir: env::var("HUIXING_DOWNLOAD_DIR")
                .unwrap_or_else(|_| "./static/images".to_string()),
        })
    }

    pub fn print_env_vars() {
        let keys = [
            "HUIXING_GENERATE_URL",
            "HUIXING_QUERY_URL",
            "HUIXING_PORT",
            "HUIXING_DOWNLOAD_DIR",
        ];
        for key in keys {
            let value = env::var(key).unwrap_or_else(|_| "<unset>".to_string());
            tracing::debug!("{}: {}", key, value);
        }
    }

    /// Freeze into a [`ClientConfig`]. Both endpoints must be set.
    pub fn client_config(&self) -> AppResult<ClientConfig> {
        if self.generate_url.trim().is_empty() {
            return Err(AppError::Config("HUIXING_GENERATE_URL is not set".to_string()));
        }
        if self.query_url.trim().is_empty() {
            return Err(AppError::Config("HUIXING_QUERY_URL is not set".to_string()));
        }
        Ok(ClientConfig::new(
            self.generate_url.clone(),
            self.query_url.clone(),
            self.port.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(generate: &str, query: &str) -> Config {
        Config {
            generate_url: generate.to_string(),
            query_url: query.to_string(),
            port: "9000".to_string(),
            download_dir: "./out".to_string(),
        }
    }

    #[test]
    fn empty_port_falls_back_to_default() {
        let cfg = ClientConfig::new("http://gen", "http://query", "");
        assert_eq!(cfg.port(), "8188");
        assert_eq!(cfg.timeout(), Duration::from_secs(300));
    }

    #[test]
    fn explicit_port_is_kept() {
        let cfg = ClientConfig::new("http://gen", "http://query", "8190");
        assert_eq!(cfg.port(), "8190");
        assert_eq!(cfg.generate_endpoint(), "http://gen");
        assert_eq!(cfg.query_endpoint(), "http://query");
    }

    #[test]
    fn client_config_requires_both_endpoints() {
        let res = config("", "http://q").client_config();
        assert!(matches!(res, Err(AppError::Config(_))));
        let res = config("http://g", " ").client_config();
        assert!(matches!(res, Err(AppError::Config(_))));

        let cfg = config("http://g", "http://q").client_config().unwrap();
        assert_eq!(cfg.port(), "9000");
    }
}
