use std::env;

use crate::error::{Result, SamplerError};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: Option<String>,
    pub database_max_connections: u32,

    // Auth
    pub ingest_token: String,

    // Web server
    pub api_host: String,
    pub api_port: u16,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// Without `DATABASE_URL` the server falls back to an in-memory store.
    /// Without `INGEST_TOKEN` every ingest call is rejected.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            database_url: env::var("DATABASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", 10)?,
            ingest_token: env::var("INGEST_TOKEN")
                .map(|t| t.trim().to_string())
                .unwrap_or_default(),
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: parse_env("API_PORT", 3000)?,
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            if val.is_empty() {
                return "<not set>".to_string();
            }
            let n = val.chars().take(5).map(char::len_utf8).sum::<usize>();
            format!("{}...({} chars)", &val[..n], val.chars().count())
        }

        tracing::info!("Config loaded:");
        tracing::info!(
            "  DATABASE_URL: {}",
            if self.database_url.is_some() { "<set>" } else { "<not set>" }
        );
        tracing::info!("  DATABASE_MAX_CONNECTIONS: {}", self.database_max_connections);
        tracing::info!("  INGEST_TOKEN: {}", preview(&self.ingest_token));
        tracing::info!("  API: {}:{}", self.api_host, self.api_port);
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| SamplerError::Config(format!("{key} must be a number, got {raw:?}"))),
        _ => Ok(default),
    }
}
