//! Environment-driven configuration.
//!
//! Values are read from the process environment after `dotenvy` has loaded
//! any `.env` file.

use std::{env, path::PathBuf};
use thiserror::Error;
use tokio::time::Duration;

use crate::services::usgs::DEFAULT_FEED_URL;

const DEFAULT_ARCHIVE_DIR: &str = "media";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub feed_url: String,
    pub archive_dir: PathBuf,
    pub bind_addr: String,
    /// Poll the feed from the server process; unset leaves scheduling to cron
    pub poll_interval: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let poll_interval = match get("FEED_POLL_INTERVAL_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e: std::num::ParseIntError| {
                    ConfigError::Invalid {
                        name: "FEED_POLL_INTERVAL_SECS",
                        reason: e.to_string(),
                    }
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        name: "FEED_POLL_INTERVAL_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            database_url,
            feed_url: get("ANSS_FEED_URL").unwrap_or_else(|| DEFAULT_FEED_URL.to_string()),
            archive_dir: get("ARCHIVE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ARCHIVE_DIR)),
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            poll_interval,
        })
    }
}
