// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon configuration, resolved once at startup from `ET_*` environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::time::Duration;

use et_core::{GameSettings, KillMethod, DEFAULT_MAX_SCORE, DEFAULT_TARGET_LABEL};
use et_engine::{GameConfig, TrackerConfig};
use thiserror::Error;

pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8080));
pub const DEFAULT_STATIC_DIR: &str = "./web";

/// Log file name inside `ET_LOG_DIR`.
pub const LOG_FILE_NAME: &str = "etd.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address for the HTTP server
    pub bind: SocketAddr,
    /// Directory served under `/static`; `index.html` is served at `/`
    pub static_dir: PathBuf,
    /// When set, logs go to `<dir>/etd.log` instead of stdout
    pub log_dir: Option<PathBuf>,
    /// Initial game settings and tracker timing
    pub game: GameConfig,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Resolve configuration through `lookup`; unset and blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind = match get("ET_BIND") {
            Some(value) => value
                .trim()
                .parse::<SocketAddr>()
                .map_err(|e| invalid("ET_BIND", &value, e.to_string()))?,
            None => DEFAULT_BIND,
        };

        let weapon = match get("ET_WEAPON") {
            Some(value) => value
                .trim()
                .parse::<KillMethod>()
                .map_err(|e| invalid("ET_WEAPON", &value, e.to_string()))?,
            None => KillMethod::default(),
        };

        let max_score = match get("ET_MAX_SCORE") {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .map_err(|e| invalid("ET_MAX_SCORE", &value, e.to_string()))?,
            None => i64::from(DEFAULT_MAX_SCORE),
        };
        let settings = GameSettings::new(weapon, max_score)
            .map_err(|e| invalid("ET_MAX_SCORE", &max_score.to_string(), e.to_string()))?;

        let defaults = TrackerConfig::default();
        let tracker = TrackerConfig {
            poll_interval: millis(&get, "ET_POLL_MS")?.unwrap_or(defaults.poll_interval),
            degrade_timeout: millis(&get, "ET_DEGRADE_TIMEOUT_MS")?
                .unwrap_or(defaults.degrade_timeout),
            recover_timeout: millis(&get, "ET_RECOVER_TIMEOUT_MS")?
                .unwrap_or(defaults.recover_timeout),
        };

        Ok(Self {
            bind,
            static_dir: get("ET_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR)),
            log_dir: get("ET_LOG_DIR").map(PathBuf::from),
            game: GameConfig {
                target_label: get("ET_TARGET_LABEL")
                    .map(|v| v.trim().to_string())
                    .unwrap_or_else(|| DEFAULT_TARGET_LABEL.to_string()),
                settings,
                tracker,
            },
        })
    }

    /// Path of the log file, if file logging is configured.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }
}

/// Positive millisecond duration.
fn millis(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<Duration>, ConfigError> {
    let Some(value) = get(var) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(0) => Err(invalid(var, &value, "must be positive".to_string())),
        Ok(ms) => Ok(Some(Duration::from_millis(ms))),
        Err(e) => Err(invalid(var, &value, e.to_string())),
    }
}

fn invalid(var: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
