//! Process configuration loaded from the environment.

use std::net::SocketAddr;

use plantops_observability::{LogConfig, LogFormat};

pub const BIND_ADDR_VAR: &str = "PLANTOPS_BIND_ADDR";
pub const LOG_FORMAT_VAR: &str = "PLANTOPS_LOG_FORMAT";
pub const HISTORY_MONTHS_VAR: &str = "PLANTOPS_HISTORY_MONTHS";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_HISTORY_MONTHS: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}: invalid value `{value}`: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str, reason: impl ToString) -> Self {
        Self::Invalid {
            var,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log: LogConfig,
    /// Months of real history the mass-production prediction reads, and the
    /// minimum it needs before it stops seeding synthetic history.
    pub history_months: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::invalid(BIND_ADDR_VAR, &bind_raw, e))?;

        let format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw
                .parse::<LogFormat>()
                .map_err(|e| ConfigError::invalid(LOG_FORMAT_VAR, &raw, e))?,
            None => LogFormat::default(),
        };

        let history_months = match lookup(HISTORY_MONTHS_VAR) {
            Some(raw) => {
                let n = raw
                    .trim()
                    .parse::<usize>()
                    .map_err(|e| ConfigError::invalid(HISTORY_MONTHS_VAR, &raw, e))?;
                if n == 0 {
                    return Err(ConfigError::invalid(HISTORY_MONTHS_VAR, &raw, "must be at least 1"));
                }
                n
            }
            None => DEFAULT_HISTORY_MONTHS,
        };

        Ok(Self {
            bind_addr,
            log: LogConfig {
                format,
                ..LogConfig::default()
            },
            history_months,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log: LogConfig::default(),
            history_months: DEFAULT_HISTORY_MONTHS,
        }
    }
}
