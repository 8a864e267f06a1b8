//! Process configuration, read from `LEDGER_*` environment variables.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use crate::notification::DEFAULT_BUFFER_SIZE;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:18080";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub log_json: bool,
    pub notification_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 18080)),
            log_level: "info".to_string(),
            log_json: false,
            notification_buffer: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from an arbitrary variable source. Unset variables
    /// keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let notification_buffer = parse_var(&lookup, "LEDGER_NOTIFICATION_BUFFER")?
            .unwrap_or(defaults.notification_buffer);
        if notification_buffer == 0 {
            return Err(ConfigError::Invalid {
                var: "LEDGER_NOTIFICATION_BUFFER",
                value: "0".to_string(),
                reason: "must be positive".to_string(),
            });
        }

        Ok(Self {
            bind_addr: parse_var(&lookup, "LEDGER_BIND_ADDR")?.unwrap_or(defaults.bind_addr),
            log_level: lookup("LEDGER_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: parse_var(&lookup, "LEDGER_LOG_JSON")?.unwrap_or(defaults.log_json),
            notification_buffer,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => Ok(Some(parsed)),
            Err(err) => Err(ConfigError::Invalid {
                var,
                reason: err.to_string(),
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_overrides() {
        let config = from_pairs(&[
            ("LEDGER_BIND_ADDR", "127.0.0.1:9000"),
            ("LEDGER_LOG_LEVEL", "debug"),
            ("LEDGER_LOG_JSON", "true"),
            ("LEDGER_NOTIFICATION_BUFFER", "16"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert_eq!(config.notification_buffer, 16);
    }

    #[test]
    fn test_invalid_bind_addr() {
        let err = from_pairs(&[("LEDGER_BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "LEDGER_BIND_ADDR",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_buffer_rejected() {
        assert!(from_pairs(&[("LEDGER_NOTIFICATION_BUFFER", "0")]).is_err());
    }
}
