//! Configuration management for the todo application.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::str::FromStr;
use todo_store_runtime::{LoggerConfig, StoreConfig};
use tracing::Level;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Store runtime configuration
    pub store: StoreConfig,
    /// Action logger configuration
    pub logger: LoggerConfig,
    /// Install the action logger middleware (default: true)
    pub log_actions: bool,
    /// Install the serializable check middleware (default: true)
    pub serializable_check: bool,
    /// Start from the starter todos instead of an empty list (default: true)
    pub seed_starter_todos: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            logger: LoggerConfig::default(),
            log_actions: true,
            serializable_check: true,
            seed_starter_todos: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `TODOS_LOG_ACTIONS` | `true` |
    /// | `TODOS_LOG_LEVEL` | `debug` |
    /// | `TODOS_LOG_STATE` | `true` |
    /// | `TODOS_SERIALIZABLE_CHECK` | `true` |
    /// | `TODOS_SEED_STARTER` | `true` |
    /// | `TODOS_BROADCAST_CAPACITY` | `16` |
    ///
    /// Missing or unparseable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).map(|value| value.trim().to_ascii_lowercase());

        let broadcast_capacity = parse("TODOS_BROADCAST_CAPACITY")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.store.broadcast_capacity);

        Self {
            store: defaults.store.with_broadcast_capacity(broadcast_capacity),
            logger: LoggerConfig::new(
                parse("TODOS_LOG_LEVEL")
                    .and_then(|s| Level::from_str(&s).ok())
                    .unwrap_or(defaults.logger.level),
                parse("TODOS_LOG_STATE")
                    .and_then(|s| parse_bool(&s))
                    .unwrap_or(defaults.logger.include_state),
            ),
            log_actions: parse("TODOS_LOG_ACTIONS")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.log_actions),
            serializable_check: parse("TODOS_SERIALIZABLE_CHECK")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.serializable_check),
            seed_starter_todos: parse("TODOS_SEED_STARTER")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.seed_starter_todos),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
