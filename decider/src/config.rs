//! Configuration module for Decider.
//!
//! This module handles parsing configuration from environment variables.
//!
//! # Environment Variables
//!
//! | Variable | Required | Default | Description |
//! |----------|----------|---------|-------------|
//! | `DECIDER_HISTORY_PATH` | No | `<data dir>/history.json` | History file location |
//! | `DECIDER_HISTORY_LIMIT` | No | 50 | Number of decisions remembered |
//! | `DECIDER_SPIN` | No | false | Show the spin reel before every pick |
//!
//! The data directory comes from [`directories::ProjectDirs`], e.g.
//! `~/.local/share/decider` on Linux.
//!
//! # Example
//!
//! ```no_run
//! use decider::config::Config;
//!
//! let config = Config::from_env().expect("Failed to load configuration");
//! println!("History file: {}", config.history_path.display());
//! ```

use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use thiserror::Error;

use crate::history::DEFAULT_HISTORY_LIMIT;

/// History file name inside the data directory.
const HISTORY_FILE_NAME: &str = "history.json";

/// Application name used for the platform data directory.
const APPLICATION: &str = "decider";

/// Errors that can occur during configuration parsing.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to determine home directory.
    #[error("failed to determine home directory")]
    NoHomeDirectory,
}

/// Configuration for Decider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the JSON history file.
    pub history_path: PathBuf,

    /// Maximum number of decisions kept in history.
    pub history_limit: usize,

    /// Whether picks show the spin reel by default.
    pub spin: bool,
}

impl Config {
    /// Creates a new `Config` by parsing environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if:
    /// - `DECIDER_HISTORY_LIMIT` is set but is not a positive integer
    /// - `DECIDER_SPIN` is set but is not a recognised boolean
    /// - `DECIDER_HISTORY_PATH` is unset and the home directory cannot be
    ///   determined
    pub fn from_env() -> Result<Self, ConfigError> {
        // Optional: DECIDER_HISTORY_PATH (default: platform data dir)
        let history_path = match env::var("DECIDER_HISTORY_PATH") {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_history_path()?,
        };

        // Optional: DECIDER_HISTORY_LIMIT (default: 50, must be > 0)
        let history_limit = match env::var("DECIDER_HISTORY_LIMIT") {
            Ok(val) => {
                let limit = val
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: "DECIDER_HISTORY_LIMIT".to_string(),
                        message: format!("expected positive integer, got '{val}'"),
                    })?;
                if limit == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "DECIDER_HISTORY_LIMIT".to_string(),
                        message: "history limit must be greater than 0".to_string(),
                    });
                }
                limit
            }
            Err(_) => DEFAULT_HISTORY_LIMIT,
        };

        // Optional: DECIDER_SPIN (default: false)
        let spin = match env::var("DECIDER_SPIN") {
            Ok(val) => parse_bool(&val).ok_or_else(|| ConfigError::InvalidValue {
                key: "DECIDER_SPIN".to_string(),
                message: format!("expected true/false, got '{val}'"),
            })?,
            Err(_) => false,
        };

        Ok(Self {
            history_path,
            history_limit,
            spin,
        })
    }
}

/// Default history location inside the platform data directory.
fn default_history_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("", "", APPLICATION).ok_or(ConfigError::NoHomeDirectory)?;
    Ok(dirs.data_dir().join(HISTORY_FILE_NAME))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    /// Helper to run tests with isolated environment variables.
    /// Clears all DECIDER_* vars before the test and restores them after.
    fn with_clean_env<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let saved_vars: Vec<(String, String)> = env::vars()
            .filter(|(k, _)| k.starts_with("DECIDER_"))
            .collect();

        for (key, _) in &saved_vars {
            env::remove_var(key);
        }

        let result = f();

        for (key, _) in env::vars().filter(|(k, _)| k.starts_with("DECIDER_")) {
            env::remove_var(key);
        }
        for (key, value) in saved_vars {
            env::set_var(key, value);
        }

        result
    }

    #[test]
    #[serial]
    fn test_full_config() {
        with_clean_env(|| {
            env::set_var("DECIDER_HISTORY_PATH", "/custom/history.json");
            env::set_var("DECIDER_HISTORY_LIMIT", "20");
            env::set_var("DECIDER_SPIN", "yes");

            let config = Config::from_env().expect("should parse full config");

            assert_eq!(config.history_path, PathBuf::from("/custom/history.json"));
            assert_eq!(config.history_limit, 20);
            assert!(config.spin);
        });
    }

    #[test]
    #[serial]
    fn test_defaults_with_explicit_path() {
        with_clean_env(|| {
            env::set_var("DECIDER_HISTORY_PATH", "/tmp/decider.json");

            let config = Config::from_env().expect("should parse config");

            assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
            assert!(!config.spin);
        });
    }

    #[test]
    #[serial]
    fn test_default_path_ends_with_file_name() {
        with_clean_env(|| {
            // Environments without a home directory legitimately fail here.
            if let Ok(config) = Config::from_env() {
                assert!(config.history_path.ends_with(HISTORY_FILE_NAME));
            }
        });
    }

    #[test]
    #[serial]
    fn test_invalid_history_limit() {
        with_clean_env(|| {
            env::set_var("DECIDER_HISTORY_PATH", "/tmp/decider.json");
            env::set_var("DECIDER_HISTORY_LIMIT", "lots");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, .. } if key == "DECIDER_HISTORY_LIMIT"
            ));
        });
    }

    #[test]
    #[serial]
    fn test_zero_history_limit_rejected() {
        with_clean_env(|| {
            env::set_var("DECIDER_HISTORY_PATH", "/tmp/decider.json");
            env::set_var("DECIDER_HISTORY_LIMIT", "0");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, ref message }
                    if key == "DECIDER_HISTORY_LIMIT" && message.contains("greater than 0")
            ));
        });
    }

    #[test]
    #[serial]
    fn test_invalid_spin_flag() {
        with_clean_env(|| {
            env::set_var("DECIDER_HISTORY_PATH", "/tmp/decider.json");
            env::set_var("DECIDER_SPIN", "sometimes");

            let err = Config::from_env().unwrap_err();
            assert!(matches!(
                err,
                ConfigError::InvalidValue { ref key, .. } if key == "DECIDER_SPIN"
            ));
        });
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" on "), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool(""), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "DECIDER_HISTORY_LIMIT".to_string(),
            message: "expected positive integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for DECIDER_HISTORY_LIMIT: expected positive integer"
        );
        assert_eq!(
            ConfigError::NoHomeDirectory.to_string(),
            "failed to determine home directory"
        );
    }
}
