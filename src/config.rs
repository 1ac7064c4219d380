//! Client configuration, read from `KAFE_*` environment variables.
//!
//! | variable | default |
//! | --- | --- |
//! | `KAFE_API_URL` | `http://127.0.0.1:3000` |
//! | `KAFE_SESSION_PATH` | `.kafe-session.json` |
//! | `KAFE_POLL_INTERVAL_SECS` | `5` |
//! | `KAFE_TOKEN_VALIDITY_DAYS` | `2` |
//! | `KAFE_REQUEST_TIMEOUT_SECS` | `10` |

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const ENV_PREFIX: &str = "KAFE_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_session_path")]
    pub session_path: PathBuf,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_token_validity_days")]
    pub token_validity_days: i64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_session_path() -> PathBuf {
    PathBuf::from(".kafe-session.json")
}

fn default_poll_interval_secs() -> u64 {
    5
}

fn default_token_validity_days() -> i64 {
    crate::session::DEFAULT_VALIDITY_DAYS
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            session_path: default_session_path(),
            poll_interval_secs: default_poll_interval_secs(),
            token_validity_days: default_token_validity_days(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config: Config = envy::prefixed(ENV_PREFIX).from_env()?;
        config.validated()
    }

    /// Like [`from_env`](Self::from_env), over explicit `(name, value)` pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::prefixed(ENV_PREFIX).from_iter(pairs)?;
        config.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if self.api_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                name: "KAFE_API_URL",
                reason: "must not be empty".into(),
            });
        }
        if self.poll_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "KAFE_POLL_INTERVAL_SECS",
                reason: "must be at least 1".into(),
            });
        }
        if self.token_validity_days <= 0 {
            return Err(ConfigError::Invalid {
                name: "KAFE_TOKEN_VALIDITY_DAYS",
                reason: "must be positive".into(),
            });
        }
        debug!(?self, "Configuration loaded");
        Ok(self)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn token_validity(&self) -> chrono::Duration {
        chrono::Duration::days(self.token_validity_days)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_pairs(pairs(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.poll_interval(), Duration::from_secs(5));
        assert_eq!(config.token_validity(), chrono::Duration::days(2));
    }

    #[test]
    fn test_overrides_and_ignores_foreign_vars() {
        let config = Config::from_pairs(pairs(&[
            ("KAFE_API_URL", "http://192.168.100.234:3000"),
            ("KAFE_POLL_INTERVAL_SECS", "2"),
            ("HOME", "/root"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://192.168.100.234:3000");
        assert_eq!(config.poll_interval_secs, 2);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Config::from_pairs(pairs(&[("KAFE_POLL_INTERVAL_SECS", "0")])),
            Err(ConfigError::Invalid { name: "KAFE_POLL_INTERVAL_SECS", .. })
        ));
        assert!(matches!(
            Config::from_pairs(pairs(&[("KAFE_POLL_INTERVAL_SECS", "soon")])),
            Err(ConfigError::Env(_))
        ));
    }
}
