//! Client configuration from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;
const DEFAULT_LOG_DIR: &str = "logs";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Versioned API root, e.g. `http://localhost:8000/api`.
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Quiz generation may call out to an LLM and needs a much longer timeout.
    pub generation_timeout: Duration,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            generation_timeout: Duration::from_secs(DEFAULT_GENERATION_TIMEOUT_SECS),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
        }
    }
}

impl ClientConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("QUIZ_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let request_timeout = parse_secs(&lookup, "QUIZ_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(defaults.request_timeout);
        let generation_timeout = parse_secs(&lookup, "QUIZ_GENERATION_TIMEOUT_SECS")?
            .unwrap_or(defaults.generation_timeout);

        let log_dir = lookup("QUIZ_LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        Ok(Self {
            api_base_url,
            request_timeout,
            generation_timeout,
            log_dir,
        })
    }

    /// `/health` is served next to the versioned API, not under it.
    pub fn health_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let root = base.strip_suffix("/api").unwrap_or(base);
        format!("{}/health", root)
    }
}

fn parse_secs<F>(lookup: &F, key: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(|secs| Some(Duration::from_secs(secs)))
            .ok_or_else(|| ConfigError::InvalidValue(format!("{}={}", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.generation_timeout, Duration::from_secs(120));
        assert_eq!(config.health_url(), "http://localhost:8000/health");
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("QUIZ_API_URL", "https://quiz.example.com/api/"),
            ("QUIZ_GENERATION_TIMEOUT_SECS", "300"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://quiz.example.com/api");
        assert_eq!(config.generation_timeout, Duration::from_secs(300));
        assert_eq!(config.health_url(), "https://quiz.example.com/health");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("QUIZ_REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue("QUIZ_REQUEST_TIMEOUT_SECS=soon".to_string())
        );
    }
}
