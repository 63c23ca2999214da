//! Configuration module - environment variable parsing

use std::env;
use std::time::Duration;

use url::Url;

/// Storefront API used when `API_BASE_URL` is not set
pub const DEFAULT_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";

/// Avatar generator used for accounts created through signup
pub const DEFAULT_AVATAR_BASE_URL: &str = "https://ui-avatars.com/api/";

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the storefront REST API, without a trailing slash
    pub api_base_url: String,
    /// Base URL of the placeholder avatar generator
    pub avatar_base_url: String,
    /// Optional per-request timeout. `None` keeps the HTTP client default.
    pub request_timeout: Option<Duration>,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            avatar_base_url: DEFAULT_AVATAR_BASE_URL.to_string(),
            request_timeout: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = validate_http_url("API_BASE_URL", &api_base_url)?;

        let avatar_base_url = lookup("AVATAR_BASE_URL")
            .unwrap_or_else(|| DEFAULT_AVATAR_BASE_URL.to_string());
        validate_http_url("AVATAR_BASE_URL", &avatar_base_url)?;

        let request_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout(raw));
                }
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_base_url,
            avatar_base_url,
            request_timeout,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Checks that `raw` is an http(s) URL and returns it without trailing slashes
fn validate_http_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = Url::parse(trimmed).map_err(|_| ConfigError::InvalidUrl(name))?;
    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        _ => Err(ConfigError::InvalidUrl(name)),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL in environment variable: {0}")]
    InvalidUrl(&'static str),

    #[error("Invalid HTTP_TIMEOUT_SECS value: {0:?}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.avatar_base_url, DEFAULT_AVATAR_BASE_URL);
        assert_eq!(config.request_timeout, None);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn trailing_slash_is_trimmed_from_api_url() {
        let config =
            Config::from_lookup(lookup_from(&[("API_BASE_URL", "http://localhost:3000/api/v1/")]))
                .unwrap();
        assert_eq!(config.api_base_url, "http://localhost:3000/api/v1");
    }

    #[test]
    fn rejects_non_http_api_url() {
        let err = Config::from_lookup(lookup_from(&[("API_BASE_URL", "ftp://example.com")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl("API_BASE_URL")));
    }

    #[test]
    fn parses_timeout_and_rejects_zero() {
        let config =
            Config::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "15")])).unwrap();
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));

        let err = Config::from_lookup(lookup_from(&[("HTTP_TIMEOUT_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(_)));
    }
}
