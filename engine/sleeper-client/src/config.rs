//! Configuration for the Sleeper client

use serde::{Deserialize, Serialize};

use crate::SleeperError;

pub const DEFAULT_API_BASE_URL: &str = "https://api.sleeper.app/v1";
pub const DEFAULT_CDN_BASE_URL: &str = "https://sleepercdn.com";

/// Sleeper API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleeperConfig {
    pub api_base_url: String,
    /// Host serving league and user avatars
    pub cdn_base_url: String,
    /// Per-request timeout; the client never retries
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SleeperConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cdn_base_url: DEFAULT_CDN_BASE_URL.to_string(),
            timeout_secs: 30,
            user_agent: concat!("fantasy-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SleeperConfig {
    /// Create config from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, SleeperError> {
        let defaults = Self::default();

        let api_base_url = std::env::var("SLEEPER_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let cdn_base_url = std::env::var("SLEEPER_CDN_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.cdn_base_url);

        let timeout_secs = match std::env::var("SLEEPER_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| SleeperError::InvalidConfig {
                message: format!("Invalid SLEEPER_TIMEOUT_SECS: {raw}"),
            })?,
            Err(_) => defaults.timeout_secs,
        };

        if timeout_secs == 0 {
            return Err(SleeperError::InvalidConfig {
                message: "SLEEPER_TIMEOUT_SECS must be greater than zero".to_string(),
            });
        }

        Ok(Self { api_base_url, cdn_base_url, timeout_secs, user_agent: defaults.user_agent })
    }

    /// Config pointing at a different API host, e.g. a local test server
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { api_base_url: base_url.into(), ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_public_api() {
        let config = SleeperConfig::default();
        assert_eq!(config.api_base_url, "https://api.sleeper.app/v1");
        assert_eq!(config.cdn_base_url, "https://sleepercdn.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_with_base_url_keeps_other_defaults() {
        let config = SleeperConfig::with_base_url("http://127.0.0.1:9999");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.cdn_base_url, DEFAULT_CDN_BASE_URL);
    }
}
