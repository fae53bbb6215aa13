//! Connection configuration, optionally loaded from a TOML file.
//!
//! Every key has a default, so an absent or empty file talks to the live
//! site with the same parameters a browser session would use.

use crate::source::FetchError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.binance.com";

/// Rows requested per trade window. Keep this modest: the endpoint is an
/// internal one and large pages draw attention.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/67.0.3396.99 Mobile Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-GB,en;q=0.9,en-US;q=0.8,de;q=0.7";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionConfig {
    /// Scheme and host of the site, without a trailing path.
    pub base_url: String,
    pub page_size: u32,
    pub user_agent: String,
    pub accept_language: String,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout_secs: Option<u64>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: DEFAULT_USER_AGENT.into(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.into(),
            timeout_secs: None,
        }
    }
}

impl ConnectionConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FetchError::Config(format!("read config file {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string and validate it.
    pub fn from_toml(content: &str) -> Result<Self, FetchError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| FetchError::Config(format!("parse config TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        if self.page_size == 0 {
            return Err(FetchError::Config("page_size must be at least 1".into()));
        }
        let url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FetchError::Config(format!("base_url '{}': {e}", self.base_url)))?;
        if url.host_str().is_none() {
            return Err(FetchError::Config(format!(
                "base_url '{}' has no host",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Full URL for an endpoint path such as `/user/getMoneyLog.html`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Host part of `base_url`, sent as the `authority` header.
    pub fn authority(&self) -> Option<String> {
        let url = reqwest::Url::parse(&self.base_url).ok()?;
        let host = url.host_str()?;
        Some(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        })
    }
}
