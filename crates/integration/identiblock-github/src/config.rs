//! Resolver configuration
//!
//! Read from `IDENTIBLOCK_*` environment variables, falling back to the
//! defaults below.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// GitHub resolver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL, no trailing slash
    pub api_base: String,
    /// Optional token, sent as a bearer credential
    #[serde(skip_serializing)]
    pub token: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempts for transient network failures (1 = no retry)
    pub max_attempts: u32,
    /// GitHub rejects requests without a User-Agent
    pub user_agent: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(10),
            max_attempts: 1,
            user_agent: concat!("identiblock/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl GithubConfig {
    /// Defaults overridden by `IDENTIBLOCK_*` variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`GithubConfig::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_base = lookup("IDENTIBLOCK_GITHUB_API")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base);
        let token = lookup("IDENTIBLOCK_GITHUB_TOKEN").filter(|s| !s.is_empty());
        let timeout = lookup("IDENTIBLOCK_TIMEOUT_SECS")
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout);
        let max_attempts = lookup("IDENTIBLOCK_RETRIES")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_attempts);
        let user_agent = lookup("IDENTIBLOCK_USER_AGENT").unwrap_or(defaults.user_agent);

        Self {
            api_base,
            token,
            timeout,
            max_attempts,
            user_agent,
        }
    }

    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.api_base.starts_with("http://") || self.api_base.starts_with("https://")) {
            return Err(Error::InvalidConfig(format!(
                "api base must be an http(s) URL: {}",
                self.api_base
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be at least 1".into()));
        }
        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be non-zero".into()));
        }
        Ok(())
    }
}
