//! Client Settings
//!
//! Defines the configuration schema for the ScoreSaber client.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public ScoreSaber API root
pub const DEFAULT_BASE_URL: &str = "https://scoresaber.com/api";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every relative path is joined onto
    pub base_url: String,

    /// Whole-request timeout in seconds
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Request budget settings
    pub rate_limit: RateLimitConfig,

    /// Transport retry settings
    pub retry: RetryConfig,
}

/// Request budget the service grants per window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests allowed per window
    pub budget: u32,

    /// Window length assumed before the service reports one
    pub window_secs: u64,

    /// Requests held back below which dispatch pauses
    pub reserve: u32,

    /// Header carrying the window reset as Unix seconds
    pub reset_header: String,
}

/// Retry policy for transient transport failures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,

    /// First backoff interval in milliseconds
    pub initial_interval_ms: u64,

    /// Backoff ceiling in milliseconds
    pub max_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            budget: 400,
            window_secs: 61,
            reserve: 10,
            reset_header: "x-ratelimit-reset".to_string(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_interval_ms: 500,
            max_interval_ms: 10_000,
        }
    }
}

impl ClientConfig {
    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl RetryConfig {
    pub fn initial_interval(&self) -> Duration {
        Duration::from_millis(self.initial_interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }
}
