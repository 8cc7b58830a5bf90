//! Configuration Module
//!
//! Handles client configuration loading and defaults.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ClientConfig, RateLimitConfig, RetryConfig, DEFAULT_BASE_URL};
