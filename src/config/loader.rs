//! Configuration Loader
//!
//! Layers built-in defaults, an optional JSON file and environment overrides.

use crate::config::settings::ClientConfig;
use crate::error::{Result, ScoreSaberError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Points at an explicit config file
pub const CONFIG_PATH_ENV: &str = "SCORESABER_CONFIG";

/// Overrides the API base URL
pub const API_URL_ENV: &str = "SCORESABER_API_URL";

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    config: ClientConfig,
}

impl ConfigLoader {
    /// Create a new config loader and load from default locations
    pub fn new() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut loader = Self {
            config: ClientConfig::default(),
        };

        if let Some(path) = Self::get_config_paths().into_iter().find(|p| p.exists()) {
            loader.load_from_file(&path)?;
        }

        loader.apply_env_overrides();
        Ok(loader)
    }

    /// Create a loader with a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self {
            config: ClientConfig::default(),
        };

        loader.load_from_file(path)?;
        loader.apply_env_overrides();

        Ok(loader)
    }

    /// Get list of config paths to check, first match wins
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(custom_path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(custom_path));
        }

        paths.push(PathBuf::from("scoresaber.json"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("scoresaber").join("config.json"));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScoreSaberError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.config = serde_json::from_str(&content).map_err(|e| {
            ScoreSaberError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "loaded client config");
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.config.base_url = url;
            }
        }
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Take ownership of the configuration
    pub fn into_config(self) -> ClientConfig {
        self.config
    }
}
