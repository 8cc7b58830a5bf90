//! ScoreSaber Client
//!
//! An async client for the public ScoreSaber leaderboard API. Every request
//! goes through one shared [`RateLimitGate`] that paces calls against the
//! service's request budget, using the reset time each response reports.
//!
//! ```no_run
//! # async fn run() -> scoresaber::Result<()> {
//! let client = scoresaber::ScoreSaberClient::new()?;
//! let top = client.players_under_rank(100, None).await?;
//! let scores = client.all_scores(&top[0].id).await?;
//! # Ok(())
//! # }
//! ```

use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

pub mod api;
pub mod client;
pub mod config;
mod endpoints;
pub mod error;
pub mod logging;
pub mod paging;

pub use api::{
    LeaderboardInfo, LeaderboardInfoCollection, Metadata, Player, PlayerCollection, PlayerScore,
    PlayerScoreCollection, RankRequestListing, Score, ScoreCollection,
};
pub use client::{BudgetSnapshot, RateLimitGate};
pub use config::{ClientConfig, ConfigLoader};
pub use endpoints::SCORES_PER_PAGE;
pub use error::{Result, ScoreSaberError};
pub use paging::{PageRequest, RankPosition, ScoreSort};

/// The main ScoreSaber client
///
/// Cloning is cheap and every clone shares the same gate, and with it the
/// same request budget.
#[derive(Clone)]
pub struct ScoreSaberClient {
    gate: Arc<RateLimitGate>,
}

impl ScoreSaberClient {
    /// Create a new client with configuration from the default locations
    pub fn new() -> Result<Self> {
        let loader = ConfigLoader::new()?;
        Self::with_config(loader.into_config())
    }

    /// Create a client with a custom config path
    pub fn with_config_path(path: impl AsRef<Path>) -> Result<Self> {
        let loader = ConfigLoader::from_path(path)?;
        Self::with_config(loader.into_config())
    }

    /// Create a client from a config object
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let gate = RateLimitGate::from_config(&config)?;
        Ok(Self::with_gate(Arc::new(gate)))
    }

    /// Create a client over an existing gate
    pub fn with_gate(gate: Arc<RateLimitGate>) -> Self {
        Self { gate }
    }

    /// The gate this client dispatches through
    pub fn gate(&self) -> &Arc<RateLimitGate> {
        &self.gate
    }

    /// Current request budget, `None` before the first request
    pub fn budget(&self) -> Option<BudgetSnapshot> {
        self.gate.budget()
    }

    /// Dispatch a request and narrow the payload to `T`
    async fn fetch<T: DeserializeOwned>(&self, request: PageRequest) -> Result<T> {
        let path = request.to_relative_path();
        let raw = self.gate.dispatch(&path).await?;
        serde_json::from_value(raw)
            .map_err(|e| ScoreSaberError::Decode(format!("{}: {}", path, e)))
    }
}
