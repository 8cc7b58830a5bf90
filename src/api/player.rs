//! Player Records
//!
//! Player profiles as returned by the player and rank listing endpoints.

use crate::api::common::{Metadata, Paginated};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A player profile
///
/// The `basic` endpoint leaves `badges` and `score_stats` empty; `full`
/// fills them in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Player {
    pub id: String,
    pub name: String,
    pub profile_picture: String,
    pub bio: Option<String>,
    pub country: String,
    pub pp: f64,
    pub rank: u64,
    pub country_rank: u64,
    pub role: Option<String>,
    pub badges: Option<Vec<Badge>>,

    /// Comma separated rank history, most recent last
    pub histories: String,

    pub score_stats: Option<ScoreStats>,
    pub permissions: u64,
    pub banned: bool,
    pub inactive: bool,
    pub first_seen: Option<DateTime<Utc>>,
}

/// A profile badge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Badge {
    pub description: String,
    pub image: String,
}

/// Aggregate play statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreStats {
    pub total_score: u64,
    pub total_ranked_score: u64,
    pub average_ranked_accuracy: f64,
    pub total_play_count: u64,
    pub ranked_play_count: u64,
    pub replays_watched: u64,
}

/// One page of the global or country ranking
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerCollection {
    pub players: Vec<Player>,
    pub metadata: Metadata,
}

impl Paginated for PlayerCollection {
    type Item = Player;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn into_items(self) -> Vec<Player> {
        self.players
    }
}

impl Player {
    /// Parsed rank history, skipping entries that are not numbers
    pub fn rank_history(&self) -> Vec<u64> {
        self.histories
            .split(',')
            .filter_map(|entry| entry.trim().parse().ok())
            .collect()
    }
}
