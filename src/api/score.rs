//! Score Records

use crate::api::common::{Metadata, Paginated};
use crate::api::leaderboard::LeaderboardInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single play on a leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Score {
    pub id: u64,

    /// Present on leaderboard score listings, absent on player score listings
    pub leaderboard_player_info: Option<LeaderboardPlayer>,

    pub rank: u64,
    pub base_score: u64,
    pub modified_score: u64,
    pub pp: f64,
    pub weight: f64,

    /// Comma separated modifier codes
    pub modifiers: String,

    pub multiplier: f64,
    pub bad_cuts: u32,
    pub missed_notes: u32,
    pub max_combo: u32,
    pub full_combo: bool,
    pub hmd: u32,
    pub has_replay: bool,
    pub time_set: Option<DateTime<Utc>>,
}

/// Player summary embedded in leaderboard score listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderboardPlayer {
    pub id: String,
    pub name: String,
    pub profile_picture: String,
    pub country: String,
    pub permissions: u64,
    pub role: Option<String>,
}

/// A player's score together with the leaderboard it was set on
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerScore {
    pub score: Score,
    pub leaderboard: LeaderboardInfo,
}

/// A page of a player's scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerScoreCollection {
    pub player_scores: Vec<PlayerScore>,
    pub metadata: Metadata,
}

/// A page of one leaderboard's scores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreCollection {
    pub scores: Vec<Score>,
    pub metadata: Metadata,
}

impl Paginated for PlayerScoreCollection {
    type Item = PlayerScore;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn into_items(self) -> Vec<PlayerScore> {
        self.player_scores
    }
}

impl Paginated for ScoreCollection {
    type Item = Score;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn into_items(self) -> Vec<Score> {
        self.scores
    }
}

impl Score {
    /// Modifier codes, empty when the play was unmodified
    pub fn modifier_list(&self) -> Vec<&str> {
        self.modifiers
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .collect()
    }
}
