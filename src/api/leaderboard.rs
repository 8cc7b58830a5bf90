//! Leaderboard Records

use crate::api::common::{Metadata, Paginated};
use crate::api::score::Score;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A map difficulty leaderboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeaderboardInfo {
    pub id: u64,
    pub song_hash: String,
    pub song_name: String,
    pub song_sub_name: String,
    pub song_author_name: String,
    pub level_author_name: String,
    pub difficulty: Difficulty,
    pub max_score: u64,
    pub created_date: Option<DateTime<Utc>>,
    pub ranked_date: Option<DateTime<Utc>>,
    pub qualified_date: Option<DateTime<Utc>>,
    pub loved_date: Option<DateTime<Utc>>,
    pub ranked: bool,
    pub qualified: bool,
    pub loved: bool,
    #[serde(rename = "maxPP")]
    pub max_pp: f64,
    pub stars: f64,
    pub positive_modifiers: bool,
    pub plays: u64,
    pub daily_plays: u64,
    pub cover_image: String,
    pub player_score: Option<Score>,
    pub difficulties: Option<Vec<Difficulty>>,
}

/// Difficulty descriptor of a leaderboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Difficulty {
    pub leaderboard_id: u64,
    pub difficulty: u32,
    pub game_mode: String,
    pub difficulty_raw: String,
}

/// A page of leaderboards
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardInfoCollection {
    pub leaderboards: Vec<LeaderboardInfo>,
    pub metadata: Metadata,
}

impl Paginated for LeaderboardInfoCollection {
    type Item = LeaderboardInfo;

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn into_items(self) -> Vec<LeaderboardInfo> {
        self.leaderboards
    }
}
