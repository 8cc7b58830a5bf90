//! Ranking Queue Records

use crate::api::leaderboard::LeaderboardInfo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A map awaiting a ranking decision
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RankRequestListing {
    pub request_id: u64,
    pub weight: i64,
    pub leaderboard_info: LeaderboardInfo,
    #[serde(rename = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
    pub total_rank_votes: VoteGroup,
    #[serde(rename = "totalQATVotes")]
    pub total_qat_votes: VoteGroup,
    pub difficulty_count: u32,
}

/// Vote tally of one reviewing group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoteGroup {
    pub upvotes: u32,
    pub downvotes: u32,
    pub my_vote: bool,
    pub neutral: Option<u32>,
}
