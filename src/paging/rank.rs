//! Rank Positioning
//!
//! Maps an absolute leaderboard rank onto the 50-per-page player listing.

use crate::error::{Result, ScoreSaberError};

/// Players on one page of the ranking listing
pub const PLAYERS_PER_PAGE: u64 = 50;

/// Where a rank sits in the paginated player listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankPosition {
    /// 1-indexed page holding the rank
    pub page: u64,

    /// 0-indexed position within that page
    pub offset: usize,
}

impl RankPosition {
    /// Locate a 1-indexed rank; rank 0 does not exist
    pub fn for_rank(rank: u64) -> Result<Self> {
        if rank == 0 {
            return Err(ScoreSaberError::InvalidArgument(
                "ranks start at 1".to_string(),
            ));
        }

        Ok(Self {
            page: pages_through_rank(rank),
            offset: ((rank - 1) % PLAYERS_PER_PAGE) as usize,
        })
    }
}

/// Pages needed to list every player down to `rank`
pub fn pages_through_rank(rank: u64) -> u64 {
    rank.div_ceil(PLAYERS_PER_PAGE)
}

impl std::fmt::Display for RankPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {} offset {}", self.page, self.offset)
    }
}
