//! Player Score Endpoints

use crate::api::{PlayerScore, PlayerScoreCollection};
use crate::error::Result;
use crate::paging::{aggregate, PageRequest, ScoreSort};
use crate::ScoreSaberClient;

/// Scores requested per page of a player's listing
pub const SCORES_PER_PAGE: u64 = 100;

impl ScoreSaberClient {
    /// One page of a player's most recent scores
    ///
    /// `player/{id}/scores?limit=100&sort=recent&page=N`
    pub async fn scores_page(&self, player_id: &str, page: u64) -> Result<PlayerScoreCollection> {
        self.scores_page_sorted(player_id, page, ScoreSort::Recent)
            .await
    }

    /// One page of a player's scores in the given order
    pub async fn scores_page_sorted(
        &self,
        player_id: &str,
        page: u64,
        sort: ScoreSort,
    ) -> Result<PlayerScoreCollection> {
        self.fetch(
            PageRequest::segments(&["player", player_id, "scores"])
                .param("limit", SCORES_PER_PAGE)
                .param("sort", sort.as_str())
                .page(page),
        )
        .await
    }

    /// Every score a player has set
    ///
    /// Pages after the first are fetched concurrently and merged as they
    /// arrive, so the result is not in listing order.
    pub async fn all_scores(&self, player_id: &str) -> Result<Vec<PlayerScore>> {
        aggregate::fan_out(|page| self.scores_page(player_id, page)).await
    }
}
