//! Leaderboard Endpoints

use crate::api::{LeaderboardInfo, LeaderboardInfoCollection, ScoreCollection};
use crate::error::{Result, ScoreSaberError};
use crate::paging::{aggregate, PageRequest};
use crate::ScoreSaberClient;

impl ScoreSaberClient {
    /// Most recently ranked maps
    pub async fn latest_ranked_maps(&self) -> Result<LeaderboardInfoCollection> {
        self.fetch(
            PageRequest::new("leaderboards")
                .param("ranked", true)
                .param("category", 1)
                .param("sort", 0),
        )
        .await
    }

    /// One page of ranked leaderboards with star rating in `min_star..=max_star`
    pub async fn leaderboards_page(
        &self,
        min_star: f64,
        max_star: f64,
        page: u64,
    ) -> Result<LeaderboardInfoCollection> {
        check_star_range(min_star, max_star)?;
        self.fetch(
            PageRequest::new("leaderboards")
                .param("ranked", true)
                .param("minStar", min_star)
                .param("maxStar", max_star)
                .page(page),
        )
        .await
    }

    /// Every ranked leaderboard with star rating in `min_star..=max_star`
    ///
    /// Merged in completion order, not listing order.
    pub async fn ranked_between_stars(
        &self,
        min_star: f64,
        max_star: f64,
    ) -> Result<Vec<LeaderboardInfo>> {
        check_star_range(min_star, max_star)?;
        aggregate::fan_out(|page| self.leaderboards_page(min_star, max_star, page)).await
    }

    /// One page of a leaderboard's scores
    pub async fn leaderboard_scores(&self, leaderboard_id: u64, page: u64) -> Result<ScoreCollection> {
        self.fetch(
            PageRequest::new(format!("leaderboard/by-id/{}/scores", leaderboard_id)).page(page),
        )
        .await
    }

    pub async fn leaderboard_info(&self, leaderboard_id: u64) -> Result<LeaderboardInfo> {
        self.fetch(PageRequest::new(format!(
            "leaderboard/by-id/{}/info",
            leaderboard_id
        )))
        .await
    }
}

fn check_star_range(min_star: f64, max_star: f64) -> Result<()> {
    if !(min_star.is_finite() && max_star.is_finite()) || min_star > max_star {
        return Err(ScoreSaberError::InvalidArgument(format!(
            "invalid star range {}..={}",
            min_star, max_star
        )));
    }
    Ok(())
}
