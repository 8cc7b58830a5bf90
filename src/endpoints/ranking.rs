//! Ranking Queue Endpoints

use crate::api::RankRequestListing;
use crate::error::Result;
use crate::paging::PageRequest;
use crate::ScoreSaberClient;

impl ScoreSaberClient {
    /// Requests at the head of the ranking queue
    pub async fn ranking_queue_top(&self) -> Result<Vec<RankRequestListing>> {
        self.fetch(PageRequest::new("ranking/requests/top")).await
    }

    /// Requests behind the head of the ranking queue
    pub async fn ranking_queue_below_top(&self) -> Result<Vec<RankRequestListing>> {
        self.fetch(PageRequest::new("ranking/requests/belowTop"))
            .await
    }

    /// The whole ranking queue: top requests first, then the rest
    pub async fn ranking_queue(&self) -> Result<Vec<RankRequestListing>> {
        let (mut queue, below_top) =
            futures::try_join!(self.ranking_queue_top(), self.ranking_queue_below_top())?;
        queue.extend(below_top);
        Ok(queue)
    }
}
