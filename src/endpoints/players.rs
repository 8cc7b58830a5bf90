//! Player Endpoints

use crate::api::{Player, PlayerCollection};
use crate::error::Result;
use crate::paging::{aggregate, pages_through_rank, PageRequest, RankPosition};
use crate::ScoreSaberClient;

impl ScoreSaberClient {
    /// One page of the global ranking, or of a country's when `country` is set
    ///
    /// `players?page=N[&countries=R]`, 50 players per page.
    pub async fn players_page(&self, page: u64, country: Option<&str>) -> Result<PlayerCollection> {
        self.fetch(
            PageRequest::new("players")
                .page(page)
                .param_opt("countries", country),
        )
        .await
    }

    /// The player holding `rank`, `None` when the listing is shorter than that
    pub async fn player_by_rank(&self, rank: u64, country: Option<&str>) -> Result<Option<Player>> {
        let position = RankPosition::for_rank(rank)?;
        let page = self.players_page(position.page, country).await?;
        Ok(page.players.into_iter().nth(position.offset))
    }

    /// Every player from rank 1 down to `rank`, in rank order
    pub async fn players_under_rank(&self, rank: u64, country: Option<&str>) -> Result<Vec<Player>> {
        RankPosition::for_rank(rank)?;

        let mut players = aggregate::sequential(pages_through_rank(rank), |page| {
            self.players_page(page, country)
        })
        .await?;
        players.truncate(rank as usize);

        Ok(players)
    }

    /// Profile without badges or score statistics
    pub async fn basic_player(&self, player_id: &str) -> Result<Player> {
        self.fetch(PageRequest::segments(&["player", player_id, "basic"]))
            .await
    }

    /// Profile with badges and score statistics
    pub async fn full_player(&self, player_id: &str) -> Result<Player> {
        self.fetch(PageRequest::segments(&["player", player_id, "full"]))
            .await
    }
}
