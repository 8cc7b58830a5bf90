//! Endpoint Operations
//!
//! One method on [`ScoreSaberClient`](crate::ScoreSaberClient) per remote
//! endpoint, plus the multi-page aggregations built on them.

mod leaderboards;
mod players;
mod ranking;
mod scores;

pub use scores::SCORES_PER_PAGE;
