//! API Module
//!
//! Record types returned by the ScoreSaber endpoints.

pub mod common;
pub mod leaderboard;
pub mod player;
pub mod ranking;
pub mod score;

pub use common::{Metadata, Paginated};
pub use leaderboard::{Difficulty, LeaderboardInfo, LeaderboardInfoCollection};
pub use player::{Badge, Player, PlayerCollection, ScoreStats};
pub use ranking::{RankRequestListing, VoteGroup};
pub use score::{LeaderboardPlayer, PlayerScore, PlayerScoreCollection, Score, ScoreCollection};
