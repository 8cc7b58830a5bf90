//! Paging Module
//!
//! Request descriptors, rank arithmetic and multi-page aggregation.

pub mod aggregate;
pub mod rank;
pub mod request;

pub use rank::{pages_through_rank, RankPosition, PLAYERS_PER_PAGE};
pub use request::{PageRequest, ScoreSort};
