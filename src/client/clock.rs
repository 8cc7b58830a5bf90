//! Wall Clock Anchoring
//!
//! The service reports window resets as Unix seconds while every wait in the
//! gate runs on tokio's monotonic clock. `Clock` pins one wall-clock reading to
//! one tokio instant and converts between the two from there, so a paused
//! tokio clock drives both.

use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::Instant;

/// Converts between Unix time and tokio instants
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    origin: Instant,
    origin_unix: Duration,
}

impl Clock {
    /// Anchor to the current system time
    pub fn system() -> Self {
        let origin_unix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::anchored(origin_unix)
    }

    /// Anchor the current tokio instant to a given Unix time
    pub fn anchored(origin_unix: Duration) -> Self {
        Self {
            origin: Instant::now(),
            origin_unix,
        }
    }

    /// Current Unix time
    pub fn now_unix(&self) -> Duration {
        self.origin_unix + self.origin.elapsed()
    }

    /// Current Unix time in whole seconds
    pub fn now_unix_secs(&self) -> u64 {
        self.now_unix().as_secs()
    }

    /// Tokio instant matching a Unix time; times before the anchor map to the anchor
    pub fn instant_at(&self, unix: Duration) -> Instant {
        match unix.checked_sub(self.origin_unix) {
            Some(offset) => self.origin + offset,
            None => self.origin,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}
