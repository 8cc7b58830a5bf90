//! Logging
//!
//! The client emits `tracing` events; applications that don't install their
//! own subscriber can call [`init_tracing`].

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "SCORESABER_LOG";

/// Filter from `SCORESABER_LOG`, falling back to `info`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a global fmt subscriber
///
/// Returns `false` when a global subscriber was already set.
pub fn init_tracing() -> bool {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter())
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_refused() {
        init_tracing();
        assert!(!init_tracing());
    }
}
