//! Client Module
//!
//! HTTP transport, clock anchoring and the shared rate limit gate.

pub mod clock;
pub mod http;
pub mod rate_limiter;

pub use clock::Clock;
pub use http::{HttpTransport, Transport, TransportResponse};
pub use rate_limiter::{BudgetSnapshot, RateLimitGate};
