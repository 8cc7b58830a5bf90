//! Rate Limit Gate
//!
//! Every request to the service passes through [`RateLimitGate::dispatch`].
//! The gate keeps a local request budget for the current window, pauses new
//! requests once only the reserve is left, and takes the reset time reported
//! in each response as ground truth for when the budget refills.

use crate::client::clock::Clock;
use crate::client::http::{HttpTransport, Transport};
use crate::config::{ClientConfig, RateLimitConfig};
use crate::error::{Result, ScoreSaberError};
use parking_lot::Mutex;
use reqwest::header::HeaderMap;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, trace, warn};

/// Wait past the reported reset before re-checking an exhausted budget
const ADMISSION_MARGIN: Duration = Duration::from_secs(1);

/// Delay past a reported reset before the refill applies
const REFILL_GRACE: Duration = Duration::from_millis(500);

/// Floor for an admission wait whose reset is already behind us
const MIN_ADMISSION_WAIT: Duration = Duration::from_millis(100);

/// Point-in-time copy of the gate's budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetSnapshot {
    /// Requests left in the current window
    pub remaining: i64,

    /// Unix seconds at which the window resets
    pub reset_at: u64,

    /// Refills applied since the window was opened
    pub refills: u64,
}

/// Mutable window state, only touched under the gate's lock
#[derive(Debug)]
struct Window {
    remaining: i64,
    reset_at: u64,

    /// Bumped on every re-arm; a refill task only applies if it still matches
    generation: u64,

    refills: u64,
    refill: Option<JoinHandle<()>>,
}

/// Shared request pacer for one API budget
///
/// Share a single gate (behind an `Arc`) between every client that talks to
/// the same service; separate gates keep separate budgets.
pub struct RateLimitGate {
    transport: Arc<dyn Transport>,
    limits: RateLimitConfig,
    clock: Clock,

    /// Opened on first dispatch
    window: OnceLock<Arc<Mutex<Window>>>,
}

impl RateLimitGate {
    /// Create a gate over a transport
    pub fn new(transport: Arc<dyn Transport>, limits: RateLimitConfig) -> Self {
        Self::with_clock(transport, limits, Clock::system())
    }

    /// Create a gate with an explicit clock anchor
    pub fn with_clock(transport: Arc<dyn Transport>, limits: RateLimitConfig, clock: Clock) -> Self {
        Self {
            transport,
            limits,
            clock,
            window: OnceLock::new(),
        }
    }

    /// Create a gate over the HTTP transport described by `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), config.rate_limit.clone()))
    }

    /// Budget settings this gate enforces
    pub fn limits(&self) -> &RateLimitConfig {
        &self.limits
    }

    /// Current budget, `None` until the first dispatch
    pub fn budget(&self) -> Option<BudgetSnapshot> {
        self.window.get().map(|window| {
            let state = window.lock();
            BudgetSnapshot {
                remaining: state.remaining,
                reset_at: state.reset_at,
                refills: state.refills,
            }
        })
    }

    /// Send a GET for `path` once budget allows and return the untyped body
    ///
    /// The request counts against the budget before it is sent, whether or
    /// not it succeeds. A response without a parseable reset header fails
    /// with [`ScoreSaberError::MissingRateLimitHeader`].
    pub async fn dispatch(&self, path: &str) -> Result<serde_json::Value> {
        let window = self.window();
        self.admit(window, path).await;

        debug!(path, "dispatching request");
        let response = self.transport.get(path).await?;

        let reported = self.reset_from(&response.headers).ok_or_else(|| {
            warn!(path, header = %self.limits.reset_header, "response missing rate limit reset");
            ScoreSaberError::MissingRateLimitHeader {
                path: path.to_string(),
            }
        })?;
        self.reconcile(window, reported);

        Ok(response.body)
    }

    fn ceiling(&self) -> i64 {
        i64::from(self.limits.budget)
    }

    /// Open the window on first use and arm its initial refill
    ///
    /// `reset_at` is kept in whole seconds; the refill itself fires one full
    /// window after now.
    fn window(&self) -> &Arc<Mutex<Window>> {
        self.window.get_or_init(|| {
            let opened = self.clock.now_unix();
            let reset_at = opened.as_secs() + self.limits.window_secs;
            let window = Arc::new(Mutex::new(Window {
                remaining: self.ceiling(),
                reset_at,
                generation: 0,
                refills: 0,
                refill: None,
            }));

            let deadline = self.clock.instant_at(opened + self.limits.window());
            arm_refill(&window, &mut window.lock(), deadline, self.ceiling());
            debug!(reset_at, budget = self.limits.budget, "rate limit window opened");

            window
        })
    }

    /// Wait until the budget is above the reserve, then take one request from it
    ///
    /// Check and decrement share one lock acquisition. Concurrent callers
    /// each pass their own check, so the reserve bounds what this process
    /// starts, not what the service has yet to count.
    async fn admit(&self, window: &Mutex<Window>, path: &str) {
        let reserve = i64::from(self.limits.reserve);

        loop {
            let wake_at = {
                let mut state = window.lock();
                if state.remaining > reserve {
                    state.remaining -= 1;
                    return;
                }
                Duration::from_secs(state.reset_at) + ADMISSION_MARGIN
            };

            let deadline = self
                .clock
                .instant_at(wake_at)
                .max(Instant::now() + MIN_ADMISSION_WAIT);
            debug!(path, wake_at = wake_at.as_secs(), "request budget exhausted, waiting for reset");
            tokio::time::sleep_until(deadline).await;
        }
    }

    /// Adopt a later reported reset and move the refill with it
    fn reconcile(&self, window: &Arc<Mutex<Window>>, reported: u64) {
        let mut state = window.lock();
        if reported <= state.reset_at {
            trace!(reported, reset_at = state.reset_at, "reset not later than known window");
            return;
        }

        debug!(previous = state.reset_at, reset_at = reported, "rate limit window advanced");
        state.reset_at = reported;

        let deadline = self
            .clock
            .instant_at(Duration::from_secs(reported) + REFILL_GRACE);
        arm_refill(window, &mut state, deadline, self.ceiling());
    }

    fn reset_from(&self, headers: &HeaderMap) -> Option<u64> {
        headers
            .get(self.limits.reset_header.as_str())
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
    }
}

impl Drop for RateLimitGate {
    fn drop(&mut self) {
        if let Some(window) = self.window.get() {
            if let Some(refill) = window.lock().refill.take() {
                refill.abort();
            }
        }
    }
}

/// Replace any pending refill with one firing at `at`
fn arm_refill(handle: &Arc<Mutex<Window>>, state: &mut Window, at: Instant, ceiling: i64) {
    if let Some(previous) = state.refill.take() {
        previous.abort();
    }
    state.generation += 1;

    let generation = state.generation;
    let window = Arc::downgrade(handle);
    state.refill = Some(tokio::spawn(async move {
        tokio::time::sleep_until(at).await;

        let Some(window) = window.upgrade() else {
            return;
        };
        let mut state = window.lock();
        if state.generation != generation {
            return;
        }
        state.remaining = ceiling;
        state.refills += 1;
        state.refill = None;
        trace!(refills = state.refills, "request budget refilled");
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::http::TransportResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const T0: u64 = 1_700_000_000;

    /// Transport answering from a closure keyed by call index
    struct FakeTransport<F> {
        calls: AtomicUsize,
        paths: Mutex<Vec<String>>,
        latency: Duration,
        respond: F,
    }

    #[async_trait]
    impl<F> Transport for FakeTransport<F>
    where
        F: Fn(usize) -> Result<TransportResponse> + Send + Sync,
    {
        async fn get(&self, path: &str) -> Result<TransportResponse> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.paths.lock().push(path.to_string());
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            (self.respond)(call)
        }
    }

    fn fake<F>(respond: F) -> Arc<FakeTransport<F>>
    where
        F: Fn(usize) -> Result<TransportResponse> + Send + Sync,
    {
        Arc::new(FakeTransport {
            calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
            latency: Duration::ZERO,
            respond,
        })
    }

    fn reply(reset: Option<u64>) -> Result<TransportResponse> {
        let mut headers = HeaderMap::new();
        if let Some(reset) = reset {
            headers.insert("x-ratelimit-reset", reset.to_string().parse().unwrap());
        }
        Ok(TransportResponse {
            headers,
            body: json!({ "ok": true }),
        })
    }

    fn limits(budget: u32) -> RateLimitConfig {
        RateLimitConfig {
            budget,
            ..Default::default()
        }
    }

    fn gate(transport: Arc<dyn Transport>, budget: u32) -> RateLimitGate {
        RateLimitGate::with_clock(transport, limits(budget), Clock::anchored(Duration::from_secs(T0)))
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_dispatch_opens_window() {
        let transport = fake(|_| reply(Some(T0 + 61)));
        let gate = gate(transport.clone(), 400);
        assert!(gate.budget().is_none());

        let body = gate.dispatch("players?page=1").await.unwrap();
        assert_eq!(body["ok"], true);

        let budget = gate.budget().unwrap();
        assert_eq!(budget.remaining, 399);
        assert_eq!(budget.reset_at, T0 + 61);
        assert_eq!(budget.refills, 0);
        assert_eq!(*transport.paths.lock(), vec!["players?page=1".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_decrements_even_when_request_fails() {
        let transport = fake(|call| match call {
            0 => Err(ScoreSaberError::transport("p", Some(503), "down")),
            _ => reply(None),
        });
        let gate = gate(transport, 400);

        let err = gate.dispatch("p").await.unwrap_err();
        assert!(matches!(err, ScoreSaberError::Transport { .. }));
        assert_eq!(gate.budget().unwrap().remaining, 399);

        let err = gate.dispatch("p").await.unwrap_err();
        assert!(matches!(err, ScoreSaberError::MissingRateLimitHeader { .. }));
        assert_eq!(gate.budget().unwrap().remaining, 398);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_reset_header_is_missing() {
        let transport = fake(|_| {
            let mut headers = HeaderMap::new();
            headers.insert("x-ratelimit-reset", "soon".parse().unwrap());
            Ok(TransportResponse {
                headers,
                body: json!([]),
            })
        });
        let gate = gate(transport, 400);

        let err = gate.dispatch("leaderboard/by-id/1/info").await.unwrap_err();
        match err {
            ScoreSaberError::MissingRateLimitHeader { path } => {
                assert_eq!(path, "leaderboard/by-id/1/info")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_never_moves_backward() {
        let resets = [T0 + 200, T0 + 150, T0 + 90, T0 + 201];
        let transport = fake(move |call| reply(Some(resets[call])));
        let gate = gate(transport, 400);

        gate.dispatch("a").await.unwrap();
        assert_eq!(gate.budget().unwrap().reset_at, T0 + 200);

        gate.dispatch("b").await.unwrap();
        gate.dispatch("c").await.unwrap();
        assert_eq!(gate.budget().unwrap().reset_at, T0 + 200);

        gate.dispatch("d").await.unwrap();
        assert_eq!(gate.budget().unwrap().reset_at, T0 + 201);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_reset_once_reserve_is_reached() {
        let transport = fake(|_| reply(Some(T0 + 61)));
        let gate = gate(transport.clone(), 12);
        let start = Instant::now();

        gate.dispatch("1").await.unwrap();
        gate.dispatch("2").await.unwrap();
        assert_eq!(gate.budget().unwrap().remaining, 10);
        assert_eq!(start.elapsed(), Duration::ZERO);

        gate.dispatch("3").await.unwrap();
        let waited = start.elapsed();
        assert!(waited >= Duration::from_secs(62), "waited {waited:?}");
        assert!(waited < Duration::from_secs(63), "waited {waited:?}");

        let budget = gate.budget().unwrap();
        assert_eq!(budget.refills, 1);
        assert_eq!(budget.remaining, 11);
        assert_eq!(transport.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_refill_applies() {
        let resets = [T0 + 100, T0 + 120];
        let transport = fake(move |call| reply(Some(resets[call])));
        let gate = gate(transport, 400);

        gate.dispatch("a").await.unwrap();
        gate.dispatch("b").await.unwrap();
        assert_eq!(gate.budget().unwrap().remaining, 398);

        // past both the initial and the first advanced refill
        tokio::time::sleep(Duration::from_secs(101)).await;
        let budget = gate.budget().unwrap();
        assert_eq!(budget.remaining, 398);
        assert_eq!(budget.refills, 0);

        tokio::time::sleep(Duration::from_secs(20)).await;
        let budget = gate.budget().unwrap();
        assert_eq!(budget.remaining, 400);
        assert_eq!(budget.refills, 1);

        tokio::time::sleep(Duration::from_secs(300)).await;
        assert_eq!(gate.budget().unwrap().refills, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_refill_fires_one_window_after_open() {
        let transport = fake(|_| reply(Some(T0 + 61)));
        let opened = Duration::from_secs(T0) + Duration::from_millis(700);
        let gate = RateLimitGate::with_clock(transport, limits(400), Clock::anchored(opened));

        gate.dispatch("a").await.unwrap();
        assert_eq!(gate.budget().unwrap().reset_at, T0 + 61);

        tokio::time::sleep(Duration::from_millis(60_900)).await;
        let budget = gate.budget().unwrap();
        assert_eq!(budget.remaining, 399);
        assert_eq!(budget.refills, 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let budget = gate.budget().unwrap();
        assert_eq!(budget.remaining, 400);
        assert_eq!(budget.refills, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advanced_refill_waits_half_a_second_past_reset() {
        let transport = fake(|_| reply(Some(T0 + 100)));
        let gate = gate(transport, 400);

        gate.dispatch("a").await.unwrap();
        assert_eq!(gate.budget().unwrap().reset_at, T0 + 100);

        tokio::time::sleep(Duration::from_millis(100_400)).await;
        let budget = gate.budget().unwrap();
        assert_eq!(budget.remaining, 399);
        assert_eq!(budget.refills, 0);

        tokio::time::sleep(Duration::from_millis(200)).await;
        let budget = gate.budget().unwrap();
        assert_eq!(budget.remaining, 400);
        assert_eq!(budget.refills, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_dispatches_stop_at_reserve() {
        let transport = Arc::new(FakeTransport {
            calls: AtomicUsize::new(0),
            paths: Mutex::new(Vec::new()),
            latency: Duration::from_secs(1),
            respond: |_: usize| reply(Some(T0 + 61)),
        });
        let gate = Arc::new(gate(transport.clone(), 15));

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let gate = gate.clone();
                tokio::spawn(async move { gate.dispatch(&format!("page={i}")).await })
            })
            .collect();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(transport.calls.load(Ordering::SeqCst), 5);
        assert_eq!(gate.budget().unwrap().remaining, 10);

        for task in tasks {
            tokio_test::assert_ok!(task.await.unwrap());
        }
        assert_eq!(transport.calls.load(Ordering::SeqCst), 8);
        assert_eq!(gate.budget().unwrap().remaining, 12);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhausted_budget_does_not_spin() {
        let transport = fake(|_| reply(Some(T0)));
        let gate = Arc::new(gate(transport.clone(), 11));
        gate.dispatch("first").await.unwrap();

        // reset already behind us and no refill pending
        let window = gate.window.get().unwrap().clone();
        {
            let mut state = window.lock();
            state.reset_at = T0 - 10;
            if let Some(refill) = state.refill.take() {
                refill.abort();
            }
        }

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.dispatch("second").await })
        };

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
        assert!(!waiter.is_finished());

        window.lock().remaining = 11;
        tokio_test::assert_ok!(waiter.await.unwrap());
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }
}
