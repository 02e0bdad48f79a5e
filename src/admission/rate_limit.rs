//! Fixed-window rate limiting middleware.
//!
//! Each client gets a whole-bucket window: the first request opens a
//! window of `window_ms` and every further request within it counts
//! toward `max_requests`. Once the window expires the bucket resets
//! entirely. Bursts of up to ~2x `max_requests` across a window boundary
//! are possible; that is the contract, not a bug.
//!
//! The tracking table is process-local. A deployment running several
//! instances enforces its limits independently per instance; swapping in
//! a shared store means replacing [`RateLimiter::check`], the call sites
//! do not change.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::sync::broadcast;
use tokio::time;
use tracing::{debug, warn};

use crate::config::RateLimitProfile;
use crate::http::error::ApiError;
use crate::observability::metrics;

static X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// One client's usage within the current window.
struct WindowEntry {
    count: u32,
    reset_at: Instant,
}

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed { remaining: u32 },
    Denied { retry_after: Duration },
}

/// Per-client fixed-window request limiter.
pub struct RateLimiter {
    entries: Mutex<HashMap<String, WindowEntry>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(profile: &RateLimitProfile) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            max_requests: profile.max_requests,
            window: Duration::from_millis(profile.window_ms),
        }
    }

    /// Count one request against `key` and decide whether to admit it.
    ///
    /// Expiry is lazy: only the entry being looked up is checked against
    /// the clock. Entries of idle clients are reaped by [`Self::sweep`].
    pub fn check(&self, key: &str) -> Decision {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("rate limiter mutex poisoned");

        let entry = entries
            .entry(key.to_string())
            .or_insert_with(|| WindowEntry {
                count: 0,
                reset_at: now + self.window,
            });

        if now > entry.reset_at {
            // Whole-bucket reset: prior count is discarded.
            entry.count = 0;
            entry.reset_at = now + self.window;
        }

        entry.count += 1;
        if entry.count > self.max_requests {
            Decision::Denied {
                retry_after: entry.reset_at.saturating_duration_since(now),
            }
        } else {
            Decision::Allowed {
                remaining: self.max_requests - entry.count,
            }
        }
    }

    /// Drop every expired window. Returns the number of entries removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.lock().expect("rate limiter mutex poisoned");
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_at);
        before - entries.len()
    }

    /// Periodic sweep loop, run as a background task until shutdown.
    pub async fn run_sweeper(
        self: Arc<Self>,
        interval: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        let mut ticker = time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.sweep();
                    if removed > 0 {
                        debug!(removed, "Swept expired rate-limit windows");
                    }
                }
                _ = shutdown.recv() => {
                    debug!("Rate-limit sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Derive the client key: peer IP, else first `x-forwarded-for` hop,
/// else the literal "unknown".
fn client_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|hop| hop.trim().to_string())
        .filter(|hop| !hop.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware holding clients to the limiter's budget.
///
/// Denied requests get a 429 with a `Retry-After` header and never reach
/// the wrapped handler.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match limiter.check(&key) {
        Decision::Allowed { remaining } => {
            let mut response = next.run(request).await;
            response
                .headers_mut()
                .insert(X_RATELIMIT_REMAINING.clone(), HeaderValue::from(remaining));
            response
        }
        Decision::Denied { retry_after } => {
            warn!(client = %key, "Rate limit exceeded");
            metrics::record_rejection("rate_limit");
            let mut response = ApiError::RateLimited.into_response();
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(retry_after.as_secs().max(1)),
            );
            response
        }
    }
}
