//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire admission middleware onto the right route groups
//! - Wire up cross-cutting middleware (tracing, timeout, request ID)
//! - Spawn the rate-limit sweeper tasks
//! - Bind the server and serve until shutdown
//!
//! # Middleware composition
//! The tracking (POST) routes sit behind origin validation and the
//! stricter write rate limit; the stats (GET) route is origin-insensitive
//! and only rate limited with the read profile. The origin layer is
//! outermost so rejected cross-origin traffic never consumes rate-limit
//! budget.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::admission::{origin_middleware, rate_limit_middleware, OriginPolicy, RateLimiter};
use crate::config::TrackerConfig;
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics;
use crate::store::CounterStore;
use crate::tracking::TrackingService;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub tracking: TrackingService,
}

/// HTTP server for the tracking API.
pub struct HttpServer {
    router: Router,
    config: TrackerConfig,
    read_limiter: Arc<RateLimiter>,
    write_limiter: Arc<RateLimiter>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    pub fn new(config: TrackerConfig, store: Arc<dyn CounterStore>) -> Self {
        let read_limiter = Arc::new(RateLimiter::new(&config.rate_limit.read));
        let write_limiter = Arc::new(RateLimiter::new(&config.rate_limit.write));
        let origin_policy = Arc::new(OriginPolicy::new(config.origins.allowed.clone()));

        let state = AppState {
            tracking: TrackingService::new(store),
        };

        let router = Self::build_router(
            &config,
            state,
            origin_policy,
            read_limiter.clone(),
            write_limiter.clone(),
        );

        Self {
            router,
            config,
            read_limiter,
            write_limiter,
        }
    }

    /// Build the Axum router with per-group admission stacks.
    fn build_router(
        config: &TrackerConfig,
        state: AppState,
        origin_policy: Arc<OriginPolicy>,
        read_limiter: Arc<RateLimiter>,
        write_limiter: Arc<RateLimiter>,
    ) -> Router {
        // Counter-mutating endpoints: origin check, then the write limit.
        let tracked = Router::new()
            .route("/track-view", post(handlers::track_view))
            .route("/track-application", post(handlers::track_application))
            .route("/track-exam-view", post(handlers::track_exam_view))
            .layer(middleware::from_fn_with_state(
                write_limiter,
                rate_limit_middleware,
            ))
            .layer(middleware::from_fn_with_state(
                origin_policy,
                origin_middleware,
            ));

        // Read endpoints: rate limited only.
        let stats = Router::new()
            .route("/job-stats", get(handlers::job_stats))
            .layer(middleware::from_fn_with_state(
                read_limiter,
                rate_limit_middleware,
            ));

        Router::new()
            .merge(tracked)
            .merge(stats)
            .route("/health", get(handlers::health))
            .with_state(state)
            .layer(middleware::from_fn(track_request_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        // Background reaping of expired rate-limit windows.
        let sweep_interval = Duration::from_millis(self.config.rate_limit.sweep_interval_ms);
        tokio::spawn(
            self.read_limiter
                .clone()
                .run_sweeper(sweep_interval, shutdown.resubscribe()),
        );
        tokio::spawn(
            self.write_limiter
                .clone()
                .run_sweeper(sweep_interval, shutdown.resubscribe()),
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Record endpoint, status, and latency for every request.
async fn track_request_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request.uri().path().to_string();

    let response = next.run(request).await;
    metrics::record_request(&endpoint, response.status().as_u16(), start);
    response
}
