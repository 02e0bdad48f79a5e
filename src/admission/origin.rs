//! Origin validation middleware.
//!
//! Cross-origin callers must match one of the configured origin prefixes.
//! Requests without an `Origin` header are treated as same-origin and
//! admitted: browsers routinely omit the header on same-origin requests,
//! so an empty allow-list still serves same-origin traffic while denying
//! everything cross-origin. That asymmetry is deliberate.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::http::error::ApiError;
use crate::observability::metrics;

/// Immutable allow-list of origin prefixes, built once at startup.
#[derive(Debug, Clone)]
pub struct OriginPolicy {
    allowed: Vec<String>,
}

impl OriginPolicy {
    pub fn new(allowed: Vec<String>) -> Self {
        Self { allowed }
    }

    /// Pure admission predicate over the declared origin.
    ///
    /// `None` (no header) is allowed; `Some(origin)` is allowed iff the
    /// origin starts with one of the configured prefixes.
    pub fn allows(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(origin) => self.allowed.iter().any(|prefix| origin.starts_with(prefix.as_str())),
        }
    }
}

/// Middleware rejecting cross-origin requests from unknown origins.
pub async fn origin_middleware(
    State(policy): State<Arc<OriginPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);

    if policy.allows(origin.as_deref()) {
        next.run(request).await
    } else {
        warn!(origin = ?origin, "Origin rejected");
        metrics::record_rejection("origin");
        ApiError::OriginRejected.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_allowed() {
        let policy = OriginPolicy::new(vec!["https://example.com".into()]);
        assert!(policy.allows(None));
    }

    #[test]
    fn prefix_match_is_allowed() {
        let policy = OriginPolicy::new(vec!["https://example.com".into()]);
        assert!(policy.allows(Some("https://example.com")));
        assert!(policy.allows(Some("https://example.com/app")));
    }

    #[test]
    fn unknown_origin_is_denied() {
        let policy = OriginPolicy::new(vec!["https://example.com".into()]);
        assert!(!policy.allows(Some("https://evil.com")));
    }

    #[test]
    fn empty_allow_list_denies_all_cross_origin() {
        let policy = OriginPolicy::new(Vec::new());
        assert!(policy.allows(None));
        assert!(!policy.allows(Some("https://example.com")));
    }

    #[test]
    fn multiple_prefixes() {
        let policy = OriginPolicy::new(vec![
            "https://jobs.example.com".into(),
            "http://localhost:3000".into(),
        ]);
        assert!(policy.allows(Some("http://localhost:3000")));
        assert!(!policy.allows(Some("http://localhost:4000")));
    }
}
