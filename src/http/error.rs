//! API error taxonomy and response mapping.
//!
//! Every failure leaving this service is a small JSON object with a
//! human-readable `error` field. Backend detail stays in the logs; the
//! caller only ever sees the generic message for 500s.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// Cross-origin request from an origin outside the allow-list.
    #[error("origin not allowed")]
    OriginRejected,

    /// The referenced job or exam does not exist.
    #[error("not found")]
    NotFound,

    /// Client exceeded its request budget for the current window.
    #[error("too many requests")]
    RateLimited,

    /// Storage failure; logged at the call site, opaque to the caller.
    #[error("internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::OriginRejected => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::Backend(_) => ApiError::Internal,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_the_taxonomy() {
        assert_eq!(
            ApiError::Validation("missing field".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::OriginRejected.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::RateLimited.status(),
            StatusCode::TOO_MANY_REQUESTS
        );
        assert_eq!(
            ApiError::Internal.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn backend_failures_become_opaque_internal_errors() {
        let err: ApiError = StoreError::Backend("connection refused".into()).into();
        assert!(matches!(err, ApiError::Internal));
        assert_eq!(err.to_string(), "internal error");
    }
}
