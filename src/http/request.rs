//! Request ID propagation.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) as early as possible
//! - Reuse the caller's `x-request-id` when one is supplied
//! - Echo the ID on the response for log correlation
//!
//! # Design Decisions
//! - Plain tower layer so it sits outside the admission middleware and
//!   rejected requests still get an ID on the response

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    response::Response,
};
use tower::{Layer, Service};
use uuid::Uuid;

pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Layer attaching `x-request-id` to requests and responses.
#[derive(Debug, Clone, Default)]
pub struct RequestIdLayer;

impl<S> Layer<S> for RequestIdLayer {
    type Service = RequestIdService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestIdService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct RequestIdService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for RequestIdService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), S::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        let id = match request.headers().get(&X_REQUEST_ID) {
            Some(existing) => existing.clone(),
            None => {
                let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                    .expect("UUID is a valid header value");
                request
                    .headers_mut()
                    .insert(X_REQUEST_ID.clone(), generated.clone());
                generated
            }
        };

        let future = self.inner.call(request);
        Box::pin(async move {
            let mut response = future.await?;
            response.headers_mut().insert(X_REQUEST_ID.clone(), id);
            Ok(response)
        })
    }
}
