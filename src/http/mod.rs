//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stacks per route group)
//!     → admission layer (origin check, rate limit)
//!     → handlers.rs (validate payload, call tracking service)
//!     → error.rs (map failures to JSON error responses)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
