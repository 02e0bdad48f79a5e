//! Admission subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → origin.rs (check Origin header against allow-list)
//!     → rate_limit.rs (check per-client fixed-window budget)
//!     → Pass to handler
//! ```
//!
//! Terminal outcomes per request:
//! `RECEIVED → ORIGIN_CHECKED → RATE_CHECKED → HANDLER_INVOKED → RESPONDED`,
//! with a rejection (403 or 429) short-circuiting at either check. Nothing
//! is retried at this layer; retry policy belongs to the caller.
//!
//! # Design Decisions
//! - Origin check runs first so rate-limit budgets are not consumed by
//!   traffic that would be rejected anyway
//! - Both checks are synchronous and purely in-memory; they never suspend

pub mod origin;
pub mod rate_limit;

pub use origin::{origin_middleware, OriginPolicy};
pub use rate_limit::{rate_limit_middleware, Decision, RateLimiter};
