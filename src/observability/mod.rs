//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (structured fields, request ID correlation)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics go through the `metrics` facade; recording without an
//!   installed exporter is a no-op, so tests need no setup
//! - The exporter binds its own address, separate from the API listener

pub mod metrics;
