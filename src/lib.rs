//! Job-board tracking & admission service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  JOBPULSE                     │
//!                      │                                               │
//!   Tracking request   │  ┌───────────┐   ┌────────────┐   ┌────────┐ │
//!   ──────────────────▶│  │ admission │──▶│  tracking  │──▶│ store  │ │
//!                      │  │ origin +  │   │  counter   │   │ memory │ │
//!                      │  │ rate limit│   │  updates   │   │ /redis │ │
//!                      │  └───────────┘   └────────────┘   └────────┘ │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐ │
//!                      │  │          Cross-Cutting Concerns          │ │
//!                      │  │  ┌────────┐ ┌─────────────┐ ┌─────────┐ │ │
//!                      │  │  │ config │ │observability│ │lifecycle│ │ │
//!                      │  │  └────────┘ └─────────────┘ └─────────┘ │ │
//!                      │  └─────────────────────────────────────────┘ │
//!                      └──────────────────────────────────────────────┘
//! ```
//!
//! Every request passes the admission layer before it can touch a counter:
//! cross-origin callers must match a configured origin prefix, and each
//! client is held to a fixed-window request budget. Admitted requests hit
//! the tracking service, which applies an atomic increment against the
//! configured counter store and returns the new value.

// Core subsystems
pub mod admission;
pub mod http;
pub mod store;
pub mod tracking;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::TrackerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
