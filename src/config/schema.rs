//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! tracking service. All types derive Serde traits for deserialization
//! from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the tracking service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TrackerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Cross-origin admission settings.
    pub origins: OriginConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Counter storage backend.
    pub storage: StorageConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Cross-origin admission configuration.
///
/// Requests that carry no `Origin` header are treated as same-origin and
/// admitted regardless of this list. Requests that do carry one must match
/// one of the configured prefixes. An empty list therefore denies all
/// cross-origin traffic while still serving same-origin callers.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OriginConfig {
    /// Allowed origin prefixes (site URL plus local dev origins),
    /// e.g. `["https://jobs.example.com", "http://localhost:3000"]`.
    pub allowed: Vec<String>,
}

/// A single fixed-window rate limit.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitProfile {
    /// Maximum admitted requests per client per window.
    pub max_requests: u32,

    /// Window length in milliseconds. The window is a whole bucket: it
    /// resets entirely once expired, it does not slide.
    pub window_ms: u64,
}

impl Default for RateLimitProfile {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_ms: 60_000,
        }
    }
}

/// Rate limiting configuration.
///
/// Two profiles guard the API: `read` covers the stats endpoints, `write`
/// covers the tracking (counter-mutating) endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Profile for read endpoints (GET /job-stats).
    pub read: RateLimitProfile,

    /// Profile for write endpoints (the POST /track-* family).
    pub write: RateLimitProfile,

    /// Interval between background sweeps of expired client windows,
    /// in milliseconds.
    pub sweep_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            read: RateLimitProfile {
                max_requests: 200,
                window_ms: 60_000,
            },
            write: RateLimitProfile {
                max_requests: 50,
                window_ms: 60_000,
            },
            sweep_interval_ms: 60_000,
        }
    }
}

/// Which counter store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local store. Counts reset on restart; for dev and tests.
    #[default]
    Memory,

    /// Shared Redis store. Required when running multiple instances so
    /// all of them see the same counters.
    Redis,
}

/// Counter storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend selection.
    pub backend: StorageBackend,

    /// Redis connection URL, used when `backend = "redis"`.
    pub redis_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            redis_url: "redis://127.0.0.1:6379".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
