//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (windows > 0, limits > 0)
//! - Check addresses parse and origins are well-formed
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: TrackerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{RateLimitProfile, StorageBackend, TrackerConfig};

/// A single semantic problem found in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("rate_limit.{profile}.max_requests must be positive")]
    ZeroMaxRequests { profile: &'static str },

    #[error("rate_limit.{profile}.window_ms must be positive")]
    ZeroWindow { profile: &'static str },

    #[error("rate_limit.sweep_interval_ms must be positive")]
    ZeroSweepInterval,

    #[error("storage.redis_url must be set when storage.backend is redis")]
    MissingRedisUrl,

    #[error("origins.allowed entry {0:?} must start with http:// or https://")]
    InvalidOrigin(String),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),
}

fn check_profile(
    profile: &RateLimitProfile,
    name: &'static str,
    errors: &mut Vec<ValidationError>,
) {
    if profile.max_requests == 0 {
        errors.push(ValidationError::ZeroMaxRequests { profile: name });
    }
    if profile.window_ms == 0 {
        errors.push(ValidationError::ZeroWindow { profile: name });
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &TrackerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_profile(&config.rate_limit.read, "read", &mut errors);
    check_profile(&config.rate_limit.write, "write", &mut errors);
    if config.rate_limit.sweep_interval_ms == 0 {
        errors.push(ValidationError::ZeroSweepInterval);
    }

    if config.storage.backend == StorageBackend::Redis && config.storage.redis_url.is_empty() {
        errors.push(ValidationError::MissingRedisUrl);
    }

    for origin in &config.origins.allowed {
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            errors.push(ValidationError::InvalidOrigin(origin.clone()));
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&TrackerConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = TrackerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.rate_limit.write.max_requests = 0;
        config.rate_limit.write.window_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroMaxRequests { profile: "write" }));
    }

    #[test]
    fn redis_backend_requires_url() {
        let mut config = TrackerConfig::default();
        config.storage.backend = StorageBackend::Redis;
        config.storage.redis_url = String::new();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingRedisUrl]);
    }

    #[test]
    fn origins_must_carry_scheme() {
        let mut config = TrackerConfig::default();
        config.origins.allowed = vec![
            "https://jobs.example.com".into(),
            "jobs.example.com".into(),
        ];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidOrigin("jobs.example.com".into())]
        );
    }
}
