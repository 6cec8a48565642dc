//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the listener address and timeouts
//! - Check that auth settings are usable when enabled
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ResolverConfig → Result<(), Vec<ValidationError>>
//! - Route patterns are only checked for emptiness; glob syntax is left to
//!   lookup time so a bad pattern behaves the same from a file or from code

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ResolverConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid bind address {0:?}")]
    BindAddress(String),

    #[error("invalid metrics address {0:?}")]
    MetricsAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("route #{0} has an empty pattern")]
    EmptyPattern(usize),

    #[error("auth realm must not be empty")]
    EmptyRealm,

    #[error("auth is enabled but no users are configured")]
    NoUsers,

    #[error("auth user #{0} has an empty username")]
    EmptyUsername(usize),

    #[error("duplicate auth user {0:?}")]
    DuplicateUser(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &ResolverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for (idx, route) in config.routes.iter().enumerate() {
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern(idx));
        }
    }

    if config.auth.enabled {
        if config.auth.realm.trim().is_empty() {
            errors.push(ValidationError::EmptyRealm);
        }
        if config.auth.users.is_empty() {
            errors.push(ValidationError::NoUsers);
        }
    }

    let mut seen = HashSet::new();
    for (idx, user) in config.auth.users.iter().enumerate() {
        if user.username.is_empty() {
            errors.push(ValidationError::EmptyUsername(idx));
        } else if !seen.insert(user.username.as_str()) {
            errors.push(ValidationError::DuplicateUser(user.username.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
