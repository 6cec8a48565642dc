//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter directives for a plain level such as `"info"`.
pub fn default_directives(level: &str) -> String {
    format!("route_resolver={level},tower_http={level}")
}

/// Install the global subscriber. Call once, at startup.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_directives(level))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
