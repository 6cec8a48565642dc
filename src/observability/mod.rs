//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer around the resolver produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (lookup counters and latency)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - The resolver core stays silent; instrumentation wraps it
//! - Request ID flows through every log line of a request

pub mod logging;
pub mod metrics;
