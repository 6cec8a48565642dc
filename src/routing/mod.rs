//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, path)
//!     → resolver.rs (join into "VERB PATH", walk patterns in order)
//!     → matcher.rs (subtree attempt for `**` suffixes, then plain glob)
//!     → Return: first matching pattern, RouteNotFound or MalformedPattern
//!
//! Route table construction (at startup or reload):
//!     RouteConfig[]
//!     → keep registration order
//!     → freeze as immutable Resolver
//! ```
//!
//! # Design Decisions
//! - Pattern set immutable after construction (thread-safe without locks)
//! - First match wins; registration order is the only tie-break
//! - Patterns are checked lazily, only when a lookup reaches them
//! - No logging or metrics inside the resolver; callers instrument it

pub mod error;
pub mod matcher;
pub mod resolver;

pub use error::ResolveError;
pub use matcher::{GlobError, Outcome};
pub use resolver::{descriptor, Resolver};
