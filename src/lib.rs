//! Route resolver library.
//!
//! Resolves an HTTP verb and path to the first matching pattern of an
//! ordered, immutable route table:
//!
//! ```
//! use route_resolver::routing::Resolver;
//!
//! let resolver = Resolver::new(["* /loomings", "THE /counterpane/**", "**"]);
//! assert_eq!(resolver.resolve("GET", "/loomings").unwrap(), "* /loomings");
//! assert_eq!(resolver.resolve_path("THE /counterpane/1/2").unwrap(), "THE /counterpane/**");
//! assert_eq!(resolver.resolve_path("anything").unwrap(), "**");
//! ```

pub mod auth;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ResolverConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{ResolveError, Resolver};
