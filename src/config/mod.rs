//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResolverConfig (validated, immutable)
//!     → routes frozen into a Resolver
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → new Resolver built and swapped in atomically
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, ConfigError};
pub use schema::{
    AuthConfig, ListenerConfig, ObservabilityConfig, ResolverConfig, RouteConfig,
    TimeoutConfig, UserConfig,
};
pub use watcher::ConfigWatcher;
