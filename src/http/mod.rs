//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID)
//!     → [auth layer checks credentials when enabled]
//!     → routing::Resolver (method + path → pattern)
//!     → response.rs (JSON resolution or error)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use response::{Resolution, ResolutionError};
pub use server::{AppState, HttpServer};
