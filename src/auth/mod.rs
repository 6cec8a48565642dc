//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Authorization header
//!     → http.rs (pick authenticator by scheme)
//!     → basic.rs (decode user:password, ask the UserPasswordLookup)
//!     → pass through, or 401 with WWW-Authenticate challenge
//! ```
//!
//! # Design Decisions
//! - Independent of routing: no shared state with the resolver
//! - A failing credential store is an error, a wrong password is `false`;
//!   both end in a challenge but only the former is logged as an error
//! - `user:` (empty password) is a valid credential; `user` alone is not

pub mod basic;
pub mod http;

pub use basic::{
    parse_basic, AuthError, Authenticator, BasicAuth, Credentials, LookupError, StaticUsers,
    UserPasswordLookup,
};
pub use http::{basic_auth_middleware, HttpAuth, DEFAULT_REALM};
