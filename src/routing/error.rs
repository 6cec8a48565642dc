//! Resolution errors.

use thiserror::Error;

use crate::routing::matcher::GlobError;

/// Why a descriptor could not be resolved to a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// Every pattern was evaluated and none matched.
    #[error("route not found: {descriptor}")]
    RouteNotFound { descriptor: String },

    /// A registered pattern could not be evaluated. Resolution stops here.
    #[error("malformed pattern {pattern:?}: {source}")]
    MalformedPattern {
        pattern: String,
        #[source]
        source: GlobError,
    },
}

impl ResolveError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::RouteNotFound { .. })
    }
}
