//! Response bodies for resolution results.
//!
//! # Design Decisions
//! - JSON bodies for both success and failure
//! - RouteNotFound maps to 404, MalformedPattern to 500 (a configuration bug)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::routing::ResolveError;

/// Successful resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resolution {
    /// The matched pattern, exactly as registered.
    pub pattern: String,
    /// The `"VERB PATH"` descriptor that was matched.
    pub descriptor: String,
}

/// Failed resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResolutionError {
    pub error: String,
    pub descriptor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl IntoResponse for Resolution {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Map a resolver error to its HTTP response.
pub fn error_response(descriptor: String, err: &ResolveError) -> Response {
    match err {
        ResolveError::RouteNotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ResolutionError {
                error: "route not found".to_string(),
                descriptor,
                pattern: None,
                detail: None,
            }),
        )
            .into_response(),
        ResolveError::MalformedPattern { pattern, source } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ResolutionError {
                error: "malformed pattern".to_string(),
                descriptor,
                pattern: Some(pattern.clone()),
                detail: Some(source.to_string()),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::GlobError;

    #[test]
    fn test_status_mapping() {
        let not_found = ResolveError::RouteNotFound {
            descriptor: "GET /x".into(),
        };
        assert_eq!(
            error_response("GET /x".into(), &not_found).status(),
            StatusCode::NOT_FOUND
        );

        let malformed = ResolveError::MalformedPattern {
            pattern: "GET **".into(),
            source: GlobError::IllegalSubtree,
        };
        assert_eq!(
            error_response("GET /x".into(), &malformed).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
