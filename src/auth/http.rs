//! HTTP authentication: scheme dispatch, challenges and the axum middleware.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderMap, Request, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::basic::{AuthError, Authenticator, BasicAuth, StaticUsers, UserPasswordLookup};
use crate::config::AuthConfig;

/// Realm used when none is configured.
pub const DEFAULT_REALM: &str = "secret";

/// HTTP authentication front end.
///
/// Authenticators are keyed by lower-cased scheme name (`basic`).
pub struct HttpAuth {
    realm: String,
    schemes: HashMap<String, Arc<dyn Authenticator>>,
}

impl HttpAuth {
    /// HTTP auth with Basic support backed by the given user lookup.
    pub fn basic<L: UserPasswordLookup + 'static>(users: L) -> Self {
        let mut schemes: HashMap<String, Arc<dyn Authenticator>> = HashMap::new();
        schemes.insert("basic".to_string(), Arc::new(BasicAuth::new(users)));
        Self {
            realm: DEFAULT_REALM.to_string(),
            schemes,
        }
    }

    /// Build from configuration; `None` when auth is disabled.
    pub fn from_config(config: &AuthConfig) -> Option<Self> {
        if !config.enabled {
            return None;
        }
        let users: StaticUsers = config
            .users
            .iter()
            .map(|u| (u.username.as_str(), u.password.as_str()))
            .collect();
        Some(Self::basic(users).with_realm(config.realm.clone()))
    }

    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Authenticate a request by its headers.
    ///
    /// On failure the returned `Err` is the 401 challenge to send back.
    pub fn check(&self, headers: &HeaderMap) -> Result<(), Response> {
        let raw = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .unwrap_or_default();

        if raw.is_empty() {
            return Err(self.challenge());
        }

        let scheme = raw.split(' ').next().unwrap_or_default().to_ascii_lowercase();
        let Some(authn) = self.schemes.get(&scheme) else {
            tracing::debug!(scheme = %scheme, "Unsupported authorization scheme");
            return Err(self.challenge());
        };

        match authn.authenticate(raw) {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::debug!("Credentials rejected");
                Err(self.challenge())
            }
            Err(AuthError::Lookup(e)) => {
                tracing::error!(error = %e, "Credential verification failed");
                Err(self.challenge())
            }
            Err(e) => {
                tracing::debug!(error = %e, "Malformed authorization header");
                Err(self.challenge())
            }
        }
    }

    /// The `401 Unauthorized` response naming this realm.
    pub fn challenge(&self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(WWW_AUTHENTICATE, format!("Basic realm=\"{}\"", self.realm))],
            "Authentication Required",
        )
            .into_response()
    }
}

/// Middleware rejecting unauthenticated requests with a Basic challenge.
pub async fn basic_auth_middleware(
    State(auth): State<Arc<HttpAuth>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    match auth.check(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(challenge) => challenge,
    }
}
