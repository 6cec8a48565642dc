//! HTTP Basic credential parsing and verification.

use std::collections::HashMap;
use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;

/// The credential store itself failed (not a rejected login).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("credential lookup failed: {0}")]
pub struct LookupError(pub String);

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("no auth string found")]
    MissingToken,

    #[error("invalid base64 credentials: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("credentials are not valid UTF-8")]
    NotUtf8,

    #[error("credentials have no ':' separating user and password")]
    MissingPassword,

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// A decoded `user:password` pair.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Looks up a username/password combination.
pub trait UserPasswordLookup: Send + Sync {
    /// `Ok(false)` means the credentials were simply wrong. `Err` is reserved
    /// for a failing lookup mechanism.
    fn is_valid(&self, username: &str, password: &str) -> Result<bool, LookupError>;
}

/// Decides whether raw `Authorization` data is authenticated.
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, header: &str) -> Result<bool, AuthError>;
}

/// Authenticator for the `Basic` scheme.
pub struct BasicAuth<L> {
    users: L,
}

impl<L: UserPasswordLookup> BasicAuth<L> {
    pub fn new(users: L) -> Self {
        Self { users }
    }
}

impl<L: UserPasswordLookup> Authenticator for BasicAuth<L> {
    fn authenticate(&self, header: &str) -> Result<bool, AuthError> {
        let credentials = parse_basic(header)?;
        Ok(self
            .users
            .is_valid(&credentials.username, &credentials.password)?)
    }
}

/// Parse a `Basic <base64(user:password)>` header value.
///
/// The scheme token is not inspected here. The password may be empty
/// (`user:`), but a decoded value without any `:` is rejected.
pub fn parse_basic(header: &str) -> Result<Credentials, AuthError> {
    let (_, token) = header.trim().split_once(' ').ok_or(AuthError::MissingToken)?;
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let decoded = STANDARD.decode(token)?;
    let decoded = String::from_utf8(decoded).map_err(|_| AuthError::NotUtf8)?;
    let (username, password) = decoded.split_once(':').ok_or(AuthError::MissingPassword)?;

    Ok(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// In-memory user table.
#[derive(Debug, Clone, Default)]
pub struct StaticUsers {
    users: HashMap<String, String>,
}

impl StaticUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, username: impl Into<String>, password: impl Into<String>) {
        self.users.insert(username.into(), password.into());
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<U, P> FromIterator<(U, P)> for StaticUsers
where
    U: Into<String>,
    P: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (U, P)>>(iter: T) -> Self {
        let mut users = Self::new();
        for (username, password) in iter {
            users.insert(username, password);
        }
        users
    }
}

impl UserPasswordLookup for StaticUsers {
    fn is_valid(&self, username: &str, password: &str) -> Result<bool, LookupError> {
        Ok(self
            .users
            .get(username)
            .is_some_and(|expected| constant_time_eq(expected.as_bytes(), password.as_bytes())))
    }
}

/// Compare two secrets without leaking their contents or lengths through timing.
///
/// Both sides are hashed to fixed-size SHA-256 digests first.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    Sha256::digest(a).ct_eq(&Sha256::digest(b)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    struct BrokenStore;

    impl UserPasswordLookup for BrokenStore {
        fn is_valid(&self, _: &str, _: &str) -> Result<bool, LookupError> {
            Err(LookupError("store offline".into()))
        }
    }

    #[test]
    fn test_parse_basic() {
        let creds = parse_basic(&header("ishmael:call-me")).unwrap();
        assert_eq!(creds.username, "ishmael");
        assert_eq!(creds.password, "call-me");
    }

    #[test]
    fn test_password_may_contain_colons() {
        let creds = parse_basic(&header("ahab:white:whale")).unwrap();
        assert_eq!(creds.username, "ahab");
        assert_eq!(creds.password, "white:whale");
    }

    #[test]
    fn test_empty_password_accepted() {
        let creds = parse_basic(&header("stubb:")).unwrap();
        assert_eq!(creds.username, "stubb");
        assert_eq!(creds.password, "");
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert!(matches!(
            parse_basic(&header("stubb")),
            Err(AuthError::MissingPassword)
        ));
    }

    #[test]
    fn test_missing_or_bad_token() {
        assert!(matches!(parse_basic("Basic"), Err(AuthError::MissingToken)));
        assert!(matches!(parse_basic("Basic   "), Err(AuthError::MissingToken)));
        assert!(matches!(parse_basic("Basic !!!"), Err(AuthError::Decode(_))));

        let not_utf8 = format!("Basic {}", STANDARD.encode([0xff, 0xfe, b':']));
        assert!(matches!(parse_basic(&not_utf8), Err(AuthError::NotUtf8)));
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = parse_basic(&header("flask:secret")).unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("flask"));
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn test_basic_auth_outcomes() {
        let users: StaticUsers = [("starbuck", "coffee")].into_iter().collect();
        let auth = BasicAuth::new(users);

        assert!(auth.authenticate(&header("starbuck:coffee")).unwrap());
        assert!(!auth.authenticate(&header("starbuck:tea")).unwrap());
        assert!(!auth.authenticate(&header("nobody:coffee")).unwrap());
        assert!(auth.authenticate("Basic").is_err());
    }

    #[test]
    fn test_password_same_length_different_bytes() {
        let users: StaticUsers = [("flask", "harpoon")].into_iter().collect();
        assert_eq!(users.is_valid("flask", "harpoon"), Ok(true));
        assert_eq!(users.is_valid("flask", "harpoom"), Ok(false));
        assert_eq!(users.is_valid("flask", "Harpoon"), Ok(false));
    }

    #[test]
    fn test_password_length_mismatch() {
        let users: StaticUsers = [("flask", "harpoon")].into_iter().collect();
        assert_eq!(users.is_valid("flask", "harpoo"), Ok(false));
        assert_eq!(users.is_valid("flask", "harpoons"), Ok(false));
        assert_eq!(users.is_valid("flask", ""), Ok(false));

        let empty: StaticUsers = [("stubb", "")].into_iter().collect();
        assert_eq!(empty.is_valid("stubb", ""), Ok(true));
        assert_eq!(empty.is_valid("stubb", "x"), Ok(false));
    }

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"whale", b"whale"));
        assert!(!constant_time_eq(b"whale", b"whalf"));
        assert!(!constant_time_eq(b"whale", b"whales"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_lookup_failure_is_not_a_rejection() {
        let auth = BasicAuth::new(BrokenStore);
        let err = auth.authenticate(&header("a:b")).unwrap_err();
        assert!(matches!(err, AuthError::Lookup(_)));
    }
}
