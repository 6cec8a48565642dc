//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the resolver
//! service. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the route resolver.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ResolverConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route patterns, evaluated in the order they appear in the file.
    pub routes: Vec<RouteConfig>,

    /// HTTP Basic authentication in front of the resolution endpoint.
    pub auth: AuthConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A single route pattern.
///
/// ```toml
/// [[routes]]
/// name = "assets"
/// pattern = "GET /assets/**"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Optional label for logs.
    #[serde(default)]
    pub name: Option<String>,

    /// Pattern text, e.g. `"* /users/*"` or `"**"`.
    pub pattern: String,
}

impl RouteConfig {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            name: None,
            pattern: pattern.into(),
        }
    }
}

/// HTTP Basic authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthConfig {
    /// Require credentials on every resolution request.
    pub enabled: bool,

    /// Realm announced in the `WWW-Authenticate` challenge.
    pub realm: String,

    /// Accepted user/password pairs.
    pub users: Vec<UserConfig>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            realm: "secret".to_string(),
            users: Vec::new(),
        }
    }
}

/// A single Basic-Auth user.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserConfig {
    pub username: String,

    /// May be empty: `user:` is a valid credential.
    #[serde(default)]
    pub password: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_keep_file_order() {
        let config: ResolverConfig = toml::from_str(
            r#"
            [[routes]]
            pattern = "* /loomings"

            [[routes]]
            name = "carpet"
            pattern = "THE /carpet/bag"

            [[routes]]
            pattern = "**"
            "#,
        )
        .unwrap();

        let patterns: Vec<_> = config.routes.iter().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, ["* /loomings", "THE /carpet/bag", "**"]);
        assert_eq!(config.routes[1].name.as_deref(), Some("carpet"));
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: ResolverConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(!config.auth.enabled);
        assert_eq!(config.auth.realm, "secret");
        assert_eq!(config.timeouts.request_secs, 30);
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_user_password_defaults_to_empty() {
        let config: ResolverConfig = toml::from_str(
            r#"
            [auth]
            enabled = true
            users = [{ username = "ishmael" }]
            "#,
        )
        .unwrap();
        assert_eq!(config.auth.users[0].password, "");
    }
}
