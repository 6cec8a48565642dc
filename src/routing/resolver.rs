//! Route lookup.
//!
//! # Responsibilities
//! - Hold the ordered route patterns
//! - Resolve a request or raw descriptor to the first matching pattern
//! - Return the matched pattern verbatim, or an explicit error
//!
//! # Design Decisions
//! - Immutable after construction; clones share one `Arc<[String]>`
//! - O(n) scan in registration order (no specificity scoring)
//! - A malformed pattern aborts the lookup instead of being skipped

use std::sync::Arc;

use axum::http::Request;

use crate::config::RouteConfig;
use crate::routing::error::ResolveError;
use crate::routing::matcher::{evaluate, Outcome};

/// Build the `"VERB PATH"` descriptor that patterns are matched against.
pub fn descriptor(method: &str, path: &str) -> String {
    format!("{method} {path}")
}

/// Resolves requests to the first matching route pattern.
///
/// Patterns use path-glob syntax with an optional verb in front:
/// `"GET /foo/*"` matches `GET /foo/bar` but not `GET /foo/bar/baz`, and
/// `"* /foo"` accepts any verb. Two extra wildcards exist:
///
/// - `**` on its own matches every descriptor.
/// - a trailing `/**` matches anything below the prefix, so
///   `"POST /assets/**"` matches `POST /assets/images/a/b.jpg`.
///
/// `/**` anywhere but the end of a pattern has undefined behavior, and
/// `"GET **"` is rejected when a lookup reaches it.
///
/// Patterns are evaluated in the order given. With both `GET /a/b*` and
/// `GET /a/bc` registered, `GET /a/bc` resolves to whichever came first.
#[derive(Debug, Clone)]
pub struct Resolver {
    patterns: Arc<[String]>,
}

impl Resolver {
    /// Create a resolver over the given patterns, kept in order.
    ///
    /// Nothing is validated here; a bad pattern only surfaces when a lookup
    /// evaluates it.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a resolver from configured routes, preserving file order.
    pub fn from_config(routes: &[RouteConfig]) -> Self {
        Self::new(routes.iter().map(|route| route.pattern.as_str()))
    }

    /// Resolve a verb and a path.
    pub fn resolve(&self, method: &str, path: &str) -> Result<&str, ResolveError> {
        self.resolve_path(&descriptor(method, path))
    }

    /// Resolve an HTTP request by its method and URI path.
    ///
    /// Query strings and the authority are not part of the descriptor.
    pub fn resolve_request<B>(&self, request: &Request<B>) -> Result<&str, ResolveError> {
        self.resolve(request.method().as_str(), request.uri().path())
    }

    /// Resolve a raw descriptor such as `"GET /foo/bar"`.
    ///
    /// A descriptor without a verb only matches patterns that have no verb
    /// either (or that use a wildcard broad enough to cover it).
    pub fn resolve_path(&self, descriptor: &str) -> Result<&str, ResolveError> {
        for pattern in self.patterns.iter() {
            match evaluate(pattern, descriptor) {
                Ok(Outcome::Matched) => return Ok(pattern.as_str()),
                Ok(Outcome::NoMatch) => {}
                Err(source) => {
                    return Err(ResolveError::MalformedPattern {
                        pattern: pattern.clone(),
                        source,
                    })
                }
            }
        }

        Err(ResolveError::RouteNotFound {
            descriptor: descriptor.to_string(),
        })
    }

    /// The registered patterns in evaluation order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

impl From<Vec<String>> for Resolver {
    fn from(patterns: Vec<String>) -> Self {
        Self {
            patterns: patterns.into(),
        }
    }
}

impl FromIterator<String> for Resolver {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::GlobError;
    use axum::body::Body;

    fn moby_dick() -> Resolver {
        Resolver::new([
            "* /loomings",
            "THE /carpet/bag",
            "* /carpet/bag",
            "THE /spouter/inn",
            "THE /counterpane/**",
            "* /breakfast/*",
            "* /nantucket/*/*/*",
            "* /nantucket/*/*",
            "* /enter/**",
            "**",
        ])
    }

    #[test]
    fn test_resolve_path_table() {
        let resolver = moby_dick();
        let cases = [
            ("GET /loomings", "* /loomings"),
            ("THE /carpet/bag", "THE /carpet/bag"),
            ("POST /carpet/bag", "* /carpet/bag"),
            ("POST /breakfast/123", "* /breakfast/*"),
            ("HEAD /nantucket/1/2/3", "* /nantucket/*/*/*"),
            ("PUT /nantucket/1/2", "* /nantucket/*/*"),
            ("THE /counterpane/1/2/3/4", "THE /counterpane/**"),
            ("THIS /SHOULD/match/ANYTHING", "**"),
            ("GET /enter/ahab/to/him/stubb/the/pipe", "* /enter/**"),
        ];

        for (give, expect) in cases {
            assert_eq!(resolver.resolve_path(give), Ok(expect), "descriptor {give:?}");
        }
    }

    #[test]
    fn test_resolve_request() {
        let resolver = moby_dick();
        let req = Request::builder()
            .method("GET")
            .uri("http://example.com/nantucket/1/2/3?harpoon=true")
            .body(Body::empty())
            .unwrap();

        assert_eq!(resolver.resolve_request(&req), Ok("* /nantucket/*/*/*"));
        assert_eq!(resolver.resolve("GET", "/nantucket/1/2/3"), Ok("* /nantucket/*/*/*"));
    }

    #[test]
    fn test_first_match_wins() {
        let resolver = Resolver::new(["GET /a/b*", "GET /a/bc"]);
        assert_eq!(resolver.resolve_path("GET /a/bc"), Ok("GET /a/b*"));

        let resolver = Resolver::new(["GET /a/bc", "GET /a/b*"]);
        assert_eq!(resolver.resolve_path("GET /a/bc"), Ok("GET /a/bc"));
    }

    #[test]
    fn test_route_not_found() {
        let resolver = Resolver::new(["GET /a", "POST /b/*"]);
        let err = resolver.resolve_path("GET /b/c").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err,
            ResolveError::RouteNotFound {
                descriptor: "GET /b/c".into()
            }
        );

        assert!(Resolver::default().resolve("GET", "/").unwrap_err().is_not_found());
    }

    #[test]
    fn test_verbless_descriptor() {
        let resolver = Resolver::new(["GET /foo", "/foo", "**"]);
        assert_eq!(resolver.resolve_path("/foo"), Ok("/foo"));
        assert_eq!(resolver.resolve_path("hello"), Ok("**"));
    }

    #[test]
    fn test_illegal_subtree_pattern_is_an_error() {
        let resolver = Resolver::new(["GET /a", "GET **", "**"]);

        // Never reached: an earlier pattern matches first.
        assert_eq!(resolver.resolve_path("GET /a"), Ok("GET /a"));

        assert_eq!(
            resolver.resolve_path("GET /b"),
            Err(ResolveError::MalformedPattern {
                pattern: "GET **".into(),
                source: GlobError::IllegalSubtree,
            })
        );
    }

    #[test]
    fn test_bad_glob_aborts_resolution() {
        let resolver = Resolver::new(["GET /[z-", "**"]);
        let err = resolver.resolve_path("POST /x").unwrap_err();
        assert_eq!(
            err,
            ResolveError::MalformedPattern {
                pattern: "GET /[z-".into(),
                source: GlobError::BadPattern,
            }
        );
    }

    #[test]
    fn test_clones_share_patterns() {
        let resolver: Resolver = vec!["* /a".to_string(), "**".to_string()].into();
        let clone = resolver.clone();
        assert!(std::ptr::eq(resolver.patterns(), clone.patterns()));
        assert_eq!(clone.len(), 2);
        assert!(!clone.is_empty());
    }

    #[test]
    fn test_from_config_keeps_order() {
        let routes = vec![
            RouteConfig {
                name: Some("first".into()),
                pattern: "* /x/*".into(),
            },
            RouteConfig {
                name: None,
                pattern: "* /x/y".into(),
            },
        ];
        let resolver = Resolver::from_config(&routes);
        assert_eq!(resolver.patterns(), ["* /x/*", "* /x/y"]);
        assert_eq!(resolver.resolve_path("GET /x/y"), Ok("* /x/*"));
    }
}
