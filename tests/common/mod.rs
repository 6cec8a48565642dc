//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use route_resolver::config::{ResolverConfig, RouteConfig};
use route_resolver::routing::Resolver;
use route_resolver::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// The route table used across the suite, in registration order.
pub const MOBY_DICK: [&str; 10] = [
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
];

/// Descriptor → expected pattern for [`MOBY_DICK`].
#[allow(dead_code)]
pub const EXPECTATIONS: [(&str, &str); 9] = [
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

#[allow(dead_code)]
pub fn moby_dick_resolver() -> Resolver {
    Resolver::new(MOBY_DICK)
}

#[allow(dead_code)]
pub fn moby_dick_config() -> ResolverConfig {
    let mut config = ResolverConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.routes = MOBY_DICK.iter().map(|p| RouteConfig::new(*p)).collect();
    config
}

/// A server running on an ephemeral port.
#[allow(dead_code)]
pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_tx: mpsc::UnboundedSender<ResolverConfig>,
}

/// Start the resolver service on `127.0.0.1:0`.
#[allow(dead_code)]
pub async fn start_server(config: ResolverConfig) -> RunningServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    // The listener is already bound; give the accept loop a moment.
    tokio::time::sleep(Duration::from_millis(50)).await;

    RunningServer {
        addr,
        shutdown,
        config_tx,
    }
}
