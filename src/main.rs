//! Route resolver service.
//!
//! Answers every HTTP request with the route pattern it resolves to.
//!
//! ```text
//!     Client Request                ┌──────────────────────────────────────────┐
//!     ─────────────────────────────▶│ request id → trace → [basic auth]        │
//!                                   │        │                                 │
//!                                   │        ▼                                 │
//!                                   │  "VERB PATH" → Resolver (first match)    │
//!     Client Response               │        │                                 │
//!     ◀─────────────────────────────│  200 pattern / 404 / 500 malformed       │
//!                                   │                                          │
//!                                   │  config watcher ──▶ resolver swap        │
//!                                   └──────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use route_resolver::config::{load_config, ConfigWatcher, ResolverConfig};
use route_resolver::observability::{logging, metrics};
use route_resolver::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "route-resolver")]
#[command(about = "Resolve HTTP requests to route patterns", long_about = None)]
struct Args {
    /// TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the route table when the configuration file changes
    #[arg(short, long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => ResolverConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!("route-resolver v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        auth_enabled = config.auth.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    // Keep the watcher handle alive for the lifetime of the server.
    let (_watcher, config_updates) = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config);
    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
