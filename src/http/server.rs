//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the resolution handler
//! - Wire up middleware (tracing, timeout, request ID, basic auth)
//! - Resolve every request against the current route table
//! - Swap in a freshly built resolver when the config changes
//! - Serve until shutdown is signalled

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::auth::{basic_auth_middleware, HttpAuth};
use crate::config::ResolverConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::http::response::{error_response, Resolution};
use crate::observability::metrics;
use crate::routing::{descriptor, Resolver};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Current route table. Replaced wholesale on reload, never mutated.
    pub resolver: Arc<ArcSwap<Resolver>>,
}

/// HTTP front end for the route resolver.
pub struct HttpServer {
    router: Router,
    config: ResolverConfig,
    resolver: Arc<ArcSwap<Resolver>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ResolverConfig) -> Self {
        let resolver = Arc::new(ArcSwap::from_pointee(Resolver::from_config(&config.routes)));
        let state = AppState {
            resolver: resolver.clone(),
        };

        let router = Self::build_router(&config, state);
        Self {
            router,
            config,
            resolver,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ResolverConfig, state: AppState) -> Router {
        let mut app = Router::new()
            .route("/{*path}", any(resolve_handler))
            .route("/", any(resolve_handler));

        if let Some(auth) = HttpAuth::from_config(&config.auth) {
            tracing::info!(realm = %auth.realm(), "Basic authentication enabled");
            app = app.layer(middleware::from_fn_with_state(
                Arc::new(auth),
                basic_auth_middleware,
            ));
        }

        app.with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server on `listener` until `shutdown` fires.
    ///
    /// Each config received on `config_updates` replaces the route table.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ResolverConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.resolver.load().len(),
            "HTTP server starting"
        );

        let resolver = self.resolver.clone();
        let running = self.config.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                let ignored = restart_required(&running, &config);
                if !ignored.is_empty() {
                    tracing::warn!(
                        sections = ?ignored,
                        "Only routes are reloaded; restart to apply changes to these sections"
                    );
                }

                let next = Resolver::from_config(&config.routes);
                tracing::info!(routes = next.len(), "Route table swapped");
                resolver.store(Arc::new(next));
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// A snapshot of the route table currently in use.
    pub fn resolver(&self) -> Arc<Resolver> {
        self.resolver.load_full()
    }

    /// The router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Config sections that differ from the running config but are only read at
/// startup.
fn restart_required(running: &ResolverConfig, next: &ResolverConfig) -> Vec<&'static str> {
    let mut changed = Vec::new();
    if running.listener != next.listener {
        changed.push("listener");
    }
    if running.auth != next.auth {
        changed.push("auth");
    }
    if running.timeouts != next.timeouts {
        changed.push("timeouts");
    }
    if running.observability != next.observability {
        changed.push("observability");
    }
    changed
}

/// Resolve the request's method and path and report the matched pattern.
async fn resolve_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let started = Instant::now();
    let request_id = request_id(request.headers());
    let method = request.method().as_str();
    let path = request.uri().path();
    let descriptor = descriptor(method, path);

    let resolver = state.resolver.load();
    let result = resolver.resolve_path(&descriptor);
    metrics::record_resolution(metrics::outcome_label(&result), started);

    match result {
        Ok(pattern) => {
            tracing::debug!(
                request_id = %request_id,
                descriptor = %descriptor,
                pattern = %pattern,
                "Route resolved"
            );
            Resolution {
                pattern: pattern.to_string(),
                descriptor,
            }
            .into_response()
        }
        Err(err) if err.is_not_found() => {
            tracing::debug!(request_id = %request_id, descriptor = %descriptor, "No route matched");
            error_response(descriptor, &err)
        }
        Err(err) => {
            tracing::error!(request_id = %request_id, descriptor = %descriptor, error = %err, "Route table contains a malformed pattern");
            error_response(descriptor, &err)
        }
    }
}
