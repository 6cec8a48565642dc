//! Configuration file watcher for hot reload of the route table.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ResolverConfig;

/// Watches the configuration file and publishes every valid revision.
///
/// Invalid revisions are logged and dropped; the running resolver keeps
/// serving the last good route table.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ResolverConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ResolverConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            update_tx,
        };
        (watcher, update_rx)
    }

    /// Start watching. The returned handle must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let ConfigWatcher { path, update_tx } = self;
        let watched = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if is_content_change(&event.kind) => reload(&watched, &update_tx),
                Ok(_) => {}
                Err(e) => tracing::error!(error = %e, "Config watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %path.display(), "Config watcher started");
        Ok(watcher)
    }
}

fn is_content_change(kind: &EventKind) -> bool {
    kind.is_modify() || kind.is_create()
}

fn reload(path: &Path, update_tx: &mpsc::UnboundedSender<ResolverConfig>) {
    match load_config(path) {
        Ok(config) => {
            tracing::info!(routes = config.routes.len(), "Config change detected, reloading route table");
            if update_tx.send(config).is_err() {
                tracing::debug!("Config receiver dropped; ignoring reload");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload config; keeping current route table");
        }
    }
}
