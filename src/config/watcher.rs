//! Configuration file watcher for hot reload.
//!
//! Watches the directory holding the config file rather than the file
//! itself: editors that save by renaming a temp file would otherwise drop
//! the watch after the first save.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::EdgeConfig;

/// A watcher that monitors the configuration file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<EdgeConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated configuration updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<EdgeConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// The returned watcher must be kept alive for events to keep flowing.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx;
        let path = self.path.clone();
        let file_name = path.file_name().map(|n| n.to_os_string());
        let last_content = Mutex::new(fs::read_to_string(&path).ok());

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::error!("Watch error: {:?}", e);
                        return;
                    }
                };
                if !touches_file(&event, file_name.as_deref()) {
                    return;
                }

                let content = match fs::read_to_string(&path) {
                    Ok(content) => content,
                    Err(e) => {
                        tracing::warn!(path = ?path, error = %e, "Config file unreadable, keeping current configuration");
                        return;
                    }
                };

                let Ok(mut last) = last_content.lock() else {
                    return;
                };
                if last.as_deref() == Some(content.as_str()) {
                    tracing::trace!("Config file event without content change");
                    return;
                }

                match parse_config(&content) {
                    Ok(new_config) => {
                        tracing::info!(path = ?path, "Config file changed, applying update");
                        *last = Some(content);
                        let _ = tx.send(new_config);
                    }
                    Err(e) => {
                        tracing::error!("Failed to reload config: {}. Keeping current configuration.", e);
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Config watcher started");
        Ok(watcher)
    }
}

/// Whether a filesystem event concerns the config file.
fn touches_file(event: &Event, file_name: Option<&std::ffi::OsStr>) -> bool {
    let relevant_kind = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_));
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some() && p.file_name() == file_name)
}
