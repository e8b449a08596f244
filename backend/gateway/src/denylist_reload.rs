//! Denylist loading and hot reload.
//!
//! The effective denylist is the inline `denylist.words` merged with the
//! word file, if one is configured. When watching is enabled the file's
//! directory is watched and the shared list is swapped on every change.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use notify::{Event, RecursiveMode, Watcher};
use platescan_config::{DenylistConfig, read_word_list};
use platescan_core::Denylist;
use tokio::sync::{RwLock, mpsc};
use tracing::{error, info, warn};

pub type SharedDenylist = Arc<RwLock<Denylist>>;

/// Build the denylist from inline words and the word file.
pub async fn load_denylist(config: &DenylistConfig) -> Result<Denylist> {
    let mut denylist: Denylist = config.words.iter().collect();
    if let Some(path) = &config.file {
        let words = read_word_list(path).await?;
        denylist.extend_from(&words.iter().collect());
    }
    Ok(denylist)
}

/// Re-read the denylist and swap it in. On failure the previous list stays.
pub async fn reload_denylist(config: &DenylistConfig, shared: &SharedDenylist) -> Result<usize> {
    let fresh = load_denylist(config).await?;
    let size = fresh.len();
    *shared.write().await = fresh;
    Ok(size)
}

pub struct DenylistReloader {
    config: DenylistConfig,
    shared: SharedDenylist,
}

impl DenylistReloader {
    pub fn new(config: DenylistConfig, shared: SharedDenylist) -> Self {
        Self { config, shared }
    }

    /// Start watching the word file. Returns `false` when there is nothing to
    /// watch (no file, or watching disabled).
    pub fn watch(&self) -> Result<bool> {
        let Some(file) = self.config.file.clone() else {
            return Ok(false);
        };
        if !self.config.watch() {
            return Ok(false);
        }

        let (tx, mut rx) = mpsc::channel(100);
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Err(e) = tx.blocking_send(res) {
                error!("Failed to forward denylist file event: {:?}", e);
            }
        })?;

        // Watch the directory: editors often replace the file rather than write to it.
        let dir = watch_dir(&file);
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        info!(file = %file.display(), "Watching denylist file for changes");

        let config = self.config.clone();
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            // keep watcher alive
            let _watcher = watcher;
            while let Some(res) = rx.recv().await {
                match res {
                    Ok(event) if is_relevant(&event, &file) => {
                        match reload_denylist(&config, &shared).await {
                            Ok(size) => info!(size, "Denylist reloaded"),
                            Err(e) => warn!(error = ?e, "Denylist reload failed; keeping previous list"),
                        }
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Denylist watch error: {:?}", e),
                }
            }
        });

        Ok(true)
    }
}

fn watch_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// A create or modify event that names the watched file.
fn is_relevant(event: &Event, file: &Path) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    let Some(name) = file.file_name() else {
        return false;
    };
    event.paths.iter().any(|p| p.file_name() == Some(name))
}
