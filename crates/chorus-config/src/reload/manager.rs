use crate::schema::ChorusConfig;
use crate::watcher::ConfigWatcher;
use std::path::PathBuf;
use tokio::sync::{broadcast, watch};
use tracing::{debug, error, info, warn};

/// Publishes the validated config for one file, re-reading it on every edit.
///
/// Receivers only ever see configs that passed validation: an edit that fails
/// to parse or validate is logged and the previous config stays current.
pub struct ReloadManager {
    config_path: PathBuf,
    generation: u64,
}

impl ReloadManager {
    /// Load `config_path` and keep watching it in a background task.
    ///
    /// A missing, unreadable or invalid file yields the defaults; the watcher
    /// still runs, so fixing the file later takes effect.
    pub async fn start(config_path: PathBuf) -> (ChorusConfig, watch::Receiver<ChorusConfig>) {
        let initial = crate::load_config_from(&config_path).unwrap_or_else(|e| {
            warn!(path = %config_path.display(), error = %e, "using default config");
            ChorusConfig::default()
        });

        let (config_tx, config_rx) = watch::channel(initial.clone());
        let mut manager = ReloadManager {
            config_path,
            generation: 0,
        };
        tokio::spawn(async move { manager.run(config_tx).await });

        (initial, config_rx)
    }

    async fn run(&mut self, config_tx: watch::Sender<ChorusConfig>) {
        let watcher = match ConfigWatcher::new(self.config_path.clone()) {
            Ok(watcher) => watcher,
            Err(e) => {
                error!(path = %self.config_path.display(), error = %e, "cannot watch config");
                return;
            }
        };

        let (change_tx, mut changes) = broadcast::channel::<()>(16);
        tokio::spawn(async move {
            if let Err(e) = watcher.watch(change_tx).await {
                error!(error = %e, "config watcher stopped");
            }
        });

        loop {
            match changes.recv().await {
                Ok(()) => {
                    if !self.publish_reload(&config_tx) {
                        debug!("no config receivers left, stopping reload");
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    // Ticks carry no payload; one reload covers the skipped ones.
                    debug!(skipped, "coalescing config change ticks");
                    if !self.publish_reload(&config_tx) {
                        return;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => {
                    debug!("config change channel closed");
                    return;
                }
            }
        }
    }

    /// Returns `false` once nobody listens anymore.
    fn publish_reload(&mut self, config_tx: &watch::Sender<ChorusConfig>) -> bool {
        match crate::load_config_from(&self.config_path) {
            Ok(config) => {
                self.generation += 1;
                info!(
                    generation = self.generation,
                    capacity = config.cache.capacity,
                    webapps = config.webapps.len(),
                    "config reloaded"
                );
                config_tx.send(config).is_ok()
            }
            Err(e) => {
                warn!(path = %self.config_path.display(), error = %e, "ignoring config edit");
                !config_tx.is_closed()
            }
        }
    }
}
