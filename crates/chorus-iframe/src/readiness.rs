//! Readiness polling for lazily started app instances.
//!
//! A session frame should only be opened once its backing instance is
//! running. [`ReadinessWatcher`] polls a [`StatusProbe`] on a fixed interval
//! until the instance reports running, fails, or the timeout elapses.

use std::time::Duration;

use async_trait::async_trait;
use chorus_common::IframeId;
use chorus_config::ReadinessConfig;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::resolver::ResolveError;

/// Lifecycle state reported for an app instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceStatus {
    Pending,
    Running,
    Failed(String),
}

#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn status(&self, id: &IframeId) -> Result<InstanceStatus, ResolveError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadinessError {
    #[error("instance {id} failed to start: {reason}")]
    Failed { id: IframeId, reason: String },

    #[error("status probe failed for {id}: {source}")]
    Probe {
        id: IframeId,
        #[source]
        source: ResolveError,
    },

    #[error("instance {id} not running after {waited:?}")]
    TimedOut { id: IframeId, waited: Duration },
}

/// Shortest poll interval; smaller values are raised to it.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy)]
pub struct ReadinessWatcher {
    poll_interval: Duration,
    timeout: Duration,
}

impl ReadinessWatcher {
    pub fn new(poll_interval: Duration, timeout: Duration) -> Self {
        if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                requested = ?poll_interval,
                used = ?MIN_POLL_INTERVAL,
                "readiness poll interval too short, clamping"
            );
        }
        Self {
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            timeout,
        }
    }

    pub fn from_config(config: &ReadinessConfig) -> Self {
        Self::new(
            Duration::from_millis(u64::from(config.poll_interval_ms)),
            Duration::from_secs(u64::from(config.timeout_secs)),
        )
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Poll until `id` is running. The first poll happens immediately.
    ///
    /// Probe errors end the wait; `Pending` keeps polling.
    pub async fn wait_ready(
        &self,
        probe: &dyn StatusProbe,
        id: &IframeId,
    ) -> Result<(), ReadinessError> {
        let poll = async {
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut attempts = 0u32;
            loop {
                ticker.tick().await;
                attempts += 1;
                match probe.status(id).await {
                    Ok(InstanceStatus::Running) => {
                        info!(id = %id, attempts, "instance ready");
                        return Ok(());
                    }
                    Ok(InstanceStatus::Pending) => {
                        debug!(id = %id, attempts, "instance still starting");
                    }
                    Ok(InstanceStatus::Failed(reason)) => {
                        warn!(id = %id, reason = %reason, "instance failed to start");
                        return Err(ReadinessError::Failed {
                            id: id.clone(),
                            reason,
                        });
                    }
                    Err(source) => {
                        warn!(id = %id, error = %source, "status probe failed");
                        return Err(ReadinessError::Probe {
                            id: id.clone(),
                            source,
                        });
                    }
                }
            }
        };

        match timeout(self.timeout, poll).await {
            Ok(result) => result,
            Err(_) => {
                warn!(id = %id, waited = ?self.timeout, "gave up waiting for instance");
                Err(ReadinessError::TimedOut {
                    id: id.clone(),
                    waited: self.timeout,
                })
            }
        }
    }
}

impl Default for ReadinessWatcher {
    fn default() -> Self {
        Self::from_config(&ReadinessConfig::default())
    }
}
