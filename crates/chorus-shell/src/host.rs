//! Headless frame host: drives the cache from navigation commands and keeps
//! a simulated set of mounted frame nodes in sync through `RenderPlan`.

use std::sync::Arc;

use chorus_common::IframeId;
use chorus_config::ChorusConfig;
use chorus_iframe::{CacheError, ConfigResolver, IframeSessionCache, RenderPlan};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::command::Command;

pub struct Host {
    cache: Arc<IframeSessionCache>,
    resolver: Arc<ConfigResolver>,
    mounted: Vec<IframeId>,
}

impl Host {
    pub fn new(cache: Arc<IframeSessionCache>, resolver: Arc<ConfigResolver>) -> Self {
        Self {
            cache,
            resolver,
            mounted: Vec::new(),
        }
    }

    pub fn mounted(&self) -> &[IframeId] {
        &self.mounted
    }

    /// Run one command and return the JSON line to print.
    pub async fn execute(&mut self, command: Command) -> Result<Value, CacheError> {
        let output = match command {
            Command::OpenSession { id, workspace_id } => {
                let frame = self.cache.open_session(id, &workspace_id).await?;
                json!({ "opened": frame })
            }
            Command::OpenWebapp { id } => {
                let frame = self.cache.open_webapp(id).await?;
                json!({ "opened": frame })
            }
            Command::Activate { id } => {
                json!({ "activated": id, "changed": self.cache.set_active(&id) })
            }
            Command::Close { id } => {
                json!({ "closed": id, "changed": self.cache.close(&id) })
            }
            Command::Capacity(capacity) => {
                let evicted = self.cache.set_capacity(capacity)?;
                json!({ "capacity": capacity, "evicted": evicted })
            }
            Command::List => json!({ "frames": self.cache.frames() }),
            Command::Webapps => json!({ "webapps": self.resolver.webapp_ids() }),
            Command::Clear => json!({ "closed": self.cache.close_all() }),
        };

        let plan = self.render();
        Ok(if plan.is_noop() {
            output
        } else {
            json!({ "result": output, "render": plan })
        })
    }

    /// Apply a reloaded config: resolver tables first, then capacity.
    pub fn apply_config(&self, config: &ChorusConfig) -> Result<Vec<IframeId>, CacheError> {
        self.resolver.reload(config);
        let capacity = config.cache.capacity as usize;
        if capacity == self.cache.capacity() {
            return Ok(Vec::new());
        }
        info!(capacity, "applying reloaded cache capacity");
        self.cache.set_capacity(capacity)
    }

    /// Bring the mounted set in line with the cache.
    pub fn render(&mut self) -> RenderPlan {
        let plan = RenderPlan::reconcile(&self.mounted, &self.cache.frames());
        if !plan.is_noop() {
            debug!(
                mount = plan.mount.len(),
                unmount = plan.unmount.len(),
                "reconciling frame nodes"
            );
        }
        plan.apply(&mut self.mounted);
        plan
    }
}
