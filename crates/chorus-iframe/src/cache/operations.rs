use chorus_common::{new_correlation_id, Event, IframeId};
use tracing::{debug, info, warn};

use crate::entry::{CachedIframe, IframeKind};
use crate::resolver::{ResolveError, ResolvedFrame};

use super::{CacheError, IframeSessionCache};

impl IframeSessionCache {
    /// Make sure a session frame is cached and mark it recently accessed.
    ///
    /// Resolves name and URL on first open only; re-opening an existing frame
    /// keeps them. Does not change the active frame.
    pub async fn open_session(
        &self,
        session_id: impl Into<IframeId>,
        workspace_id: &str,
    ) -> Result<CachedIframe, CacheError> {
        let kind = IframeKind::Session {
            workspace_id: workspace_id.to_string(),
        };
        self.open(session_id.into(), kind).await
    }

    /// Same contract as [`open_session`](Self::open_session) for a
    /// configured web application.
    pub async fn open_webapp(
        &self,
        webapp_id: impl Into<IframeId>,
    ) -> Result<CachedIframe, CacheError> {
        self.open(webapp_id.into(), IframeKind::Webapp).await
    }

    async fn open(&self, id: IframeId, kind: IframeKind) -> Result<CachedIframe, CacheError> {
        if let Some(frame) = self.reopen(&id, &kind)? {
            debug!(id = %id, "frame already cached");
            return Ok(frame);
        }

        let mut permit = self.inflight.acquire(&id).await;

        // A concurrent open of the same id may have finished while we waited.
        if let Some(frame) = self.reopen(&id, &kind)? {
            debug!(id = %id, "frame cached by a concurrent open");
            return Ok(frame);
        }
        if let Some(source) = permit.shared_failure() {
            debug!(id = %id, error = %source, "concurrent resolution failed");
            return Err(CacheError::Resolution { id, source });
        }

        let cid = new_correlation_id();
        debug!(cid = %cid, id = %id, kind = ?kind.tag(), "resolving frame");

        let resolved = match self.resolve(&id, &kind).await {
            Ok(resolved) => resolved,
            Err(source) => {
                warn!(cid = %cid, id = %id, error = %source, "frame resolution failed");
                permit.record_failure(source.clone());
                return Err(CacheError::Resolution { id, source });
            }
        };

        let frame = CachedIframe {
            id: id.clone(),
            kind,
            url: resolved.url,
            name: resolved.name,
            last_accessed: self.clock.now(),
        };

        let admission = {
            let mut state = self.lock_state();
            let capacity = state.capacity();
            state
                .admit(frame.clone())
                .ok_or_else(|| CacheError::CapacityExhausted {
                    id: id.clone(),
                    capacity,
                })?
        };

        for victim in admission.evicted {
            info!(cid = %cid, id = %victim, "frame evicted");
            self.publish(Event::IframeEvicted(victim));
        }
        info!(cid = %cid, id = %id, url = %frame.url, "frame opened");
        self.publish(Event::IframeOpened {
            id,
            kind: frame.kind.tag(),
        });
        Ok(frame)
    }

    /// Bump an already cached frame. An id cached under the other kind is
    /// refused without touching it.
    fn reopen(&self, id: &IframeId, kind: &IframeKind) -> Result<Option<CachedIframe>, CacheError> {
        let mut state = self.lock_state();
        let Some(cached) = state.get(id).map(|frame| frame.kind.tag()) else {
            return Ok(None);
        };
        if cached != kind.tag() {
            warn!(id = %id, cached = ?cached, requested = ?kind.tag(), "frame kind mismatch");
            return Err(CacheError::KindMismatch {
                id: id.clone(),
                cached,
                requested: kind.tag(),
            });
        }
        Ok(state.touch(id, self.clock.now()))
    }

    async fn resolve(&self, id: &IframeId, kind: &IframeKind) -> Result<ResolvedFrame, ResolveError> {
        if id.is_empty() {
            return Err(ResolveError::Invalid("frame id is empty".into()));
        }

        let resolved = match kind {
            IframeKind::Session { workspace_id } => {
                self.resolver.resolve_session(id, workspace_id).await?
            }
            IframeKind::Webapp => self.resolver.resolve_webapp(id).await?,
        };

        if resolved.url.trim().is_empty() {
            return Err(ResolveError::Invalid(format!("resolver returned no URL for {id}")));
        }
        Ok(resolved)
    }

    /// Show `id`. Returns `false` and changes nothing if it is not cached;
    /// callers open first, then activate.
    pub fn set_active(&self, id: &IframeId) -> bool {
        let activated = self.lock_state().activate(id, self.clock.now());
        let Some(evicted) = activated else {
            debug!(id = %id, "activate ignored, frame not cached");
            return false;
        };

        for victim in evicted {
            info!(id = %victim, "frame evicted after overflow");
            self.publish(Event::IframeEvicted(victim));
        }
        debug!(id = %id, "frame activated");
        self.publish(Event::IframeActivated(id.clone()));
        true
    }

    /// Drop `id` from the cache. Closing the active frame leaves no frame
    /// active. Closing an unknown id is a no-op returning `false`.
    pub fn close(&self, id: &IframeId) -> bool {
        if self.lock_state().remove(id).is_none() {
            debug!(id = %id, "close ignored, frame not cached");
            return false;
        }
        info!(id = %id, "frame closed");
        self.publish(Event::IframeClosed(id.clone()));
        true
    }

    /// Close every frame. Returns the closed ids in insertion order.
    pub fn close_all(&self) -> Vec<IframeId> {
        let closed = self.lock_state().clear();
        for id in &closed {
            self.publish(Event::IframeClosed(id.clone()));
        }
        if !closed.is_empty() {
            info!(count = closed.len(), "all frames closed");
        }
        closed
    }

    /// Change the capacity, evicting LRU non-active frames down to it.
    pub fn set_capacity(&self, capacity: usize) -> Result<Vec<IframeId>, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        let evicted = self.lock_state().set_capacity(capacity);
        for victim in &evicted {
            self.publish(Event::IframeEvicted(victim.clone()));
        }
        info!(capacity, evicted = evicted.len(), "cache capacity changed");
        Ok(evicted)
    }
}
