//! The iframe session cache.
//!
//! `IframeSessionCache` owns a bounded set of live frames and tracks which one
//! is visible. Frames are created on first open, bumped on every activation or
//! re-open, and removed by an explicit close or by LRU eviction of a non-active
//! frame when an open would exceed capacity.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chorus_common::{Event, EventBus, IframeId};
use chorus_config::{CacheConfig, OverflowPolicy};

use crate::clock::{Clock, SystemClock};
use crate::entry::{CachedIframe, FrameView};
use crate::resolver::IframeResolver;

mod error;
mod eviction;
mod inflight;
mod operations;
mod state;


pub use error::CacheError;

use inflight::InflightTable;
use state::CacheState;

/// Bounded cache of embedded session and webapp frames.
///
/// Share it as `Arc<IframeSessionCache>`; every method takes `&self`.
pub struct IframeSessionCache {
    resolver: Arc<dyn IframeResolver>,
    clock: Arc<dyn Clock>,
    /// Never held across an `.await`.
    state: Mutex<CacheState>,
    inflight: InflightTable,
    events: Option<EventBus>,
}

impl IframeSessionCache {
    /// Create a cache holding at most `capacity` frames.
    pub fn new(resolver: Arc<dyn IframeResolver>, capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            resolver,
            clock: Arc::new(SystemClock),
            state: Mutex::new(CacheState::new(capacity, OverflowPolicy::default())),
            inflight: InflightTable::default(),
            events: None,
        })
    }

    /// Create a cache sized and configured from the `[cache]` section.
    pub fn from_config(
        config: &CacheConfig,
        resolver: Arc<dyn IframeResolver>,
    ) -> Result<Self, CacheError> {
        Ok(Self::new(resolver, config.capacity as usize)?.with_overflow(config.overflow))
    }

    pub fn with_overflow(self, policy: OverflowPolicy) -> Self {
        self.lock_state().set_overflow(policy);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Publish lifecycle events on `bus`.
    pub fn with_events(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    /// Live frames in insertion order. Recomputed on every call.
    pub fn list_entries(&self) -> Vec<CachedIframe> {
        self.lock_state().snapshot()
    }

    /// Live frames with their visibility, for the renderer.
    pub fn frames(&self) -> Vec<FrameView> {
        self.lock_state().views()
    }

    /// Id of the visible frame, if any.
    pub fn active_id(&self) -> Option<IframeId> {
        self.lock_state().active().cloned()
    }

    pub fn get(&self, id: &IframeId) -> Option<CachedIframe> {
        self.lock_state().get(id).cloned()
    }

    pub fn contains(&self, id: &IframeId) -> bool {
        self.lock_state().get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock_state().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock_state().capacity()
    }

    pub fn overflow_policy(&self) -> OverflowPolicy {
        self.lock_state().overflow()
    }

    /// Ids with a resolution in progress.
    pub fn pending_resolutions(&self) -> usize {
        self.inflight.len()
    }

    fn lock_state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, event: Event) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}
