//! Synchronous cache state. Every transition here is pure bookkeeping; the
//! async wrapper in `operations.rs` adds resolution, logging and events.

use std::collections::HashMap;

use chorus_common::IframeId;
use chorus_config::OverflowPolicy;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::entry::{CachedIframe, FrameView};

use super::eviction::choose_victim;

pub(crate) struct Slot {
    pub(crate) frame: CachedIframe,
    /// Insertion sequence number. Orders `snapshot()` and breaks LRU ties.
    pub(crate) seq: u64,
}

/// Outcome of admitting a new frame.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Admission {
    pub(crate) evicted: Vec<IframeId>,
    /// The frame went in above capacity (`OverflowPolicy::Exceed`).
    pub(crate) overflowed: bool,
}

pub(crate) struct CacheState {
    entries: HashMap<IframeId, Slot>,
    active: Option<IframeId>,
    capacity: usize,
    overflow: OverflowPolicy,
    next_seq: u64,
}

impl CacheState {
    pub(crate) fn new(capacity: usize, overflow: OverflowPolicy) -> Self {
        debug_assert!(capacity >= 1);
        Self {
            entries: HashMap::new(),
            active: None,
            capacity,
            overflow,
            next_seq: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    pub(crate) fn set_overflow(&mut self, policy: OverflowPolicy) {
        self.overflow = policy;
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn active(&self) -> Option<&IframeId> {
        self.active.as_ref()
    }

    pub(crate) fn get(&self, id: &IframeId) -> Option<&CachedIframe> {
        self.entries.get(id).map(|slot| &slot.frame)
    }

    /// Bump `last_accessed` of an existing frame.
    pub(crate) fn touch(&mut self, id: &IframeId, now: DateTime<Utc>) -> Option<CachedIframe> {
        let slot = self.entries.get_mut(id)?;
        slot.frame.last_accessed = now;
        Some(slot.frame.clone())
    }

    /// Whether `admit` would succeed without breaking the overflow policy.
    pub(crate) fn can_admit(&self) -> bool {
        match self.overflow {
            OverflowPolicy::Exceed | OverflowPolicy::EvictActive => true,
            OverflowPolicy::Reject => {
                let needed = (self.entries.len() + 1).saturating_sub(self.capacity);
                let evictable = self.entries.len() - usize::from(self.active.is_some());
                needed <= evictable
            }
        }
    }

    /// Insert a frame not yet present, evicting LRU non-active frames first.
    ///
    /// Returns `None` (state untouched) when the policy is `Reject` and there
    /// is no room.
    pub(crate) fn admit(&mut self, frame: CachedIframe) -> Option<Admission> {
        debug_assert!(!self.entries.contains_key(&frame.id));
        if !self.can_admit() {
            return None;
        }

        let mut admission = Admission::default();
        while self.entries.len() >= self.capacity {
            match choose_victim(self.entries.values(), self.active.as_ref()) {
                Some(victim) => {
                    self.entries.remove(&victim);
                    admission.evicted.push(victim);
                }
                None => break,
            }
        }

        if self.entries.len() >= self.capacity {
            match self.overflow {
                OverflowPolicy::Exceed => {
                    warn!(
                        id = %frame.id,
                        capacity = self.capacity,
                        "only the active frame is left, exceeding capacity by one"
                    );
                    admission.overflowed = true;
                }
                OverflowPolicy::EvictActive => {
                    if let Some(active) = self.active.take() {
                        self.entries.remove(&active);
                        admission.evicted.push(active);
                    }
                }
                // can_admit already guaranteed room.
                OverflowPolicy::Reject => {}
            }
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(frame.id.clone(), Slot { frame, seq });
        Some(admission)
    }

    /// Make `id` the visible frame. Unknown ids leave everything untouched.
    ///
    /// Returns frames evicted to settle a previous overflow.
    pub(crate) fn activate(&mut self, id: &IframeId, now: DateTime<Utc>) -> Option<Vec<IframeId>> {
        self.touch(id, now)?;
        self.active = Some(id.clone());
        Some(self.enforce_capacity())
    }

    /// Remove a frame. Closing the active frame leaves nothing active.
    pub(crate) fn remove(&mut self, id: &IframeId) -> Option<CachedIframe> {
        let slot = self.entries.remove(id)?;
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        Some(slot.frame)
    }

    pub(crate) fn set_capacity(&mut self, capacity: usize) -> Vec<IframeId> {
        debug_assert!(capacity >= 1);
        self.capacity = capacity;
        self.enforce_capacity()
    }

    /// Evict LRU non-active frames until the capacity holds again.
    fn enforce_capacity(&mut self) -> Vec<IframeId> {
        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(victim) = choose_victim(self.entries.values(), self.active.as_ref()) else {
                break;
            };
            self.entries.remove(&victim);
            evicted.push(victim);
        }
        evicted
    }

    pub(crate) fn clear(&mut self) -> Vec<IframeId> {
        self.active = None;
        let mut slots: Vec<Slot> = self.entries.drain().map(|(_, slot)| slot).collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.frame.id).collect()
    }

    /// Live frames in insertion order.
    pub(crate) fn snapshot(&self) -> Vec<CachedIframe> {
        let mut slots: Vec<&Slot> = self.entries.values().collect();
        slots.sort_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.frame.clone()).collect()
    }

    pub(crate) fn views(&self) -> Vec<FrameView> {
        self.snapshot()
            .into_iter()
            .map(|frame| {
                let visible = self.active.as_ref() == Some(&frame.id);
                FrameView { frame, visible }
            })
            .collect()
    }
}
