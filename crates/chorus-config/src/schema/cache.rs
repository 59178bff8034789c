//! Frame cache sizing and overflow behavior.

use serde::{Deserialize, Serialize};

/// What an open does when the cache is full and the only entry left is the
/// active one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum OverflowPolicy {
    /// Insert anyway and exceed capacity by one until the next activation.
    #[default]
    Exceed,
    /// Evict the active entry to make room.
    EvictActive,
    /// Refuse the open.
    Reject,
}

/// Frame cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of frames kept alive (valid range: 1-64).
    pub capacity: u32,
    pub overflow: OverflowPolicy,
    /// Capacity of the lifecycle event channel.
    pub event_buffer: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            overflow: OverflowPolicy::Exceed,
            event_buffer: 64,
        }
    }
}
