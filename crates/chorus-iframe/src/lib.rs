//! Bounded cache of embedded session and webapp frames.
//!
//! Keeps a set of iframes alive across navigation so switching back to a
//! previously visited workbench session or webapp does not reload it:
//! - `IframeSessionCache` with open / activate / close and LRU eviction
//! - Single-flight resolution of frame metadata per id
//! - Pure `RenderPlan` projection for the DOM host
//! - Readiness polling for app instances that start lazily

pub mod cache;
pub mod clock;
pub mod entry;
pub mod readiness;
pub mod render;
pub mod resolver;

pub use cache::{CacheError, IframeSessionCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CachedIframe, FrameView, IframeKind};
pub use readiness::{InstanceStatus, ReadinessError, ReadinessWatcher, StatusProbe};
pub use render::RenderPlan;
pub use resolver::{ConfigResolver, IframeResolver, ResolveError, ResolvedFrame};
