pub mod errors;
pub mod events;
pub mod id;

pub use errors::{ChorusError, ConfigError};
pub use events::{Event, EventBus, FrameKindTag};
pub use id::{new_correlation_id, IframeId};
