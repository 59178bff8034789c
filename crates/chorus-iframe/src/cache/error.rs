use chorus_common::{ChorusError, FrameKindTag, IframeId};

use crate::resolver::ResolveError;

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to resolve {id}: {source}")]
    Resolution {
        id: IframeId,
        #[source]
        source: ResolveError,
    },

    #[error("cannot open {id}: cache is full ({capacity}) and only the active frame remains")]
    CapacityExhausted { id: IframeId, capacity: usize },

    #[error("{id} is cached as a {cached:?} frame, not {requested:?}")]
    KindMismatch {
        id: IframeId,
        cached: FrameKindTag,
        requested: FrameKindTag,
    },

    #[error("capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

impl From<CacheError> for ChorusError {
    fn from(e: CacheError) -> Self {
        let message = e.to_string();
        match e {
            CacheError::Resolution { .. } => ChorusError::Resolver(message),
            _ => ChorusError::Cache(message),
        }
    }
}
