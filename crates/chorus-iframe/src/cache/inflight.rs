//! Per-id single-flight locks for frame resolution.
//!
//! An open that misses the cache takes the lock for its id before calling the
//! resolver, so concurrent opens of the same id queue behind one resolution
//! and find the frame already cached when they get the lock. A failed
//! resolution is left in the slot for the callers queued behind it; the slot
//! goes away with the last permit, so failures are never cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chorus_common::IframeId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::resolver::ResolveError;

type InflightSlot = Arc<AsyncMutex<Option<ResolveError>>>;

#[derive(Default)]
pub(crate) struct InflightTable {
    locks: Mutex<HashMap<IframeId, InflightSlot>>,
}

impl InflightTable {
    pub(crate) async fn acquire(&self, id: &IframeId) -> InflightPermit<'_> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(id.clone()).or_default())
        };
        let guard = Arc::clone(&lock).lock_owned().await;
        InflightPermit {
            table: self,
            id: id.clone(),
            lock,
            guard: Some(guard),
        }
    }

    /// Number of ids with a resolution running or queued.
    pub(crate) fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Held for the duration of one resolution. Dropping it (including when the
/// owning future is cancelled) releases the id.
pub(crate) struct InflightPermit<'a> {
    table: &'a InflightTable,
    id: IframeId,
    lock: InflightSlot,
    guard: Option<OwnedMutexGuard<Option<ResolveError>>>,
}

impl InflightPermit<'_> {
    /// Failure of the resolution this caller queued behind, if any.
    pub(crate) fn shared_failure(&self) -> Option<ResolveError> {
        self.guard.as_ref().and_then(|slot| (**slot).clone())
    }

    /// Hand `error` to every caller still queued on this id.
    pub(crate) fn record_failure(&mut self, error: ResolveError) {
        if let Some(slot) = self.guard.as_mut() {
            **slot = Some(error);
        }
    }
}

impl Drop for InflightPermit<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self
            .table
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // Clones are only taken under `locks`, so a count of two (table + us)
        // means nobody is queued behind this id.
        if Arc::strong_count(&self.lock) == 2 {
            locks.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn permit_cleans_up_when_uncontended() {
        let table = InflightTable::default();
        let id = IframeId::from("a");
        {
            let _permit = table.acquire(&id).await;
            assert_eq!(table.len(), 1);
        }
        assert_eq!(table.len(), 0);
    }

    #[tokio::test]
    async fn second_acquire_waits_for_first() {
        let table = Arc::new(InflightTable::default());
        let id = IframeId::from("a");

        let first = table.acquire(&id).await;

        let waiter = {
            let table = Arc::clone(&table);
            let id = id.clone();
            tokio::spawn(async move {
                let _permit = table.acquire(&id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());
        assert_eq!(table.len(), 1);

        drop(first);
        waiter.await.unwrap();
        assert_eq!(table.len(), 0);
    }

    #[tokio::test]
    async fn failure_reaches_queued_callers_only() {
        let table = Arc::new(InflightTable::default());
        let id = IframeId::from("a");

        let mut first = table.acquire(&id).await;
        assert_eq!(first.shared_failure(), None);

        let waiter = {
            let table = Arc::clone(&table);
            let id = id.clone();
            tokio::spawn(async move {
                let failure = table.acquire(&id).await.shared_failure();
                failure
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        first.record_failure(ResolveError::Transport("refused".into()));
        drop(first);
        assert_eq!(
            waiter.await.unwrap(),
            Some(ResolveError::Transport("refused".into()))
        );

        // Slot is gone with the last permit; a later caller starts clean.
        assert_eq!(table.len(), 0);
        assert_eq!(table.acquire(&id).await.shared_failure(), None);
    }

    #[tokio::test]
    async fn different_ids_do_not_block() {
        let table = InflightTable::default();
        let _a = table.acquire(&IframeId::from("a")).await;
        let _b = table.acquire(&IframeId::from("b")).await;
        assert_eq!(table.len(), 2);
    }
}
