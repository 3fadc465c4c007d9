//! Pending selections: instructions waiting for the operator to pick a session.

use std::collections::{HashMap, VecDeque};

use tokio::sync::Mutex;
use tracing::debug;

/// Default number of selections kept before the oldest is evicted.
pub const DEFAULT_PENDING_CAPACITY: usize = 256;

#[derive(Debug, Default)]
struct PendingInner {
    entries: HashMap<String, String>,
    /// Insertion order, oldest first, used for eviction
    order: VecDeque<String>,
    next_seq: u64,
}

/// Single-use table mapping selection ids to payloads.
///
/// `insert` and `take` run under one lock, so of two concurrent clicks on the
/// same id exactly one observes the payload.
#[derive(Debug)]
pub struct PendingTable {
    inner: Mutex<PendingInner>,
    capacity: usize,
}

impl PendingTable {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(PendingInner::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Store `payload` and return its freshly generated id.
    ///
    /// The id is `"{prefix}_{seq}"`; the sequence number keeps ids unique
    /// even when two events share a prefix. At capacity the oldest entry is
    /// dropped and will resolve as expired.
    pub async fn insert(&self, prefix: &str, payload: String) -> String {
        let mut inner = self.inner.lock().await;

        let id = format!("{}_{}", prefix, inner.next_seq);
        inner.next_seq += 1;

        while inner.entries.len() >= self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            inner.entries.remove(&oldest);
            debug!(msg_id = %oldest, "evicted oldest pending selection");
        }

        inner.entries.insert(id.clone(), payload);
        inner.order.push_back(id.clone());
        id
    }

    /// Remove and return the payload for `id`, if it is still pending.
    pub async fn take(&self, id: &str) -> Option<String> {
        let mut inner = self.inner.lock().await;
        let payload = inner.entries.remove(id)?;
        inner.order.retain(|pending| pending != id);
        Some(payload)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for PendingTable {
    fn default() -> Self {
        Self::new(DEFAULT_PENDING_CAPACITY)
    }
}
