use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    dao::storage::{DocumentStore, StorageError, StorageResult},
    state::pool::Collection,
};

#[derive(Debug, Error)]
#[error("simulated outage")]
struct Outage;

/// [`DocumentStore`] holding the document in process memory.
///
/// Used by the test suite and by hosts that want an offline or demo mode.
/// Saves can be made to fail on demand to exercise the optimistic-write path.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    document: Arc<Mutex<Collection>>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryDocumentStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing document.
    pub fn with_document(collection: Collection) -> Self {
        Self {
            document: Arc::new(Mutex::new(collection)),
            fail_saves: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Snapshot of the currently persisted document.
    pub async fn document(&self) -> Collection {
        self.document.lock().await.clone()
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn load(&self) -> BoxFuture<'static, StorageResult<Collection>> {
        let store = self.clone();
        Box::pin(async move { Ok(store.document.lock().await.clone()) })
    }

    fn save(&self, collection: Collection) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move {
            if store.fail_saves.load(Ordering::SeqCst) {
                return Err(StorageError::unavailable(
                    "memory store offline".into(),
                    Outage,
                ));
            }
            *store.document.lock().await = collection;
            Ok(())
        })
    }
}
