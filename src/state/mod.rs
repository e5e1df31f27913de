//! Shared application state: the loaded collection, the installed document
//! store, the session machine, and the save-failure channel.

/// Domain model for pools and the persisted collection.
pub mod pool;
/// Session state machine (admin flag, selection, active tab).
pub mod session;

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::{
    config::AppConfig,
    dao::storage::DocumentStore,
    error::ServiceError,
    state::{
        pool::Collection,
        session::{Session, SessionEvent, Tab},
    },
};

/// Shared handle to [`AppState`].
pub type SharedState = Arc<AppState>;

/// Central state shared by every service operation.
///
/// The collection is the single source of truth; the remote document only
/// ever receives wholesale copies of it. Until [`AppState::bootstrap`]
/// succeeds the collection slot is empty and every mutation fails with
/// [`ServiceError::NotLoaded`].
pub struct AppState {
    store: RwLock<Option<Arc<dyn DocumentStore>>>,
    collection: RwLock<Option<Collection>>,
    session: RwLock<Session>,
    save_errors: watch::Sender<Option<String>>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new() -> SharedState {
        let (save_errors, _rx) = watch::channel(None);
        Arc::new(Self {
            store: RwLock::new(None),
            collection: RwLock::new(None),
            session: RwLock::new(Session::default()),
            save_errors,
        })
    }

    /// Install a document store, perform the initial load, and run the
    /// initial session transition.
    ///
    /// A load failure leaves the state unpopulated; the host shows an error
    /// view and may call this again with the same or another store.
    pub async fn bootstrap(&self, store: Arc<dyn DocumentStore>) -> Result<(), ServiceError> {
        let collection = store.load().await?;

        {
            let mut slot = self.store.write().await;
            *slot = Some(store);
        }
        {
            let mut slot = self.collection.write().await;
            *slot = Some(collection.clone());
        }

        let mut session = self.session.write().await;
        *session = session.apply(SessionEvent::CollectionLoaded, &collection.pools);
        Ok(())
    }

    /// Whether the initial load has completed.
    pub async fn is_loaded(&self) -> bool {
        self.collection.read().await.is_some()
    }

    /// Obtain a handle to the installed document store, if any.
    pub async fn store(&self) -> Option<Arc<dyn DocumentStore>> {
        self.store.read().await.as_ref().cloned()
    }

    /// Snapshot of the whole collection, if loaded.
    pub async fn collection(&self) -> Option<Collection> {
        self.collection.read().await.clone()
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        *self.session.read().await
    }

    /// Compare the candidate secret and enable admin mode on success.
    pub async fn enable_admin(&self, config: &AppConfig, candidate: &str) -> bool {
        if !config.verify_admin_secret(candidate) {
            return false;
        }
        self.apply_session_event(SessionEvent::AdminEnabled).await;
        true
    }

    /// Turn admin mode off, dropping a closed-pool selection if needed.
    pub async fn disable_admin(&self) {
        self.apply_session_event(SessionEvent::AdminDisabled).await;
    }

    /// Explicitly select a pool. Stale or non-visible targets are ignored.
    pub async fn select_pool(&self, id: uuid::Uuid) {
        self.apply_session_event(SessionEvent::PoolChosen(id)).await;
    }

    /// Switch the active tab. Ignored while the entry prompt is pending.
    pub async fn set_tab(&self, tab: Tab) {
        self.apply_session_event(SessionEvent::TabChanged(tab)).await;
    }

    /// Subscribe to save-failure notifications. The value is the most recent
    /// failure message; local state is never rolled back on save failure.
    pub fn save_error_watcher(&self) -> watch::Receiver<Option<String>> {
        self.save_errors.subscribe()
    }

    pub(crate) fn publish_save_error(&self, message: String) {
        let _ = self.save_errors.send(Some(message));
    }

    pub(crate) fn collection_cell(&self) -> &RwLock<Option<Collection>> {
        &self.collection
    }

    pub(crate) async fn apply_session_event(&self, event: SessionEvent) {
        let pools = self
            .collection
            .read()
            .await
            .as_ref()
            .map(|c| c.pools.clone())
            .unwrap_or_default();
        let mut session = self.session.write().await;
        *session = session.apply(event, &pools);
    }
}
