//! The user directory container a view binds to.

use crate::reducer::{DirectoryEnvironment, DirectoryReducer};
use crate::source::UserSource;
use crate::types::{DirectoryAction, DirectoryState, QueryKey, UserRecord};
use composable_ui_runtime::{Store, StoreError};
use std::sync::Arc;
use tokio::sync::watch;

/// Store type driving a user directory
pub type DirectoryStore = Store<DirectoryState, DirectoryAction, DirectoryEnvironment, DirectoryReducer>;

/// User directory container
///
/// Failures never reach the caller: they are held in [`UserDirectory::error`]
/// for the view to render. Dropping the container aborts the fetch in flight.
pub struct UserDirectory {
    store: DirectoryStore,
}

impl UserDirectory {
    /// Creates an idle directory reading from `source`
    #[must_use]
    pub fn new(source: Arc<dyn UserSource>) -> Self {
        Self {
            store: Store::new(
                DirectoryState::new(),
                DirectoryReducer::new(),
                DirectoryEnvironment::new(source),
            ),
        }
    }

    /// Fetch `key` and wait until it resolves, fails, or is superseded
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn fetch(&self, key: QueryKey) -> Result<(), StoreError> {
        let mut handle = self.store.send(DirectoryAction::Fetch { key }).await?;
        handle.wait().await;
        Ok(())
    }

    /// Start fetching `key` without waiting
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn start_fetch(&self, key: QueryKey) -> Result<(), StoreError> {
        self.store.send(DirectoryAction::Fetch { key }).await.map(drop)
    }

    /// Abandon the fetch in flight
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] once the container is torn down.
    pub async fn cancel(&self) -> Result<(), StoreError> {
        self.store.send(DirectoryAction::Cancel).await.map(drop)
    }

    /// Whether a fetch is in flight
    pub async fn is_loading(&self) -> bool {
        self.store.state(DirectoryState::is_loading).await
    }

    /// Resolved records (empty while loading)
    pub async fn users(&self) -> Vec<UserRecord> {
        self.store.state(|s| s.users.clone()).await
    }

    /// Message of the last failed fetch
    pub async fn error(&self) -> Option<String> {
        self.store.state(|s| s.error.clone()).await
    }

    /// Subscribe to state changes
    #[must_use]
    pub fn changes(&self) -> watch::Receiver<u64> {
        self.store.subscribe()
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &DirectoryStore {
        &self.store
    }
}

impl Drop for UserDirectory {
    fn drop(&mut self) {
        self.store.teardown();
    }
}
