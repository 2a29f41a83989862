//! Application state shared across handlers

use std::sync::Arc;

use auth::SessionStore;
use catalog::{ApiKeyStore, BrowseFlow, CatalogClient, CatalogConfig, FavoritesStore};
use common::LocalStorage;
use tokio::task::JoinHandle;
use tracing::error;

/// Application state shared across handlers
///
/// Built once at startup. The session store starts unresolved; call
/// [`SessionStore::restore`] to load the persisted session.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionStore>,
    pub favorites: Arc<FavoritesStore>,
    pub browse: Arc<BrowseFlow<CatalogClient>>,
    pub api_keys: ApiKeyStore,
}

impl AppState {
    pub fn new(storage: LocalStorage, catalog_config: CatalogConfig) -> Self {
        let api_keys = ApiKeyStore::new(storage.clone());
        let client = CatalogClient::new(catalog_config, api_keys.clone());

        Self {
            sessions: Arc::new(SessionStore::new(storage.clone())),
            favorites: Arc::new(FavoritesStore::new(storage)),
            browse: Arc::new(BrowseFlow::new(client)),
            api_keys,
        }
    }

    /// Restore the persisted session off the async runtime
    ///
    /// A failed restore is logged; the gate keeps answering with the
    /// loading placeholder in that case.
    pub fn restore_session(&self) -> JoinHandle<()> {
        let sessions = self.sessions.clone();
        let restore = tokio::task::spawn_blocking(move || {
            sessions.restore();
        });
        tokio::spawn(async move {
            if let Err(e) = restore.await {
                error!("Session restore failed: {}", e);
            }
        })
    }

    pub fn catalog(&self) -> &CatalogClient {
        self.browse.source()
    }

    pub fn catalog_config(&self) -> &CatalogConfig {
        self.catalog().config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{Credentials, SessionStatus};

    #[tokio::test]
    async fn test_restore_session_resolves_status() {
        let storage = LocalStorage::in_memory();
        let first = AppState::new(storage.clone(), CatalogConfig::default());
        first.sessions.restore();
        first
            .sessions
            .sign_up(Credentials::new("a@x.com", "pw1"))
            .unwrap();

        let state = AppState::new(storage, CatalogConfig::default());
        assert_eq!(state.sessions.status(), SessionStatus::Loading);

        state.restore_session().await.unwrap();
        assert_eq!(
            state.sessions.current_user().map(|s| s.email),
            Some("a@x.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_restore_session_without_stored_session() {
        let state = AppState::new(LocalStorage::in_memory(), CatalogConfig::default());
        state.restore_session().await.unwrap();
        assert_eq!(state.sessions.status(), SessionStatus::SignedOut);
    }
}
