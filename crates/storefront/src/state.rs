//! Application state shared across the UI layer.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::session::SessionService;
use crate::storage::{FileStorage, Storage};

/// Application state shared across every screen.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the session service and the catalog client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    clock: Arc<dyn Clock>,
    storage: Arc<dyn Storage>,
    session: Arc<SessionService>,
    catalog: CatalogClient,
}

impl AppState {
    /// Create the production state: sessions persisted to the configured
    /// store file, real time.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
        Self::with_backends(config, storage, Arc::new(SystemClock))
    }

    /// Create state over explicit storage and clock backends.
    ///
    /// Tests use this with in-memory storage and a manual clock.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn with_backends(
        config: AppConfig,
        storage: Arc<dyn Storage>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let session = Arc::new(SessionService::new(Arc::clone(&storage), Arc::clone(&clock)));
        let catalog = CatalogClient::new(&config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                clock,
                storage,
                session,
                catalog,
            }),
        }
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a handle to the clock backing timed operations.
    #[must_use]
    pub fn clock(&self) -> Arc<dyn Clock> {
        Arc::clone(&self.inner.clock)
    }

    /// Get a handle to the key-value store backing session persistence.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.inner.storage)
    }

    /// Get a reference to the session service.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionService> {
        &self.inner.session
    }

    /// Get a reference to the product catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStorage;

    #[tokio::test]
    async fn test_state_shares_one_storage_between_handles() {
        let storage = Arc::new(MemoryStorage::new());
        let state = AppState::with_backends(
            AppConfig::default(),
            Arc::clone(&storage) as Arc<dyn Storage>,
            Arc::new(ManualClock::default()),
        );

        let cloned = state.clone();
        cloned.storage().set("greeting", "hello").await.unwrap();

        assert_eq!(
            state.storage().get("greeting").await.unwrap().as_deref(),
            Some("hello")
        );
        assert_eq!(storage.snapshot().await.len(), 1);
    }

    #[test]
    fn test_default_config_is_exposed() {
        let state = AppState::with_backends(
            AppConfig::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(ManualClock::default()),
        );
        assert_eq!(
            state.config().catalog_url.as_str(),
            "https://dummyjson.com/"
        );
    }
}
