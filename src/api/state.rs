//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Holds the loaded configuration and the attendance store that imports
/// write to and reports read from.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The attendance store.
    store: Arc<RwLock<InMemoryStore>>,
}

impl AppState {
    /// Creates a new application state with an empty store seeded from `config`.
    pub fn new(config: ConfigLoader) -> Self {
        let store = InMemoryStore::from_config(&config);
        Self::with_store(config, store)
    }

    /// Creates a new application state around an existing store.
    pub fn with_store(config: ConfigLoader, store: InMemoryStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared attendance store.
    pub fn store(&self) -> &RwLock<InMemoryStore> {
        &self.store
    }
}
