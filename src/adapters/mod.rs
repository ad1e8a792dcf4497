//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `local/` - Identities, sessions, profiles, credentials and health
//!   records in one JSON-backed store
//! - `file/` - Credential document storage (memory or disk)

pub mod file;
pub mod local;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::ports::{FileStorage, Stores};

pub use file::{DiskFileStorage, MemoryFileStorage};
pub use local::LocalStore;

/// Bundle one store for every port
#[must_use]
pub fn stores_from(store: Arc<LocalStore>, files: Arc<dyn FileStorage>) -> Stores {
    Stores {
        auth: store.clone(),
        profiles: store.clone(),
        credentials: store.clone(),
        health: store,
        files,
    }
}

/// Volatile stores, for tests and throwaway servers
#[must_use]
pub fn in_memory_stores(session_ttl: chrono::Duration) -> Stores {
    stores_from(
        Arc::new(LocalStore::in_memory(session_ttl)),
        Arc::new(MemoryFileStorage::new()),
    )
}

/// Stores as configured: in memory, or persisted under the data dir
pub fn open_stores(config: &AppConfig) -> anyhow::Result<Stores> {
    let ttl = config.auth.session_ttl();
    if config.storage.in_memory {
        log::info!("Using in-memory storage");
        return Ok(in_memory_stores(ttl));
    }

    let data_dir = config.storage.data_dir();
    let store = LocalStore::open(&data_dir, ttl)?;
    let files = DiskFileStorage::new(crate::paths::files_dir(&data_dir));
    log::info!("Using data dir {}", data_dir.display());
    Ok(stores_from(Arc::new(store), Arc::new(files)))
}
