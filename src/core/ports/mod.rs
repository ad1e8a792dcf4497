//! Port traits (interfaces) for external dependencies
//!
//! These traits define the boundaries between core business logic
//! and the managed store (identities, profiles, credentials, files,
//! health records).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. Tests swap in failing or recording implementations
//! to drive the error paths.

mod auth;
mod credential_store;
mod file_storage;
mod health_store;
mod profile_store;

use std::sync::Arc;

pub use auth::{AuthError, AuthProvider};
pub use credential_store::CredentialStore;
pub use file_storage::{FileStorage, credential_path};
pub use health_store::HealthRecordStore;
pub use profile_store::DoctorProfileStore;

/// Every port an operation may need, bundled for handing around
#[derive(Clone)]
pub struct Stores {
    /// Identity provider
    pub auth: Arc<dyn AuthProvider>,
    /// Doctor profiles
    pub profiles: Arc<dyn DoctorProfileStore>,
    /// Credential metadata
    pub credentials: Arc<dyn CredentialStore>,
    /// Credential documents
    pub files: Arc<dyn FileStorage>,
    /// Patient health records
    pub health: Arc<dyn HealthRecordStore>,
}

impl std::fmt::Debug for Stores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
