//! Credential store port

use crate::core::models::Credential;

/// Persistence for credential metadata
pub trait CredentialStore: Send + Sync {
    /// Insert a credential
    fn insert(&self, credential: &Credential) -> anyhow::Result<()>;

    /// Get a credential by ID
    fn get(&self, id: &str) -> anyhow::Result<Option<Credential>>;

    /// All credentials of a doctor profile, in insertion order
    fn for_doctor(&self, doctor_id: &str) -> anyhow::Result<Vec<Credential>>;

    /// Overwrite an existing credential
    fn update(&self, credential: &Credential) -> anyhow::Result<()>;

    /// Remove a credential (registration compensation only)
    fn delete(&self, id: &str) -> anyhow::Result<()>;
}
