//! Doctor profile store port

use crate::core::models::{DoctorProfile, VerificationStatus};

/// Persistence for doctor profiles
///
/// Writes are last-write-wins; there is no conflict detection between a
/// doctor editing a profile and an administrator reviewing it.
pub trait DoctorProfileStore: Send + Sync {
    /// Insert a new profile
    ///
    /// Fails if the owning identity already has a profile.
    fn insert(&self, profile: &DoctorProfile) -> anyhow::Result<()>;

    /// Get a profile by ID
    fn get(&self, id: &str) -> anyhow::Result<Option<DoctorProfile>>;

    /// Get the single profile owned by an identity
    fn find_by_user(&self, user_id: &str) -> anyhow::Result<Option<DoctorProfile>>;

    /// Overwrite an existing profile
    fn update(&self, profile: &DoctorProfile) -> anyhow::Result<()>;

    /// Remove a profile (registration compensation only)
    fn delete(&self, id: &str) -> anyhow::Result<()>;

    /// List all profiles
    fn list(&self) -> anyhow::Result<Vec<DoctorProfile>>;

    /// List profiles in one status
    fn list_by_status(&self, status: VerificationStatus) -> anyhow::Result<Vec<DoctorProfile>> {
        Ok(self.list()?.into_iter().filter(|p| p.verified_status == status).collect())
    }
}
