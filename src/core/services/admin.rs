//! Administrative review
//!
//! Profile and credential statuses are set independently. Reviewing
//! every credential does not touch the profile and vice versa.

use chrono::Utc;
use serde::Deserialize;

use crate::core::models::{Credential, DoctorProfile, VerificationStatus};
use crate::core::ports::Stores;

use super::workflow::{WorkflowError, WorkflowState};

/// A reviewer's decision
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewDecision {
    /// `verified` or `rejected`
    pub status: VerificationStatus,
    /// Notes shown to the doctor
    #[serde(default)]
    pub notes: Option<String>,
}

impl ReviewDecision {
    /// Approve without notes
    #[must_use]
    pub const fn verify() -> Self {
        Self {
            status: VerificationStatus::Verified,
            notes: None,
        }
    }

    /// Reject with notes
    #[must_use]
    pub fn reject(notes: impl Into<String>) -> Self {
        Self {
            status: VerificationStatus::Rejected,
            notes: Some(notes.into()),
        }
    }
}

/// Set a profile's status
pub fn review_profile(
    stores: &Stores,
    reviewer: &str,
    profile_id: &str,
    decision: &ReviewDecision,
) -> Result<DoctorProfile, WorkflowError> {
    let mut profile = stores
        .profiles
        .get(profile_id)?
        .ok_or_else(|| WorkflowError::NotFound(format!("Doctor profile '{profile_id}'")))?;

    let from = WorkflowState::from(profile.verified_status);
    let to = WorkflowState::from(decision.status);
    // Only resubmission returns a profile to pending
    if decision.status == VerificationStatus::Pending || !from.can_transition(to) {
        return Err(WorkflowError::InvalidTransition { from, to });
    }

    let now = Utc::now();
    profile.verified_status = decision.status;
    profile.verifier_notes.clone_from(&decision.notes);
    profile.verified_by = Some(reviewer.to_string());
    profile.verified_at = Some(now);
    profile.updated_at = now;
    stores.profiles.update(&profile)?;

    log::info!("Profile {profile_id} marked {} by {reviewer}", decision.status);
    Ok(profile)
}

/// Set one credential's status
pub fn review_credential(
    stores: &Stores,
    reviewer: &str,
    credential_id: &str,
    decision: &ReviewDecision,
) -> Result<Credential, WorkflowError> {
    let mut credential = stores
        .credentials
        .get(credential_id)?
        .ok_or_else(|| WorkflowError::NotFound(format!("Credential '{credential_id}'")))?;

    if decision.status == VerificationStatus::Pending {
        return Err(WorkflowError::InvalidTransition {
            from: credential.verification_status.into(),
            to: WorkflowState::Pending,
        });
    }

    credential.verification_status = decision.status;
    credential.verification_notes.clone_from(&decision.notes);
    credential.verified_at = Some(Utc::now());
    stores.credentials.update(&credential)?;

    log::info!("Credential {credential_id} marked {} by {reviewer}", decision.status);
    Ok(credential)
}
