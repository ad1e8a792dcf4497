//! Doctor verification workflow
//!
//! ```text
//! Unregistered --register--> Pending --review--> Verified
//!                               ^      \-review--> Rejected
//!                               \------resubmit-----/
//! ```
//!
//! Registration lives in [`super::registration`], reviews in
//! [`super::admin`]. This module owns the state vocabulary, the
//! transition table, the status read contract and the screen routing
//! that consumes it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{
    ClinicLocation, Credential, DoctorProfile, ProfessionalInfo, Session, VerificationStatus,
};
use crate::core::ports::Stores;

use super::validation::{ValidationError, validate_professional};

/// Client path of the login screen
pub const LOGIN_PATH: &str = "/login";

/// Position of a doctor account in the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// No profile exists for the identity
    Unregistered,
    /// Submitted, awaiting review
    Pending,
    /// Approved for practice
    Verified,
    /// Refused; may resubmit
    Rejected,
}

impl WorkflowState {
    /// State of an identity given its (possibly absent) profile
    #[must_use]
    pub fn of(profile: Option<&DoctorProfile>) -> Self {
        profile.map_or(Self::Unregistered, |p| p.verified_status.into())
    }

    /// Whether the workflow permits moving from `self` to `to`
    ///
    /// Administrators may re-review a decided profile; the last decision wins.
    #[must_use]
    pub const fn can_transition(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Unregistered | Self::Rejected, Self::Pending)
                | (Self::Pending | Self::Verified | Self::Rejected, Self::Verified | Self::Rejected)
        )
    }
}

impl From<VerificationStatus> for WorkflowState {
    fn from(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Pending => Self::Pending,
            VerificationStatus::Verified => Self::Verified,
            VerificationStatus::Rejected => Self::Rejected,
        }
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unregistered => write!(f, "unregistered"),
            Self::Pending => write!(f, "pending"),
            Self::Verified => write!(f, "verified"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Workflow failures
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The identity has no doctor profile (registration incomplete)
    #[error("No doctor profile found. Please complete your registration.")]
    NoProfile,

    /// Profile or credential ID does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The requested move is not in the transition table
    #[error("Cannot move a {from} profile to {to}")]
    InvalidTransition {
        /// Current state
        from: WorkflowState,
        /// Requested state
        to: WorkflowState,
    },

    /// Resubmitted profile fields are invalid
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Underlying store failed
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Screen a doctor is sent to for a given workflow state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum StatusRoute {
    /// No profile: complete registration
    Register,
    /// Pending: show the status screen
    StatusScreen,
    /// Verified: the doctor dashboard is unlocked
    Dashboard,
    /// Rejected: edit and resubmit, showing the reviewer's notes
    Resubmit {
        /// Notes left by the reviewer
        notes: Option<String>,
    },
}

impl StatusRoute {
    /// Client navigation path for the route
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Register | Self::Resubmit { .. } => "/doctor/register",
            Self::StatusScreen => "/doctor/verification-status",
            Self::Dashboard => "/doctor/dashboard",
        }
    }
}

/// Route a doctor according to their profile
#[must_use]
pub fn route_for(profile: Option<&DoctorProfile>) -> StatusRoute {
    match profile {
        None => StatusRoute::Register,
        Some(p) => match p.verified_status {
            VerificationStatus::Pending => StatusRoute::StatusScreen,
            VerificationStatus::Verified => StatusRoute::Dashboard,
            VerificationStatus::Rejected => StatusRoute::Resubmit {
                notes: p.verifier_notes.clone(),
            },
        },
    }
}

/// Profile and credentials as shown on the status screen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationView {
    /// The identity's single profile
    pub profile: DoctorProfile,
    /// Its credentials (0 or 3 by construction)
    pub credentials: Vec<Credential>,
}

impl VerificationView {
    /// Current workflow state
    #[must_use]
    pub fn state(&self) -> WorkflowState {
        self.profile.verified_status.into()
    }

    /// Screen the doctor should be routed to
    #[must_use]
    pub fn route(&self) -> StatusRoute {
        route_for(Some(&self.profile))
    }

    /// Reviewer notes on the profile
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.profile.verifier_notes.as_deref()
    }

    /// Whether credential statuses disagree with the profile status
    ///
    /// Profile status is set independently of credential statuses, so a
    /// doctor can have every document verified while the profile is still
    /// pending (or the reverse). Surfaced for reviewers, never reconciled.
    #[must_use]
    pub fn statuses_diverge(&self) -> bool {
        let profile_status = self.profile.verified_status;
        !self.credentials.is_empty()
            && self.credentials.iter().all(|c| c.verification_status.is_reviewed())
            && self.credentials.iter().any(|c| c.verification_status != profile_status)
    }
}

/// Read the caller's profile and credentials
///
/// Fails with [`WorkflowError::NoProfile`] when registration never
/// reached the profile insert.
pub fn get_verification_status(
    stores: &Stores,
    session: &Session,
) -> Result<VerificationView, WorkflowError> {
    let profile =
        stores.profiles.find_by_user(session.user_id())?.ok_or(WorkflowError::NoProfile)?;
    let credentials = stores.credentials.for_doctor(&profile.id)?;
    log::debug!(
        "Verification status for {}: {} ({} credentials)",
        session.user_id(),
        profile.verified_status,
        credentials.len()
    );
    Ok(VerificationView {
        profile,
        credentials,
    })
}

/// Route for the caller without failing on a missing profile
pub fn current_route(stores: &Stores, session: &Session) -> anyhow::Result<StatusRoute> {
    let profile = stores.profiles.find_by_user(session.user_id())?;
    Ok(route_for(profile.as_ref()))
}

/// Profile fields a rejected doctor may change when resubmitting
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    /// Replacement professional fields
    pub professional: ProfessionalInfo,
    /// Replacement clinic location
    #[serde(default)]
    pub clinic: ClinicLocation,
    /// Replacement biography
    #[serde(default)]
    pub bio: Option<String>,
}

/// Move a rejected profile back to pending, optionally editing it first
///
/// The reviewer's notes are kept until the next review replaces them.
/// Credential statuses are left as they are.
pub fn resubmit(
    stores: &Stores,
    session: &Session,
    update: Option<ProfileUpdate>,
) -> Result<DoctorProfile, WorkflowError> {
    let mut profile =
        stores.profiles.find_by_user(session.user_id())?.ok_or(WorkflowError::NoProfile)?;

    let from = WorkflowState::from(profile.verified_status);
    // Pending -> Pending is not a transition; only rejected profiles resubmit
    if from != WorkflowState::Rejected {
        return Err(WorkflowError::InvalidTransition {
            from,
            to: WorkflowState::Pending,
        });
    }

    if let Some(update) = update {
        validate_professional(&update.professional)?;
        profile.apply_update(update.professional, update.clinic, update.bio);
    }

    profile.verified_status = VerificationStatus::Pending;
    profile.updated_at = Utc::now();
    stores.profiles.update(&profile)?;

    log::info!("Profile {} resubmitted for review", profile.id);
    Ok(profile)
}
