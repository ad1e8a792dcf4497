//! Doctor profile model
//!
//! A profile is created once at registration and afterwards only changes
//! status (administrators) or profile fields (the owning doctor). Profiles
//! are never deleted except when a failed registration is compensated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VerificationStatus;

/// Clinic address with optional coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicLocation {
    /// Street address
    #[serde(default)]
    pub address: String,
    /// Latitude in decimal degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// A doctor's professional record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorProfile {
    /// Profile ID
    pub id: String,
    /// Owning identity
    pub user_id: String,
    /// Specialization tags
    pub specializations: Vec<String>,
    /// Years in practice
    pub experience_years: u32,
    /// Spoken languages
    pub languages: Vec<String>,
    /// Fee per consultation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
    /// Whether remote consultations are offered
    #[serde(default)]
    pub teleconsult_available: bool,
    /// Clinic location
    #[serde(default)]
    pub clinic: ClinicLocation,
    /// Free-form working hours structure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<serde_json::Value>,
    /// Short biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Profile-level review status (set independently of credentials)
    pub verified_status: VerificationStatus,
    /// Administrator notes shown to the doctor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verifier_notes: Option<String>,
    /// Administrator who last reviewed the profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    /// Completed consultations counter
    #[serde(default)]
    pub total_consultations: u32,
    /// When the profile was created
    pub created_at: DateTime<Utc>,
    /// When the profile was last changed
    pub updated_at: DateTime<Utc>,
    /// When the profile was last reviewed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

/// Profile fields supplied by the registrant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalInfo {
    /// Specialization tags (at least one)
    #[serde(default)]
    pub specializations: Vec<String>,
    /// Years in practice
    #[serde(default)]
    pub experience_years: u32,
    /// Spoken languages (at least one)
    #[serde(default)]
    pub languages: Vec<String>,
    /// Fee per consultation
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    /// Whether remote consultations are offered
    #[serde(default)]
    pub teleconsult_available: bool,
    /// Free-form working hours structure
    #[serde(default)]
    pub working_hours: Option<serde_json::Value>,
}

impl DoctorProfile {
    /// Build a new pending profile for an identity
    #[must_use]
    pub fn new_pending(
        user_id: String,
        professional: ProfessionalInfo,
        clinic: ClinicLocation,
        bio: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            specializations: professional.specializations,
            experience_years: professional.experience_years,
            languages: professional.languages,
            consultation_fee: professional.consultation_fee,
            teleconsult_available: professional.teleconsult_available,
            clinic,
            working_hours: professional.working_hours,
            bio,
            verified_status: VerificationStatus::Pending,
            verifier_notes: None,
            verified_by: None,
            total_consultations: 0,
            created_at: now,
            updated_at: now,
            verified_at: None,
        }
    }

    /// Whether the doctor may reach operational screens
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.verified_status.is_verified()
    }

    /// Replace the registrant-owned fields, leaving review fields alone
    pub fn apply_update(
        &mut self,
        professional: ProfessionalInfo,
        clinic: ClinicLocation,
        bio: Option<String>,
    ) {
        self.specializations = professional.specializations;
        self.experience_years = professional.experience_years;
        self.languages = professional.languages;
        self.consultation_fee = professional.consultation_fee;
        self.teleconsult_available = professional.teleconsult_available;
        self.working_hours = professional.working_hours;
        self.clinic = clinic;
        self.bio = bio;
        self.updated_at = Utc::now();
    }
}
