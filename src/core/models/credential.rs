//! Credential model
//!
//! One uploaded proof document tied to a doctor profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::VerificationStatus;

/// Kind of proof document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CredentialType {
    /// Government-issued identity document
    GovernmentId,
    /// Medical degree certificate
    Degree,
    /// License to practice
    MedicalLicense,
    /// Any other document type
    Other(String),
}

impl CredentialType {
    /// Wire name (also the storage file stem)
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::GovernmentId => "government_id",
            Self::Degree => "degree",
            Self::MedicalLicense => "medical_license",
            Self::Other(name) => name,
        }
    }

    /// Title-cased label, e.g. "Medical License"
    #[must_use]
    pub fn label(&self) -> String {
        self.as_str()
            .split('_')
            .filter(|w| !w.is_empty())
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<String> for CredentialType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "government_id" => Self::GovernmentId,
            "degree" => Self::Degree,
            "medical_license" => Self::MedicalLicense,
            _ => Self::Other(s),
        }
    }
}

impl From<CredentialType> for String {
    fn from(t: CredentialType) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for CredentialType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uploaded document metadata and its review state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Credential ID
    pub id: String,
    /// Owning doctor profile ID
    pub doctor_id: String,
    /// Document kind
    pub credential_type: CredentialType,
    /// Storage path of the uploaded file
    pub file_url: String,
    /// Original file name
    pub file_name: String,
    /// Per-document review status
    pub verification_status: VerificationStatus,
    /// Administrator notes on this document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<String>,
    /// When the file was uploaded
    pub uploaded_at: DateTime<Utc>,
    /// When the document was last reviewed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Credential {
    /// Build a pending credential for a stored upload
    #[must_use]
    pub fn new_pending(
        doctor_id: String,
        credential_type: CredentialType,
        file_url: String,
        file_name: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            doctor_id,
            credential_type,
            file_url,
            file_name,
            verification_status: VerificationStatus::Pending,
            verification_notes: None,
            uploaded_at: Utc::now(),
            verified_at: None,
        }
    }
}
