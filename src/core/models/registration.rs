//! Doctor registration input

use serde::{Deserialize, Serialize};

use super::{ClinicLocation, CredentialType, ProfessionalInfo};

/// Identity fields of a registration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicInfo {
    /// Full name
    pub full_name: String,
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
    /// Short biography
    #[serde(default)]
    pub bio: Option<String>,
}

/// A document selected for upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialFile {
    /// Original file name, e.g. `license.pdf`
    pub name: String,
    /// Raw file bytes
    pub content: Vec<u8>,
}

impl CredentialFile {
    /// Create a file from a name and contents
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Extension after the last dot, or `bin` when there is none
    ///
    /// Only ASCII alphanumeric extensions are kept, so the storage path is
    /// always `{identity}/{type}.{extension}`.
    #[must_use]
    pub fn extension(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, ext))
                if !stem.is_empty()
                    && !ext.is_empty()
                    && ext.bytes().all(|b| b.is_ascii_alphanumeric()) =>
            {
                ext
            },
            _ => "bin",
        }
    }
}

/// The three required documents; any may be missing on a bad submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialFiles {
    /// Government-issued identity document
    #[serde(default)]
    pub government_id: Option<CredentialFile>,
    /// Medical degree certificate
    #[serde(default)]
    pub degree: Option<CredentialFile>,
    /// License to practice
    #[serde(default)]
    pub medical_license: Option<CredentialFile>,
}

impl CredentialFiles {
    /// Pair every required type with its file, in upload order
    #[must_use]
    pub fn by_type(&self) -> [(CredentialType, Option<&CredentialFile>); 3] {
        [
            (CredentialType::GovernmentId, self.government_id.as_ref()),
            (CredentialType::Degree, self.degree.as_ref()),
            (CredentialType::MedicalLicense, self.medical_license.as_ref()),
        ]
    }
}

/// A complete doctor registration submission
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationRequest {
    /// Identity fields
    pub basic: BasicInfo,
    /// Professional fields
    #[serde(default)]
    pub professional: ProfessionalInfo,
    /// Clinic location
    #[serde(default)]
    pub clinic: ClinicLocation,
    /// Required documents
    #[serde(default)]
    pub files: CredentialFiles,
}
