//! Submission validation
//!
//! Runs before any side effect. A failed check never touches a store.

use thiserror::Error;

use crate::core::models::{CredentialFile, CredentialType, ProfessionalInfo, RegistrationRequest};

/// Default minimum password length
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

/// A rejected submission
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// No specialization selected
    #[error("Please select at least one specialization")]
    NoSpecialization,

    /// No language selected
    #[error("Please select at least one language")]
    NoLanguage,

    /// One or more required documents missing or empty
    #[error("Please upload all required documents (missing: {})", .0.join(", "))]
    MissingDocuments(Vec<String>),

    /// Password shorter than the configured minimum
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

/// Check the registrant-owned profile fields
pub fn validate_professional(info: &ProfessionalInfo) -> Result<(), ValidationError> {
    if !info.specializations.iter().any(|s| !s.trim().is_empty()) {
        return Err(ValidationError::NoSpecialization);
    }
    if !info.languages.iter().any(|l| !l.trim().is_empty()) {
        return Err(ValidationError::NoLanguage);
    }
    Ok(())
}

/// Check a full registration and hand back the three documents in upload order
pub fn validate_registration(
    request: &RegistrationRequest,
    min_password_len: usize,
) -> Result<[(CredentialType, &CredentialFile); 3], ValidationError> {
    let basic = &request.basic;
    if basic.full_name.trim().is_empty() {
        return Err(ValidationError::MissingField("Full name"));
    }
    if basic.email.trim().is_empty() {
        return Err(ValidationError::MissingField("Email"));
    }
    if basic.password.chars().count() < min_password_len {
        return Err(ValidationError::PasswordTooShort(min_password_len));
    }

    validate_professional(&request.professional)?;

    let [gov, degree, license] = request.files.by_type();
    let missing: Vec<String> = [&gov, &degree, &license]
        .iter()
        .filter(|(_, file)| file.is_none_or(|f| f.content.is_empty()))
        .map(|(kind, _)| kind.to_string())
        .collect();

    match (gov, degree, license) {
        ((g, Some(gf)), (d, Some(df)), (l, Some(lf))) if missing.is_empty() => {
            Ok([(g, gf), (d, df), (l, lf)])
        },
        _ => Err(ValidationError::MissingDocuments(missing)),
    }
}
