//! Doctor registration
//!
//! Four steps, each a possible failure point:
//!
//! 1. create the identity (role `doctor`)
//! 2. upload the three documents concurrently to `{identity}/{type}.{ext}`
//! 3. insert the profile as `pending`
//! 4. insert one `pending` credential per document
//!
//! Registration runs as a saga. With [`RegistrationPolicy::Compensating`]
//! a failure after step 1 undoes every completed step in reverse order.
//! [`RegistrationPolicy::BestEffort`] leaves completed steps in place, which
//! can orphan a doctor identity with no profile.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::models::{
    Credential, CredentialFile, CredentialType, DoctorProfile, RegistrationRequest, Role, SignUp,
    UserIdentity,
};
use crate::core::ports::{Stores, credential_path};

use super::parallel;
use super::validation::{DEFAULT_MIN_PASSWORD_LEN, ValidationError, validate_registration};

/// What happens to completed steps when a later step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Undo completed steps in reverse order
    #[default]
    Compensating,
    /// Leave completed steps in place
    BestEffort,
}

impl std::fmt::Display for RegistrationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compensating => write!(f, "compensating"),
            Self::BestEffort => write!(f, "best_effort"),
        }
    }
}

impl std::str::FromStr for RegistrationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "compensating" | "saga" => Ok(Self::Compensating),
            "best_effort" => Ok(Self::BestEffort),
            _ => Err(format!("Unknown registration policy: {s}. Use 'compensating' or 'best_effort'")),
        }
    }
}

/// Registration settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationOptions {
    /// Failure handling
    pub policy: RegistrationPolicy,
    /// Minimum password length
    pub min_password_len: usize,
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        Self {
            policy: RegistrationPolicy::default(),
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
        }
    }
}

/// Registration failures, one per step
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Rejected before any side effect
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// Identity creation failed
    #[error("Signup failed: {0}")]
    SignUp(anyhow::Error),

    /// A document upload failed
    #[error("Failed to upload {document}: {error}")]
    Upload {
        /// Document that failed
        document: CredentialType,
        /// Storage error
        error: anyhow::Error,
    },

    /// Profile insert failed
    #[error("Failed to create doctor profile: {0}")]
    Profile(anyhow::Error),

    /// A credential insert failed
    #[error("Failed to record {document} credential: {error}")]
    Credential {
        /// Document whose record failed
        document: CredentialType,
        /// Store error
        error: anyhow::Error,
    },
}

impl RegistrationError {
    /// Whether the submission was rejected before any side effect
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }
}

/// Everything a successful registration created
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    /// New doctor identity
    pub identity: UserIdentity,
    /// New pending profile
    pub profile: DoctorProfile,
    /// The three pending credentials
    pub credentials: Vec<Credential>,
}

/// A completed step and how to undo it
#[derive(Debug)]
enum Undo {
    Identity(String),
    File(String),
    Profile(String),
    Credential(String),
}

/// Completed steps, undone in reverse on failure
struct Saga<'a> {
    stores: &'a Stores,
    policy: RegistrationPolicy,
    done: Vec<Undo>,
}

impl<'a> Saga<'a> {
    const fn new(stores: &'a Stores, policy: RegistrationPolicy) -> Self {
        Self {
            stores,
            policy,
            done: Vec::new(),
        }
    }

    fn record(&mut self, step: Undo) {
        self.done.push(step);
    }

    fn fail(self, error: RegistrationError) -> RegistrationError {
        log::error!("Registration failed: {error}");
        match self.policy {
            RegistrationPolicy::Compensating => self.unwind(),
            RegistrationPolicy::BestEffort => {
                if let Some(Undo::Identity(id)) = self.done.first() {
                    log::warn!("Leaving identity {id} in place without a complete profile");
                }
            },
        }
        error
    }

    fn unwind(self) {
        for step in self.done.into_iter().rev() {
            let result = match &step {
                Undo::Credential(id) => self.stores.credentials.delete(id),
                Undo::Profile(id) => self.stores.profiles.delete(id),
                Undo::File(path) => self.stores.files.remove(path),
                Undo::Identity(id) => self.stores.auth.delete_identity(id),
            };
            match result {
                Ok(()) => log::debug!("Compensated {step:?}"),
                Err(e) => log::warn!("Could not compensate {step:?}: {e}"),
            }
        }
    }
}

/// A document stored in step 2
struct StoredUpload {
    document: CredentialType,
    url: String,
    file_name: String,
}

/// Register a doctor and leave the account pending review
pub fn register_doctor(
    stores: &Stores,
    options: &RegistrationOptions,
    request: &RegistrationRequest,
) -> Result<Registration, RegistrationError> {
    let files = validate_registration(request, options.min_password_len)?;
    let basic = &request.basic;

    // 1. Identity
    let identity = stores
        .auth
        .sign_up(&SignUp {
            email: basic.email.trim().to_string(),
            password: basic.password.clone(),
            full_name: basic.full_name.trim().to_string(),
            role: Role::Doctor,
            phone: basic.phone.clone(),
        })
        .map_err(RegistrationError::SignUp)?;
    log::info!("Created doctor identity {} ({})", identity.id, identity.email);

    let mut saga = Saga::new(stores, options.policy);
    saga.record(Undo::Identity(identity.id.clone()));

    // 2. Uploads
    let mut uploads = Vec::with_capacity(files.len());
    let mut upload_error = None;
    for (document, path, result) in upload_all(stores, &identity.id, &files) {
        match result {
            Ok(url) => {
                saga.record(Undo::File(path));
                let file_name = files
                    .iter()
                    .find(|(kind, _)| *kind == document)
                    .map(|(_, file)| file.name.clone())
                    .unwrap_or_default();
                uploads.push(StoredUpload {
                    document,
                    url,
                    file_name,
                });
            },
            Err(error) => {
                if upload_error.is_none() {
                    upload_error = Some(RegistrationError::Upload { document, error });
                }
            },
        }
    }
    if let Some(error) = upload_error {
        return Err(saga.fail(error));
    }

    // 3. Profile
    let profile = DoctorProfile::new_pending(
        identity.id.clone(),
        request.professional.clone(),
        request.clinic.clone(),
        basic.bio.clone(),
    );
    if let Err(e) = stores.profiles.insert(&profile) {
        return Err(saga.fail(RegistrationError::Profile(e)));
    }
    saga.record(Undo::Profile(profile.id.clone()));

    // 4. Credentials
    let mut credentials = Vec::with_capacity(uploads.len());
    for upload in uploads {
        let credential = Credential::new_pending(
            profile.id.clone(),
            upload.document.clone(),
            upload.url,
            upload.file_name,
        );
        if let Err(error) = stores.credentials.insert(&credential) {
            return Err(saga.fail(RegistrationError::Credential {
                document: upload.document,
                error,
            }));
        }
        saga.record(Undo::Credential(credential.id.clone()));
        credentials.push(credential);
    }

    log::info!("Doctor profile {} submitted for review", profile.id);
    Ok(Registration {
        identity,
        profile,
        credentials,
    })
}

/// Upload every document concurrently; results come back in input order
fn upload_all(
    stores: &Stores,
    identity_id: &str,
    files: &[(CredentialType, &CredentialFile); 3],
) -> Vec<(CredentialType, String, anyhow::Result<String>)> {
    let storage = &*stores.files;
    std::thread::scope(|scope| {
        let pending: Vec<_> = files
            .iter()
            .map(|(document, file)| {
                let path = credential_path(identity_id, document.as_str(), file.extension());
                let target = path.clone();
                let content = &file.content;
                let handle = scope.spawn(move || storage.upload(&target, content));
                (document.clone(), path, handle)
            })
            .collect();

        pending
            .into_iter()
            .map(|(document, path, handle)| {
                let result = parallel::join(handle, "upload");
                (document, path, result)
            })
            .collect()
    })
}
