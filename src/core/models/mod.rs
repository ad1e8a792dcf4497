//! Domain models for healthdesk
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`DoctorProfile`] - A doctor's professional record and review status
//! - [`Credential`] - One uploaded proof document
//! - [`VerificationStatus`] - Shared review vocabulary
//! - [`Session`] - Explicit authenticated context
//! - [`HealthSummary`] - Patient records returned by the summary endpoint

mod credential;
mod doctor;
mod health;
mod identity;
mod registration;
mod session;
mod status;

pub use credential::{Credential, CredentialType};
pub use doctor::{ClinicLocation, DoctorProfile, ProfessionalInfo};
pub use health::{
    Allergy, Appointment, AppointmentStatus, HealthMetric, HealthSummary, Medication,
    MedicationStatus,
};
pub use identity::{Role, SignUp, UserIdentity};
pub use registration::{BasicInfo, CredentialFile, CredentialFiles, RegistrationRequest};
pub use session::Session;
pub use status::VerificationStatus;
