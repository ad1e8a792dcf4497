//! Test data builders
//!
//! `RegistrationBuilder` produces a valid submission by default; tests
//! knock out the piece they care about.

use chrono::Duration;
use healthdesk::adapters;
use healthdesk::core::models::{
    BasicInfo, ClinicLocation, CredentialFile, CredentialFiles, ProfessionalInfo,
    RegistrationRequest, Role, Session, SignUp,
};
use healthdesk::core::ports::Stores;
use healthdesk::core::services::{
    Registration, RegistrationOptions, RegistrationPolicy, register_doctor,
};

/// Password used by every fixture account
pub const PASSWORD: &str = "secret123";

/// Fresh in-memory stores with a one-hour session lifetime
pub fn stores() -> Stores {
    adapters::in_memory_stores(Duration::hours(1))
}

/// Options for the given policy with the default password length
pub fn options(policy: RegistrationPolicy) -> RegistrationOptions {
    RegistrationOptions {
        policy,
        ..RegistrationOptions::default()
    }
}

/// Builder for doctor registration submissions
pub struct RegistrationBuilder {
    request: RegistrationRequest,
}

impl RegistrationBuilder {
    /// A valid Cardiologist submission for `email`
    pub fn new(email: &str) -> Self {
        Self {
            request: RegistrationRequest {
                basic: BasicInfo {
                    full_name: "Dr. Ada Heart".to_string(),
                    email: email.to_string(),
                    password: PASSWORD.to_string(),
                    phone: Some("+1 555 0100".to_string()),
                    bio: Some("Cardiologist".to_string()),
                },
                professional: ProfessionalInfo {
                    specializations: vec!["Cardiologist".to_string()],
                    experience_years: 5,
                    languages: vec!["English".to_string()],
                    consultation_fee: Some(80.0),
                    teleconsult_available: true,
                    working_hours: None,
                },
                clinic: ClinicLocation {
                    address: "1 Main Street".to_string(),
                    latitude: None,
                    longitude: None,
                },
                files: CredentialFiles {
                    government_id: Some(CredentialFile::new("passport.png", b"id".to_vec())),
                    degree: Some(CredentialFile::new("degree.pdf", b"degree".to_vec())),
                    medical_license: Some(CredentialFile::new("license.pdf", b"license".to_vec())),
                },
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.request.basic.full_name = name.to_string();
        self
    }

    pub fn password(mut self, password: &str) -> Self {
        self.request.basic.password = password.to_string();
        self
    }

    pub fn specializations(mut self, specializations: &[&str]) -> Self {
        self.request.professional.specializations =
            specializations.iter().map(ToString::to_string).collect();
        self
    }

    pub fn languages(mut self, languages: &[&str]) -> Self {
        self.request.professional.languages = languages.iter().map(ToString::to_string).collect();
        self
    }

    pub fn without_government_id(mut self) -> Self {
        self.request.files.government_id = None;
        self
    }

    pub fn without_degree(mut self) -> Self {
        self.request.files.degree = None;
        self
    }

    pub fn without_license(mut self) -> Self {
        self.request.files.medical_license = None;
        self
    }

    pub fn empty_license(mut self) -> Self {
        self.request.files.medical_license = Some(CredentialFile::new("license.pdf", Vec::new()));
        self
    }

    pub fn build(self) -> RegistrationRequest {
        self.request
    }
}

/// Register a doctor with default options
pub fn register(stores: &Stores, email: &str) -> Registration {
    register_doctor(stores, &RegistrationOptions::default(), &RegistrationBuilder::new(email).build())
        .expect("registration should succeed")
}

/// Sign in with the fixture password
pub fn sign_in(stores: &Stores, email: &str) -> Session {
    stores.auth.sign_in(email, PASSWORD).expect("sign in should succeed")
}

/// Create an identity with `role` and sign it in
pub fn account(stores: &Stores, email: &str, role: Role) -> Session {
    stores
        .auth
        .sign_up(&SignUp {
            email: email.to_string(),
            password: PASSWORD.to_string(),
            full_name: format!("User {email}"),
            role,
            phone: None,
        })
        .expect("sign up should succeed");
    sign_in(stores, email)
}
