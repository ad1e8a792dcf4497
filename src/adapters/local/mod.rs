//! Local store
//!
//! Implements the auth, profile, credential and health record ports over
//! one set of tables behind a `Mutex`. The tables either live only in
//! memory or are written to a JSON file after every change.
//!
//! ```text
//! {data_dir}/
//! ├── store.json        # identities, sessions, profiles, credentials, records
//! └── files/            # credential documents (see `DiskFileStorage`)
//! ```

mod password;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::{
    Allergy, Appointment, Credential, DoctorProfile, HealthMetric, Medication, Role, Session,
    SignUp, UserIdentity,
};
use crate::core::ports::{
    AuthError, AuthProvider, CredentialStore, DoctorProfileStore, HealthRecordStore,
};

/// Store file name inside the data directory
pub const STORE_FILE: &str = "store.json";

/// An identity with its password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Account {
    identity: UserIdentity,
    password_hash: String,
}

/// Every collection the store holds
#[derive(Debug, Default, Serialize, Deserialize)]
struct Tables {
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    sessions: Vec<Session>,
    #[serde(default)]
    doctor_profiles: Vec<DoctorProfile>,
    #[serde(default)]
    doctor_credentials: Vec<Credential>,
    #[serde(default)]
    medications: Vec<Medication>,
    #[serde(default)]
    appointments: Vec<Appointment>,
    #[serde(default)]
    allergies: Vec<Allergy>,
    #[serde(default)]
    health_metrics: Vec<HealthMetric>,
}

/// Store backed by in-memory tables, optionally persisted as JSON
#[derive(Debug)]
pub struct LocalStore {
    tables: Mutex<Tables>,
    path: Option<PathBuf>,
    session_ttl: Duration,
}

impl LocalStore {
    /// Create an empty store that is never written to disk
    #[must_use]
    pub fn in_memory(session_ttl: Duration) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            path: None,
            session_ttl,
        }
    }

    /// Open (or create) a store persisted at `{data_dir}/store.json`
    ///
    /// The file is the source of truth: every operation re-reads it under
    /// the lock, so other processes writing the same data dir (the CLI
    /// while `serve` runs) are seen and never overwritten.
    pub fn open(data_dir: &Path, session_ttl: Duration) -> anyhow::Result<Self> {
        let path = data_dir.join(STORE_FILE);
        let tables = load(&path)?;
        log::debug!("Opened local store at {}", path.display());
        Ok(Self {
            tables: Mutex::new(tables),
            path: Some(path),
            session_ttl,
        })
    }

    /// Path of the backing file, if persisted
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Lock the tables, refreshed from disk when persisted
    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Tables>> {
        let mut tables = self.tables.lock().map_err(|_| anyhow::anyhow!("Store lock poisoned"))?;
        if let Some(path) = &self.path {
            *tables = load(path)?;
        }
        Ok(tables)
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> anyhow::Result<T> {
        Ok(f(&*self.lock()?))
    }

    fn write<T>(&self, f: impl FnOnce(&mut Tables) -> anyhow::Result<T>) -> anyhow::Result<T> {
        let mut tables = self.lock()?;
        let value = f(&mut tables)?;
        self.persist(&tables)?;
        Ok(value)
    }

    fn persist(&self, tables: &Tables) -> anyhow::Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Readers only ever see a complete file
        let staging = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(tables)?;
        fs::write(&staging, content)?;
        fs::rename(&staging, path)?;
        Ok(())
    }
}

/// Read the tables at `path`, or empty tables when the file does not exist
fn load(path: &Path) -> anyhow::Result<Tables> {
    if !path.exists() {
        return Ok(Tables::default());
    }
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Corrupt store file {}: {e}", path.display()))
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

// =============================================================================
// AUTH
// =============================================================================

impl AuthProvider for LocalStore {
    fn sign_up(&self, signup: &SignUp) -> anyhow::Result<UserIdentity> {
        let password_hash = password::hash(&signup.password)?;
        self.write(|t| {
            if t.accounts.iter().any(|a| same_email(&a.identity.email, &signup.email)) {
                return Err(AuthError::EmailTaken(signup.email.clone()).into());
            }
            let identity = UserIdentity {
                id: uuid::Uuid::new_v4().to_string(),
                email: signup.email.trim().to_string(),
                full_name: signup.full_name.clone(),
                role: signup.role,
                phone: signup.phone.clone(),
                created_at: Utc::now(),
            };
            t.accounts.push(Account {
                identity: identity.clone(),
                password_hash,
            });
            Ok(identity)
        })
    }

    fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<Session> {
        let account = self
            .read(|t| t.accounts.iter().find(|a| same_email(&a.identity.email, email)).cloned())?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify(password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials.into());
        }

        let session = Session::issue(account.identity, self.session_ttl);
        self.write(|t| {
            let now = Utc::now();
            t.sessions.retain(|s| !s.is_expired_at(now));
            t.sessions.push(session.clone());
            Ok(())
        })?;
        Ok(session)
    }

    fn sign_out(&self, token: &str) -> anyhow::Result<()> {
        self.write(|t| {
            t.sessions.retain(|s| s.token != token);
            Ok(())
        })
    }

    fn session(&self, token: &str) -> anyhow::Result<Option<Session>> {
        self.read(|t| t.sessions.iter().find(|s| s.token == token && !s.is_expired()).cloned())
    }

    fn identity(&self, id: &str) -> anyhow::Result<Option<UserIdentity>> {
        self.read(|t| t.accounts.iter().find(|a| a.identity.id == id).map(|a| a.identity.clone()))
    }

    fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserIdentity>> {
        self.read(|t| {
            t.accounts
                .iter()
                .find(|a| same_email(&a.identity.email, email))
                .map(|a| a.identity.clone())
        })
    }

    fn delete_identity(&self, id: &str) -> anyhow::Result<()> {
        self.write(|t| {
            t.accounts.retain(|a| a.identity.id != id);
            t.sessions.retain(|s| s.identity.id != id);
            Ok(())
        })
    }

    fn list_identities(&self, role: Option<Role>) -> anyhow::Result<Vec<UserIdentity>> {
        self.read(|t| {
            t.accounts
                .iter()
                .filter(|a| role.is_none_or(|r| a.identity.role == r))
                .map(|a| a.identity.clone())
                .collect()
        })
    }
}

// =============================================================================
// DOCTOR PROFILES
// =============================================================================

impl DoctorProfileStore for LocalStore {
    fn insert(&self, profile: &DoctorProfile) -> anyhow::Result<()> {
        self.write(|t| {
            if t.doctor_profiles.iter().any(|p| p.user_id == profile.user_id) {
                anyhow::bail!("Identity {} already has a doctor profile", profile.user_id);
            }
            t.doctor_profiles.push(profile.clone());
            Ok(())
        })
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<DoctorProfile>> {
        self.read(|t| t.doctor_profiles.iter().find(|p| p.id == id).cloned())
    }

    fn find_by_user(&self, user_id: &str) -> anyhow::Result<Option<DoctorProfile>> {
        self.read(|t| t.doctor_profiles.iter().find(|p| p.user_id == user_id).cloned())
    }

    fn update(&self, profile: &DoctorProfile) -> anyhow::Result<()> {
        self.write(|t| {
            let slot = t
                .doctor_profiles
                .iter_mut()
                .find(|p| p.id == profile.id)
                .ok_or_else(|| anyhow::anyhow!("Doctor profile not found: {}", profile.id))?;
            *slot = profile.clone();
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.write(|t| {
            t.doctor_profiles.retain(|p| p.id != id);
            Ok(())
        })
    }

    fn list(&self) -> anyhow::Result<Vec<DoctorProfile>> {
        self.read(|t| t.doctor_profiles.clone())
    }
}

// =============================================================================
// CREDENTIALS
// =============================================================================

impl CredentialStore for LocalStore {
    fn insert(&self, credential: &Credential) -> anyhow::Result<()> {
        self.write(|t| {
            t.doctor_credentials.push(credential.clone());
            Ok(())
        })
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Credential>> {
        self.read(|t| t.doctor_credentials.iter().find(|c| c.id == id).cloned())
    }

    fn for_doctor(&self, doctor_id: &str) -> anyhow::Result<Vec<Credential>> {
        self.read(|t| {
            t.doctor_credentials.iter().filter(|c| c.doctor_id == doctor_id).cloned().collect()
        })
    }

    fn update(&self, credential: &Credential) -> anyhow::Result<()> {
        self.write(|t| {
            let slot = t
                .doctor_credentials
                .iter_mut()
                .find(|c| c.id == credential.id)
                .ok_or_else(|| anyhow::anyhow!("Credential not found: {}", credential.id))?;
            *slot = credential.clone();
            Ok(())
        })
    }

    fn delete(&self, id: &str) -> anyhow::Result<()> {
        self.write(|t| {
            t.doctor_credentials.retain(|c| c.id != id);
            Ok(())
        })
    }
}

// =============================================================================
// HEALTH RECORDS
// =============================================================================

impl HealthRecordStore for LocalStore {
    fn add_medication(&self, medication: &Medication) -> anyhow::Result<()> {
        self.write(|t| {
            t.medications.push(medication.clone());
            Ok(())
        })
    }

    fn add_appointment(&self, appointment: &Appointment) -> anyhow::Result<()> {
        self.write(|t| {
            t.appointments.push(appointment.clone());
            Ok(())
        })
    }

    fn add_allergy(&self, allergy: &Allergy) -> anyhow::Result<()> {
        self.write(|t| {
            t.allergies.push(allergy.clone());
            Ok(())
        })
    }

    fn add_metric(&self, metric: &HealthMetric) -> anyhow::Result<()> {
        self.write(|t| {
            t.health_metrics.push(metric.clone());
            Ok(())
        })
    }

    fn medications(&self, user_id: &str) -> anyhow::Result<Vec<Medication>> {
        self.read(|t| t.medications.iter().filter(|m| m.user_id == user_id).cloned().collect())
    }

    fn appointments(&self, user_id: &str) -> anyhow::Result<Vec<Appointment>> {
        self.read(|t| t.appointments.iter().filter(|a| a.user_id == user_id).cloned().collect())
    }

    fn allergies(&self, user_id: &str) -> anyhow::Result<Vec<Allergy>> {
        self.read(|t| t.allergies.iter().filter(|a| a.user_id == user_id).cloned().collect())
    }

    fn metrics(&self, user_id: &str) -> anyhow::Result<Vec<HealthMetric>> {
        self.read(|t| t.health_metrics.iter().filter(|m| m.user_id == user_id).cloned().collect())
    }

    fn doctor_appointments(&self, doctor_ref: &str) -> anyhow::Result<Vec<Appointment>> {
        self.read(|t| {
            t.appointments.iter().filter(|a| a.doctor_name == doctor_ref).cloned().collect()
        })
    }
}
