//! Health record store port
//!
//! Plain owner-scoped collections. Filtering for the summary endpoint
//! happens in [`crate::core::services::summary`].
//!
//! Records are managed outside this service. No route or CLI command writes
//! them; the `add_*` methods are seeding hooks for whatever system owns the
//! records, and for tests.

use crate::core::models::{Allergy, Appointment, HealthMetric, Medication};

/// Persistence for patient health records
pub trait HealthRecordStore: Send + Sync {
    /// Insert a medication (seeding hook, see module docs)
    fn add_medication(&self, medication: &Medication) -> anyhow::Result<()>;

    /// Insert an appointment
    fn add_appointment(&self, appointment: &Appointment) -> anyhow::Result<()>;

    /// Insert an allergy
    fn add_allergy(&self, allergy: &Allergy) -> anyhow::Result<()>;

    /// Insert a health metric
    fn add_metric(&self, metric: &HealthMetric) -> anyhow::Result<()>;

    /// Medications owned by an identity
    fn medications(&self, user_id: &str) -> anyhow::Result<Vec<Medication>>;

    /// Appointments owned by an identity
    fn appointments(&self, user_id: &str) -> anyhow::Result<Vec<Appointment>>;

    /// Allergies owned by an identity
    fn allergies(&self, user_id: &str) -> anyhow::Result<Vec<Allergy>>;

    /// Metrics owned by an identity
    fn metrics(&self, user_id: &str) -> anyhow::Result<Vec<HealthMetric>>;

    /// Appointments booked with a doctor profile
    fn doctor_appointments(&self, doctor_ref: &str) -> anyhow::Result<Vec<Appointment>>;
}
