//! Patient health records
//!
//! Every record is scoped by `user_id`, the owning identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Medication lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedicationStatus {
    /// Currently being taken
    #[default]
    Active,
    /// Course finished
    Completed,
    /// Stopped early
    Discontinued,
}

/// A prescribed or self-reported medication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Record ID
    pub id: String,
    /// Owning identity
    pub user_id: String,
    /// Medication name
    pub name: String,
    /// Dose, e.g. "500mg"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    /// Schedule, e.g. "twice daily"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: MedicationStatus,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Appointment lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    /// Booked, not yet held
    #[default]
    Scheduled,
    /// Held
    Completed,
    /// Called off
    Cancelled,
}

/// A booked consultation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Record ID
    pub id: String,
    /// Owning identity (the patient)
    pub user_id: String,
    /// Doctor reference; holds the doctor profile ID for in-app bookings
    pub doctor_name: String,
    /// When the appointment takes place
    pub appointment_date: DateTime<Utc>,
    /// Specialty of the consultation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    /// Where it takes place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: AppointmentStatus,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A known allergy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allergy {
    /// Record ID
    pub id: String,
    /// Owning identity
    pub user_id: String,
    /// Substance
    pub allergen: String,
    /// Observed reaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reaction: Option<String>,
    /// Severity label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// A single vital or lab measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthMetric {
    /// Record ID
    pub id: String,
    /// Owning identity
    pub user_id: String,
    /// Metric kind, e.g. `heart_rate`
    pub metric_type: String,
    /// Measured value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Unit, e.g. `bpm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
}

/// The four collections returned by the summary endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    /// Active medications
    pub medications: Vec<Medication>,
    /// Appointments from now on
    pub appointments: Vec<Appointment>,
    /// All allergies
    pub allergies: Vec<Allergy>,
    /// Most recent metrics, newest first
    pub health_metrics: Vec<HealthMetric>,
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Medication {
    /// Create an active medication record
    #[must_use]
    pub fn new(user_id: &str, name: &str, dosage: Option<&str>, frequency: Option<&str>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            dosage: dosage.map(String::from),
            frequency: frequency.map(String::from),
            status: MedicationStatus::Active,
            created_at: Utc::now(),
        }
    }
}

impl Appointment {
    /// Create a scheduled appointment
    #[must_use]
    pub fn new(user_id: &str, doctor_name: &str, appointment_date: DateTime<Utc>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            doctor_name: doctor_name.to_string(),
            appointment_date,
            specialty: None,
            location: None,
            status: AppointmentStatus::Scheduled,
            notes: None,
        }
    }
}

impl Allergy {
    /// Create an allergy record
    #[must_use]
    pub fn new(user_id: &str, allergen: &str, severity: Option<&str>) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            allergen: allergen.to_string(),
            reaction: None,
            severity: severity.map(String::from),
        }
    }
}

impl HealthMetric {
    /// Create a measurement record
    #[must_use]
    pub fn new(
        user_id: &str,
        metric_type: &str,
        value: f64,
        unit: &str,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: new_id(),
            user_id: user_id.to_string(),
            metric_type: metric_type.to_string(),
            value: Some(value),
            unit: Some(unit.to_string()),
            recorded_at,
        }
    }
}
