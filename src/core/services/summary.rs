//! Health summary aggregation
//!
//! Four owner-scoped reads issued concurrently; the summary fails if any
//! read fails.

use chrono::{DateTime, Utc};

use crate::core::models::{HealthSummary, MedicationStatus};
use crate::core::ports::HealthRecordStore;

use super::parallel;

/// The only action the summary endpoint understands
pub const GET_SUMMARY: &str = "get_summary";

/// Default number of metrics returned
pub const DEFAULT_METRIC_LIMIT: usize = 4;

/// Build the caller's summary
///
/// - medications: active only
/// - appointments: dated `now` or later, soonest first
/// - allergies: all
/// - metrics: the `metric_limit` most recent, newest first
pub fn get_summary(
    health: &dyn HealthRecordStore,
    user_id: &str,
    now: DateTime<Utc>,
    metric_limit: usize,
) -> anyhow::Result<HealthSummary> {
    std::thread::scope(|scope| -> anyhow::Result<HealthSummary> {
        let medications = scope.spawn(|| -> anyhow::Result<_> {
            let mut meds = health.medications(user_id)?;
            meds.retain(|m| m.status == MedicationStatus::Active);
            Ok(meds)
        });
        let appointments = scope.spawn(|| -> anyhow::Result<_> {
            let mut upcoming = health.appointments(user_id)?;
            upcoming.retain(|a| a.appointment_date >= now);
            upcoming.sort_by_key(|a| a.appointment_date);
            Ok(upcoming)
        });
        let allergies = scope.spawn(|| health.allergies(user_id));
        let metrics = scope.spawn(|| -> anyhow::Result<_> {
            let mut recent = health.metrics(user_id)?;
            recent.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
            recent.truncate(metric_limit);
            Ok(recent)
        });

        Ok(HealthSummary {
            medications: parallel::join(medications, "medications query")?,
            appointments: parallel::join(appointments, "appointments query")?,
            allergies: parallel::join(allergies, "allergies query")?,
            health_metrics: parallel::join(metrics, "health metrics query")?,
        })
    })
}
