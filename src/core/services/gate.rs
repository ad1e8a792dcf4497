//! Doctor dashboard gate
//!
//! The gate re-reads the profile on every load, so a deep link to the
//! dashboard cannot bypass verification.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::core::models::{AppointmentStatus, DoctorProfile, Session};
use crate::core::ports::Stores;

use super::workflow::{StatusRoute, route_for};

/// Headline numbers on the doctor dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    /// Appointments booked for today
    pub today_appointments: usize,
    /// Distinct patients across all appointments
    pub total_patients: usize,
    /// Today's appointments still scheduled
    pub pending_actions: usize,
    /// Completed consultations
    pub total_consultations: usize,
}

/// Outcome of loading the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GateDecision {
    /// Verified: dashboard content may be shown
    Render {
        /// The verified profile
        profile: Box<DoctorProfile>,
        /// Dashboard numbers
        stats: DashboardStats,
    },
    /// Not verified: send the doctor elsewhere
    Redirect {
        /// Where to go instead
        route: StatusRoute,
    },
}

impl GateDecision {
    /// Whether dashboard content is rendered
    #[must_use]
    pub const fn renders(&self) -> bool {
        matches!(self, Self::Render { .. })
    }
}

/// Route that unverified doctors are redirected to
///
/// Registered doctors always land on the status screen; doctors without
/// a profile are sent to registration.
fn redirect_for(profile: Option<&DoctorProfile>) -> StatusRoute {
    match route_for(profile) {
        StatusRoute::Register => StatusRoute::Register,
        _ => StatusRoute::StatusScreen,
    }
}

/// Load the dashboard for the caller
pub fn dashboard_gate(stores: &Stores, session: &Session) -> anyhow::Result<GateDecision> {
    dashboard_gate_at(stores, session, Utc::now())
}

/// Load the dashboard as of `now`
pub fn dashboard_gate_at(
    stores: &Stores,
    session: &Session,
    now: DateTime<Utc>,
) -> anyhow::Result<GateDecision> {
    let profile = stores.profiles.find_by_user(session.user_id())?;

    let profile = match profile {
        Some(p) if p.is_verified() => p,
        other => {
            let route = redirect_for(other.as_ref());
            log::debug!("Dashboard gate redirecting {} to {}", session.user_id(), route.path());
            return Ok(GateDecision::Redirect { route });
        },
    };

    let stats = dashboard_stats(stores, &profile, now)?;
    Ok(GateDecision::Render {
        profile: Box::new(profile),
        stats,
    })
}

fn dashboard_stats(
    stores: &Stores,
    profile: &DoctorProfile,
    now: DateTime<Utc>,
) -> anyhow::Result<DashboardStats> {
    let appointments = stores.health.doctor_appointments(&profile.id)?;

    let day_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(now, |midnight| midnight.and_utc());
    let day_end = day_start + Duration::days(1);

    let today: Vec<_> = appointments
        .iter()
        .filter(|a| a.appointment_date >= day_start && a.appointment_date < day_end)
        .collect();

    let completed = appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .count();

    let patients: HashSet<&str> = appointments.iter().map(|a| a.user_id.as_str()).collect();

    Ok(DashboardStats {
        today_appointments: today.len(),
        total_patients: patients.len(),
        pending_actions: today
            .iter()
            .filter(|a| a.status == AppointmentStatus::Scheduled)
            .count(),
        total_consultations: if completed > 0 {
            completed
        } else {
            profile.total_consultations as usize
        },
    })
}
