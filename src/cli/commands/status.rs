//! Show a doctor's verification status

use healthdesk::adapters;
use healthdesk::config::AppConfig;
use healthdesk::core::services::{VerificationView, WorkflowState, route_for};
use healthdesk::output::{OutputMode, StatusReport};

/// Print the verification status of the doctor registered as `email`
pub fn status(config: &AppConfig, email: &str, mode: OutputMode) -> anyhow::Result<()> {
    let stores = adapters::open_stores(config)?;
    let (identity, profile) = super::lookup(&stores, email)?;

    let report = match profile {
        Some(profile) => {
            let credentials = stores.credentials.for_doctor(&profile.id)?;
            let view = VerificationView {
                profile,
                credentials,
            };
            StatusReport {
                email: identity.email,
                full_name: identity.full_name,
                state: view.state(),
                profile_id: Some(view.profile.id.clone()),
                notes: view.notes().map(String::from),
                route: view.route().path().to_string(),
                statuses_diverge: view.statuses_diverge(),
                credentials: view.credentials,
            }
        },
        None => StatusReport {
            email: identity.email,
            full_name: identity.full_name,
            state: WorkflowState::Unregistered,
            profile_id: None,
            notes: None,
            route: route_for(None).path().to_string(),
            statuses_diverge: false,
            credentials: Vec::new(),
        },
    };

    report.render(mode);
    Ok(())
}
