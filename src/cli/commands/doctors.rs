//! List verified doctors

use healthdesk::adapters;
use healthdesk::config::AppConfig;
use healthdesk::core::services;
use healthdesk::output::{DoctorListResult, OutputMode};

/// Print verified doctors, optionally filtered by `search`
pub fn doctors(config: &AppConfig, search: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let stores = adapters::open_stores(config)?;
    let doctors = services::list_doctors(&stores, search)?;
    DoctorListResult { doctors }.render(mode);
    Ok(())
}
