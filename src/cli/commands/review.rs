//! Administrative review from the command line

use healthdesk::adapters;
use healthdesk::config::AppConfig;
use healthdesk::core::models::VerificationStatus;
use healthdesk::core::services::{self, ReviewDecision};
use healthdesk::output::{OperationResult, OutputMode};

/// Reviewer recorded for decisions made from the CLI
const CLI_REVIEWER: &str = "cli";

fn decision(status: &str, notes: Option<String>) -> anyhow::Result<ReviewDecision> {
    let status: VerificationStatus = status.parse().map_err(anyhow::Error::msg)?;
    if status == VerificationStatus::Pending {
        anyhow::bail!("A review must set 'verified' or 'rejected'");
    }
    Ok(ReviewDecision { status, notes })
}

/// Verify or reject the profile of the doctor registered as `email`
///
/// With `credentials`, every credential of the profile gets the same
/// decision.
pub fn review(
    config: &AppConfig,
    email: &str,
    status: &str,
    notes: Option<String>,
    credentials: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let decision = decision(status, notes)?;
    let stores = adapters::open_stores(config)?;
    let (identity, profile) = super::lookup(&stores, email)?;
    let profile = profile.ok_or_else(|| {
        anyhow::anyhow!("{} has no doctor profile (registration incomplete)", identity.email)
    })?;

    let profile = services::review_profile(&stores, CLI_REVIEWER, &profile.id, &decision)?;

    let mut reviewed = 0;
    if credentials {
        for credential in stores.credentials.for_doctor(&profile.id)? {
            services::review_credential(&stores, CLI_REVIEWER, &credential.id, &decision)?;
            reviewed += 1;
        }
    }

    let mut message = format!("{} marked {}", identity.email, profile.verified_status);
    if reviewed > 0 {
        message.push_str(&format!(" ({reviewed} credentials)"));
    }
    OperationResult::ok(message).render(mode);
    Ok(())
}

/// Verify or reject a single credential
pub fn review_credential(
    config: &AppConfig,
    credential_id: &str,
    status: &str,
    notes: Option<String>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let decision = decision(status, notes)?;
    let stores = adapters::open_stores(config)?;
    let credential =
        services::review_credential(&stores, CLI_REVIEWER, credential_id, &decision)?;
    OperationResult::ok(format!(
        "{} credential {} marked {}",
        credential.credential_type.label(),
        credential.id,
        credential.verification_status
    ))
    .render(mode);
    Ok(())
}
