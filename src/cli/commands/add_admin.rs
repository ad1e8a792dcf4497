//! Create an administrator account
//!
//! The HTTP API refuses admin sign-ups, so reviewers are created here.

use healthdesk::adapters;
use healthdesk::config::AppConfig;
use healthdesk::core::models::{Role, SignUp};
use healthdesk::output::{OperationResult, OutputMode};

/// Create an admin identity
pub fn add_admin(
    config: &AppConfig,
    email: &str,
    full_name: &str,
    password: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let min = config.auth.min_password_len;
    if password.chars().count() < min {
        anyhow::bail!("Password must be at least {min} characters");
    }

    let stores = adapters::open_stores(config)?;
    let identity = stores.auth.sign_up(&SignUp {
        email: email.to_string(),
        password: password.to_string(),
        full_name: full_name.to_string(),
        role: Role::Admin,
        phone: None,
    })?;

    OperationResult::ok(format!("Created admin {} ({})", identity.email, identity.id))
        .render(mode);
    Ok(())
}
