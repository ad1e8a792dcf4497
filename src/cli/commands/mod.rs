//! Command implementations

mod add_admin;
mod config;
mod doctors;
mod review;
mod serve;
mod status;

pub use add_admin::add_admin;
pub use config::config;
pub use doctors::doctors;
pub use review::{review, review_credential};
pub use serve::serve;
pub use status::status;

use healthdesk::core::models::{DoctorProfile, UserIdentity};
use healthdesk::core::ports::Stores;

/// Identity and (possibly absent) profile for an email
fn lookup(stores: &Stores, email: &str) -> anyhow::Result<(UserIdentity, Option<DoctorProfile>)> {
    let identity = stores
        .auth
        .find_by_email(email)?
        .ok_or_else(|| anyhow::anyhow!("No account registered for {email}"))?;
    let profile = stores.profiles.find_by_user(&identity.id)?;
    Ok((identity, profile))
}
