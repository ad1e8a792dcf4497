//! Doctor discovery
//!
//! Lists verified doctors for patients, with a free-text search over
//! name, email and specializations.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::models::{Role, VerificationStatus};
use crate::core::ports::Stores;

/// A doctor as shown in the directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorListing {
    /// Profile ID (used to book appointments)
    pub profile_id: String,
    /// Owning identity
    pub user_id: String,
    /// Display name
    pub full_name: String,
    /// Contact email
    pub email: String,
    /// Specialization tags
    pub specializations: Vec<String>,
    /// Years in practice
    pub experience_years: u32,
    /// Spoken languages
    pub languages: Vec<String>,
    /// Fee per consultation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consultation_fee: Option<f64>,
    /// Whether remote consultations are offered
    pub teleconsult_available: bool,
    /// Clinic address
    pub clinic_address: String,
}

impl DoctorListing {
    fn matches(&self, needle: &str) -> bool {
        self.full_name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self.specializations.iter().any(|s| s.to_lowercase().contains(needle))
    }
}

/// Verified doctors, sorted by name, optionally filtered by `search`
pub fn list_doctors(stores: &Stores, search: Option<&str>) -> anyhow::Result<Vec<DoctorListing>> {
    let identities: HashMap<String, _> = stores
        .auth
        .list_identities(Some(Role::Doctor))?
        .into_iter()
        .map(|identity| (identity.id.clone(), identity))
        .collect();

    let mut listings: Vec<DoctorListing> = stores
        .profiles
        .list_by_status(VerificationStatus::Verified)?
        .into_iter()
        .filter_map(|profile| {
            let identity = identities.get(&profile.user_id)?;
            Some(DoctorListing {
                profile_id: profile.id,
                user_id: profile.user_id,
                full_name: identity.full_name.clone(),
                email: identity.email.clone(),
                specializations: profile.specializations,
                experience_years: profile.experience_years,
                languages: profile.languages,
                consultation_fee: profile.consultation_fee,
                teleconsult_available: profile.teleconsult_available,
                clinic_address: profile.clinic.address,
            })
        })
        .collect();

    if let Some(needle) = search.map(|s| s.trim().to_lowercase())
        && !needle.is_empty()
    {
        listings.retain(|listing| listing.matches(&needle));
    }

    listings.sort_by(|a, b| a.full_name.cmp(&b.full_name));
    Ok(listings)
}
