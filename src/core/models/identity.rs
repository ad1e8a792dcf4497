//! User identities and roles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role flag carried by every identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// End user tracking their own health records
    #[default]
    Patient,
    /// Practitioner going through verification
    Doctor,
    /// Reviewer allowed to set verification statuses
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Doctor => write!(f, "doctor"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(Self::Patient),
            "doctor" => Ok(Self::Doctor),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("Invalid role: {s}. Use: patient, doctor, admin")),
        }
    }
}

/// An authenticated identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Identity ID (owning-identity column on every record)
    pub id: String,
    /// Login email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Role flag
    pub role: Role,
    /// Contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// When the identity was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating an identity
#[derive(Debug, Clone, Deserialize)]
pub struct SignUp {
    /// Login email
    pub email: String,
    /// Plain-text password, hashed by the auth provider
    pub password: String,
    /// Display name
    pub full_name: String,
    /// Requested role
    #[serde(default)]
    pub role: Role,
    /// Contact phone
    #[serde(default)]
    pub phone: Option<String>,
}
