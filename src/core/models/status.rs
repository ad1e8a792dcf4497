//! Verification status
//!
//! One vocabulary shared by doctor profiles and their credentials.
//! Older records wrote `approved` for credentials; it reads back as
//! [`VerificationStatus::Verified`] and is always written as `verified`.

use serde::{Deserialize, Serialize};

/// Review state of a profile or a credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    /// Submitted, waiting for an administrator
    #[default]
    Pending,
    /// Accepted by an administrator
    #[serde(alias = "approved")]
    Verified,
    /// Refused by an administrator
    Rejected,
}

impl VerificationStatus {
    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }

    /// Whether the status grants access to operational screens
    #[must_use]
    pub const fn is_verified(self) -> bool {
        matches!(self, Self::Verified)
    }

    /// Whether an administrator has decided (verified or rejected)
    #[must_use]
    pub const fn is_reviewed(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "verified" | "approved" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(format!("Invalid status: {s}. Use: pending, verified, rejected")),
        }
    }
}
