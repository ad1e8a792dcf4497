//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::{Credential, DoctorProfile, UserIdentity};
use crate::core::services::{DoctorListing, StatusRoute, WorkflowState};

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

/// Body of every aggregation endpoint failure
#[derive(Debug, Serialize)]
pub struct FunctionError {
    /// Error message
    pub error: String,
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for signing in
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login email
    pub email: String,
    /// Password
    pub password: String,
}

/// Request body for the aggregation endpoint
#[derive(Debug, Deserialize)]
pub struct HealthDataRequest {
    /// Requested action; only `get_summary` is understood
    pub action: String,
}

// =============================================================================
// RESPONSE DATA TYPES
// =============================================================================

/// Login response data
#[derive(Debug, Serialize)]
pub struct LoginData {
    /// Bearer token for later requests
    pub token: String,
    /// When the token stops working (RFC3339)
    pub expires_at: DateTime<Utc>,
    /// Signed-in identity
    pub identity: UserIdentity,
    /// Where the client should navigate next
    pub redirect: String,
}

/// Doctor registration response data
#[derive(Debug, Serialize)]
pub struct RegistrationData {
    /// New identity ID
    pub user_id: String,
    /// New pending profile
    pub profile: DoctorProfile,
    /// One pending credential per document
    pub credentials: Vec<Credential>,
    /// Where the client should navigate next
    pub redirect: String,
}

/// Verification status screen data
#[derive(Debug, Serialize)]
pub struct VerificationData {
    /// Workflow state
    pub state: WorkflowState,
    /// Reviewer notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Credential statuses disagree with the profile status
    pub statuses_diverge: bool,
    /// Screen to show
    pub route: StatusRoute,
    /// Navigation path for `route`
    pub path: String,
    /// The profile
    pub profile: DoctorProfile,
    /// Its credentials
    pub credentials: Vec<Credential>,
}

/// Route endpoint response data
#[derive(Debug, Serialize)]
pub struct RouteData {
    /// Screen to show
    pub route: StatusRoute,
    /// Navigation path for `route`
    pub path: String,
}

/// Doctor directory response data
#[derive(Debug, Serialize)]
pub struct DoctorsData {
    /// Matching verified doctors
    pub doctors: Vec<DoctorListing>,
}
