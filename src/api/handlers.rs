//! Pure API handlers
//!
//! These handlers contain business logic and are HTTP-agnostic.
//! They take typed input and return `Result<T, ApiError>`. Handlers that
//! act for a user take the raw bearer token and resolve it first.

use chrono::Utc;

use crate::core::models::{
    Credential, DoctorProfile, HealthSummary, RegistrationRequest, Role, Session, SignUp,
    UserIdentity,
};
use crate::core::ports::Stores;
use crate::core::services::{
    self, DEFAULT_METRIC_LIMIT, GET_SUMMARY, GateDecision, ProfileUpdate, RegistrationOptions,
    ReviewDecision,
};

use super::error::ApiError;
use super::types::{
    DoctorsData, HealthDataRequest, LoginData, LoginRequest, RegistrationData, RouteData,
    VerificationData,
};

/// Everything a handler needs
#[derive(Debug, Clone)]
pub struct ApiContext {
    /// Backing stores
    pub stores: Stores,
    /// Registration saga settings
    pub registration: RegistrationOptions,
    /// Metrics returned by the summary
    pub metric_limit: usize,
}

impl ApiContext {
    /// Context with default settings
    #[must_use]
    pub fn new(stores: Stores) -> Self {
        Self {
            stores,
            registration: RegistrationOptions::default(),
            metric_limit: DEFAULT_METRIC_LIMIT,
        }
    }
}

// =============================================================================
// SESSIONS
// =============================================================================

/// Resolve a bearer token into a live session
pub fn authenticate(ctx: &ApiContext, token: Option<&str>) -> Result<Session, ApiError> {
    let token = token.filter(|t| !t.is_empty()).ok_or_else(ApiError::unauthorized)?;
    ctx.stores.auth.session(token)?.ok_or_else(ApiError::unauthorized)
}

fn require_role(session: &Session, role: Role) -> Result<(), ApiError> {
    if session.role() == role {
        Ok(())
    } else {
        Err(ApiError::forbidden(format!("Requires the {role} role")))
    }
}

fn authenticate_as(ctx: &ApiContext, token: Option<&str>, role: Role) -> Result<Session, ApiError> {
    let session = authenticate(ctx, token)?;
    require_role(&session, role)?;
    Ok(session)
}

/// Create a patient or doctor identity
///
/// Admin identities are only created from the CLI.
pub fn sign_up(ctx: &ApiContext, req: &SignUp) -> Result<UserIdentity, ApiError> {
    if req.role == Role::Admin {
        return Err(ApiError::forbidden("Admin accounts cannot be created through the API"));
    }
    if req.email.trim().is_empty() || req.full_name.trim().is_empty() {
        return Err(ApiError::bad_request("Email and full name are required"));
    }
    let min = ctx.registration.min_password_len;
    if req.password.chars().count() < min {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {min} characters"
        )));
    }
    Ok(ctx.stores.auth.sign_up(req)?)
}

/// Sign in and report where the client should go
pub fn login(ctx: &ApiContext, req: &LoginRequest) -> Result<LoginData, ApiError> {
    let session = ctx.stores.auth.sign_in(req.email.trim(), &req.password)?;
    let redirect = match session.role() {
        Role::Doctor => services::current_route(&ctx.stores, &session)?.path().to_string(),
        Role::Patient | Role::Admin => "/".to_string(),
    };
    log::info!("Signed in {} ({})", session.identity.email, session.role());
    Ok(LoginData {
        token: session.token,
        expires_at: session.expires_at,
        identity: session.identity,
        redirect,
    })
}

/// End a session; unknown tokens are ignored
pub fn logout(ctx: &ApiContext, token: Option<&str>) -> Result<serde_json::Value, ApiError> {
    if let Some(token) = token {
        ctx.stores.auth.sign_out(token)?;
    }
    Ok(serde_json::json!({ "signed_out": true, "redirect": services::workflow::LOGIN_PATH }))
}

// =============================================================================
// DOCTORS
// =============================================================================

/// Submit a doctor registration
pub fn register(ctx: &ApiContext, req: &RegistrationRequest) -> Result<RegistrationData, ApiError> {
    let registration = services::register_doctor(&ctx.stores, &ctx.registration, req)?;
    let redirect = services::route_for(Some(&registration.profile)).path().to_string();
    Ok(RegistrationData {
        user_id: registration.identity.id,
        profile: registration.profile,
        credentials: registration.credentials,
        redirect,
    })
}

/// The caller's verification status screen
pub fn verification_status(
    ctx: &ApiContext,
    token: Option<&str>,
) -> Result<VerificationData, ApiError> {
    let session = authenticate_as(ctx, token, Role::Doctor)?;
    let view = services::get_verification_status(&ctx.stores, &session)?;
    let route = view.route();
    Ok(VerificationData {
        state: view.state(),
        notes: view.notes().map(String::from),
        statuses_diverge: view.statuses_diverge(),
        path: route.path().to_string(),
        route,
        profile: view.profile,
        credentials: view.credentials,
    })
}

/// Where the caller should be routed
pub fn route(ctx: &ApiContext, token: Option<&str>) -> Result<RouteData, ApiError> {
    let session = authenticate_as(ctx, token, Role::Doctor)?;
    let route = services::current_route(&ctx.stores, &session)?;
    Ok(RouteData {
        path: route.path().to_string(),
        route,
    })
}

/// Load the doctor dashboard through the verification gate
pub fn dashboard(ctx: &ApiContext, token: Option<&str>) -> Result<GateDecision, ApiError> {
    let session = authenticate_as(ctx, token, Role::Doctor)?;
    Ok(services::dashboard_gate(&ctx.stores, &session)?)
}

/// Resubmit a rejected profile
pub fn resubmit(
    ctx: &ApiContext,
    token: Option<&str>,
    update: Option<ProfileUpdate>,
) -> Result<DoctorProfile, ApiError> {
    let session = authenticate_as(ctx, token, Role::Doctor)?;
    Ok(services::resubmit(&ctx.stores, &session, update)?)
}

/// Verified doctors, optionally filtered
pub fn list_doctors(ctx: &ApiContext, search: Option<&str>) -> Result<DoctorsData, ApiError> {
    let doctors = services::list_doctors(&ctx.stores, search)?;
    Ok(DoctorsData { doctors })
}

// =============================================================================
// ADMIN
// =============================================================================

/// Review a doctor profile
pub fn review_doctor(
    ctx: &ApiContext,
    token: Option<&str>,
    profile_id: &str,
    decision: &ReviewDecision,
) -> Result<DoctorProfile, ApiError> {
    let session = authenticate_as(ctx, token, Role::Admin)?;
    Ok(services::review_profile(&ctx.stores, session.user_id(), profile_id, decision)?)
}

/// Review one credential document
pub fn review_credential(
    ctx: &ApiContext,
    token: Option<&str>,
    credential_id: &str,
    decision: &ReviewDecision,
) -> Result<Credential, ApiError> {
    let session = authenticate_as(ctx, token, Role::Admin)?;
    Ok(services::review_credential(&ctx.stores, session.user_id(), credential_id, decision)?)
}

// =============================================================================
// HEALTH DATA
// =============================================================================

/// Aggregation endpoint
///
/// The session is checked before the body is parsed. An unknown action is
/// a `BadRequest`; every other failure is reported as-is.
pub fn health_data(
    ctx: &ApiContext,
    token: Option<&str>,
    body: &str,
) -> Result<HealthSummary, ApiError> {
    let session = authenticate(ctx, token)?;
    let request: HealthDataRequest =
        serde_json::from_str(body).map_err(|e| ApiError::internal(e.to_string()))?;

    if request.action != GET_SUMMARY {
        return Err(ApiError::bad_request("Invalid action"));
    }

    let summary = services::get_summary(
        &*ctx.stores.health,
        session.user_id(),
        Utc::now(),
        ctx.metric_limit,
    )?;
    log::debug!(
        "Summary for {}: {} medications, {} appointments, {} allergies, {} metrics",
        session.user_id(),
        summary.medications.len(),
        summary.appointments.len(),
        summary.allergies.len(),
        summary.health_metrics.len()
    );
    Ok(summary)
}
