//! Business logic services
//!
//! Orchestration over the port traits. Services receive the [`Stores`]
//! bundle and, where they act for a user, an explicit [`Session`].
//!
//! - [`workflow`] - Verification state machine and status routing
//! - [`registration`] - Doctor registration saga
//! - [`admin`] - Administrative review of profiles and credentials
//! - [`gate`] - Doctor dashboard gate
//! - [`summary`] - Health summary aggregation
//! - [`discovery`] - Verified doctor directory
//! - [`validation`] - Submission checks
//!
//! [`Stores`]: crate::core::ports::Stores
//! [`Session`]: crate::core::models::Session

pub mod admin;
pub mod discovery;
pub mod gate;
mod parallel;
pub mod registration;
pub mod summary;
pub mod validation;
pub mod workflow;

pub use admin::{ReviewDecision, review_credential, review_profile};
pub use discovery::{DoctorListing, list_doctors};
pub use gate::{DashboardStats, GateDecision, dashboard_gate, dashboard_gate_at};
pub use registration::{
    Registration, RegistrationError, RegistrationOptions, RegistrationPolicy, register_doctor,
};
pub use summary::{DEFAULT_METRIC_LIMIT, GET_SUMMARY, get_summary};
pub use validation::ValidationError;
pub use workflow::{
    ProfileUpdate, StatusRoute, VerificationView, WorkflowError, WorkflowState, current_route,
    get_verification_status, resubmit, route_for,
};
