//! HTTP-agnostic API layer
//!
//! This module provides typed request/response structures and pure business logic
//! handlers that can be used by any HTTP server implementation or directly by
//! clients (CLI, tests).
//!
//! ## Design
//!
//! - **Handlers are pure functions**: Take typed input, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ErrorCode};
pub use handlers::{
    ApiContext, authenticate, dashboard, health_data, list_doctors, login, logout, register,
    resubmit, review_credential, review_doctor, route, sign_up, verification_status,
};
pub use types::{
    ApiResponse, DoctorsData, FunctionError, HealthDataRequest, LoginData, LoginRequest,
    RegistrationData, RouteData, VerificationData,
};
