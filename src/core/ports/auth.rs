//! Authentication port
//!
//! Defines the interface to the identity provider that creates users,
//! issues sessions and resolves bearer tokens.

use thiserror::Error;

use crate::core::models::{Role, Session, SignUp, UserIdentity};

/// Errors an auth provider reports through `anyhow`
///
/// Callers that need to tell them apart use `downcast_ref::<AuthError>()`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// An identity with this email already exists
    #[error("User already registered: {0}")]
    EmailTaken(String),

    /// Email/password pair did not match
    #[error("Invalid login credentials")]
    InvalidCredentials,

    /// Token unknown, signed out or expired
    #[error("Unauthorized")]
    Unauthorized,
}

/// Identity provider
///
/// Implementations own password storage and the session table. Sessions
/// are returned to callers and passed explicitly from there on.
pub trait AuthProvider: Send + Sync {
    /// Create a new identity
    fn sign_up(&self, signup: &SignUp) -> anyhow::Result<UserIdentity>;

    /// Check a password and open a session
    fn sign_in(&self, email: &str, password: &str) -> anyhow::Result<Session>;

    /// Close a session; unknown tokens are ignored
    fn sign_out(&self, token: &str) -> anyhow::Result<()>;

    /// Resolve a bearer token
    ///
    /// Returns `None` for unknown or expired tokens.
    fn session(&self, token: &str) -> anyhow::Result<Option<Session>>;

    /// Look up an identity by ID
    fn identity(&self, id: &str) -> anyhow::Result<Option<UserIdentity>>;

    /// Look up an identity by email (case-insensitive)
    fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserIdentity>>;

    /// Remove an identity and its sessions
    fn delete_identity(&self, id: &str) -> anyhow::Result<()>;

    /// List identities, optionally restricted to one role
    fn list_identities(&self, role: Option<Role>) -> anyhow::Result<Vec<UserIdentity>>;
}
