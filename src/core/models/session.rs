//! Session context
//!
//! A session is handed explicitly to every operation that acts on behalf
//! of a user. It is created by [`AuthProvider::sign_in`] and stops being
//! accepted once it expires or the user signs out.
//!
//! [`AuthProvider::sign_in`]: crate::core::ports::AuthProvider::sign_in

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Role, UserIdentity};

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token presented by the client
    pub token: String,
    /// Identity the session acts for
    pub identity: UserIdentity,
    /// When the session was created
    pub issued_at: DateTime<Utc>,
    /// When the session stops being valid
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Issue a fresh session for an identity
    #[must_use]
    pub fn issue(identity: UserIdentity, ttl: Duration) -> Self {
        let issued_at = Utc::now();
        Self {
            token: uuid::Uuid::new_v4().simple().to_string(),
            identity,
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    /// Owning identity ID
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.identity.id
    }

    /// Role of the identity
    #[must_use]
    pub const fn role(&self) -> Role {
        self.identity.role
    }

    /// Whether the session has expired at `now`
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the session has expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}
