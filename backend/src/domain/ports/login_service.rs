//! Driving ports for account use-cases: login, registration and loading the
//! identity stored in a session.
//!
//! Inbound adapters call these without importing persistence, so handler
//! tests can substitute doubles.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

/// Authenticate credentials.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Return the matching user, or an `unauthorized` error that does not say
    /// whether the email or the password was wrong.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

/// Open new accounts.
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create the account. A taken email yields a `conflict` error.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;
}

/// Resolve the user id remembered by a session.
#[async_trait]
pub trait IdentityQuery: Send + Sync {
    /// `Ok(None)` when the account no longer exists.
    async fn load_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
