//! Account services: registration, login and session identity lookup.
//!
//! Argon2 is deliberately slow, so hashing and verification run on tokio's
//! blocking pool instead of an actix worker thread.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{
    IdentityQuery, LoginService, RegistrationService, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Error, LoginCredentials, NewUser, PasswordDigest, PasswordHashError, Registration, User,
    UserId, hash_password, verify_password,
};

/// Generic message for every failed login.
pub const INVALID_LOGIN_MESSAGE: &str = "Invalid email or password.";

/// Implements the account driving ports over a [`UserRepository`].
#[derive(Clone)]
pub struct AccountService<U> {
    users: Arc<U>,
}

impl<U> AccountService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Duplicate { .. } => {
            Error::conflict("an account with this email already exists")
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    error!(%error, "password hashing failed");
    Error::internal(error.to_string())
}

async fn run_blocking<T, F>(work: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| Error::internal(format!("password task failed: {err}")))?
        .map_err(map_hash_error)
}

#[async_trait]
impl<U> LoginService for AccountService<U>
where
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        };

        let digest: PasswordDigest = user.password().clone();
        let attempt = zeroize::Zeroizing::new(credentials.password().to_owned());
        let matches = run_blocking(move || verify_password(&digest, attempt.as_str())).await?;
        if !matches {
            return Err(Error::unauthorized(INVALID_LOGIN_MESSAGE));
        }
        info!(user_id = %user.id(), "user logged in");
        Ok(user)
    }
}

#[async_trait]
impl<U> RegistrationService for AccountService<U>
where
    U: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        // Skip the hashing cost for the common case; the unique index still
        // decides races.
        if self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(map_user_error(UserPersistenceError::duplicate(
                registration.email().to_string(),
            )));
        }

        let plaintext = zeroize::Zeroizing::new(registration.password().to_owned());
        let password = run_blocking(move || hash_password(plaintext.as_str())).await?;
        let user = self
            .users
            .insert(NewUser {
                email: registration.email().clone(),
                name: registration.name().to_owned(),
                city: registration.city().to_owned(),
                password,
            })
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), "registered new user");
        Ok(user)
    }
}

#[async_trait]
impl<U> IdentityQuery for AccountService<U>
where
    U: UserRepository,
{
    async fn load_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.users.find_by_id(id).await.map_err(map_user_error)
    }
}
