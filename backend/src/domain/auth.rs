//! Credentials submitted through the login and registration forms.
//!
//! Plaintext passwords only ever live in [`Zeroizing`] buffers and are wiped
//! when the credentials value is dropped.

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserValidationError};

/// Validation errors raised while assembling credentials.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    #[error(transparent)]
    User(#[from] UserValidationError),
    /// Password was empty. Whitespace-only passwords are accepted verbatim.
    #[error("password must not be empty")]
    EmptyPassword,
}

fn secret(password: &str) -> Result<Zeroizing<String>, CredentialsValidationError> {
    if password.is_empty() {
        return Err(CredentialsValidationError::EmptyPassword);
    }
    Ok(Zeroizing::new(password.to_owned()))
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use cafe_directory::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@x.com ", "pw1").unwrap();
/// assert_eq!(creds.email().as_ref(), "a@x.com");
/// assert_eq!(creds.password(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: secret(password)?,
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Everything needed to open a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    password: Zeroizing<String>,
    name: String,
    city: String,
}

impl Registration {
    /// Validate raw form values. Name and city are trimmed; the password is not.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
        city: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(UserValidationError::EmptyName.into());
        }
        let city = city.trim();
        if city.is_empty() {
            return Err(UserValidationError::EmptyCity.into());
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: secret(password)?,
            name: name.to_owned(),
            city: city.to_owned(),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}
