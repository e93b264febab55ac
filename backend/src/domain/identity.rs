//! Request identity and the guards that gate café mutations.
//!
//! Authorisation is a single rule: the account with id 1 is the admin and the
//! only identity allowed to delete cafés. Everything else only needs a logged
//! in user.

use super::error::Error;
use super::user::{User, UserId};

/// Raw id of the single administrator account.
pub const ADMIN_USER_ID: i32 = 1;

/// Who is making the current request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Identity {
    /// The logged-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(user) => Some(user),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }

    /// Whether this identity may delete cafés.
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| is_admin_id(user.id()))
    }
}

/// Whether `id` is the administrator account.
pub fn is_admin_id(id: UserId) -> bool {
    id.get() == ADMIN_USER_ID
}

/// Require a logged-in user.
///
/// Anonymous identities yield [`crate::domain::ErrorCode::Unauthorized`]; the
/// HTTP layer turns that into a redirect to the login page.
pub fn require_authenticated(identity: &Identity) -> Result<&User, Error> {
    identity
        .user()
        .ok_or_else(|| Error::unauthorized("you need to log in first"))
}

/// Require the administrator account.
///
/// # Examples
/// ```
/// use cafe_directory::domain::{ErrorCode, Identity, require_admin};
///
/// let err = require_admin(&Identity::Anonymous).unwrap_err();
/// assert_eq!(err.code(), ErrorCode::Forbidden);
/// ```
pub fn require_admin(identity: &Identity) -> Result<&User, Error> {
    match identity.user() {
        Some(user) if is_admin_id(user.id()) => Ok(user),
        _ => Err(Error::forbidden("only the administrator may do this")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmailAddress, ErrorCode, PasswordDigest};
    use rstest::rstest;

    fn user(id: i32) -> User {
        User::new(
            UserId::new(id).expect("id"),
            EmailAddress::new(format!("u{id}@x.com")).expect("email"),
            "Ada",
            "London",
            PasswordDigest::from_stored("$argon2id$stub"),
        )
        .expect("user")
    }

    #[rstest]
    fn anonymous_is_rejected_by_both_guards() {
        let anon = Identity::Anonymous;
        assert_eq!(
            require_authenticated(&anon).expect_err("anon").code(),
            ErrorCode::Unauthorized
        );
        assert_eq!(require_admin(&anon).expect_err("anon").code(), ErrorCode::Forbidden);
        assert!(!anon.is_admin());
    }

    #[rstest]
    #[case(1, true)]
    #[case(2, false)]
    #[case(17, false)]
    fn only_first_account_is_admin(#[case] id: i32, #[case] admin: bool) {
        let identity = Identity::Authenticated(user(id));
        assert!(require_authenticated(&identity).is_ok());
        assert_eq!(require_admin(&identity).is_ok(), admin);
        assert_eq!(identity.is_admin(), admin);
    }
}
