//! Password hashing and verification.
//!
//! Digests are Argon2id PHC strings: algorithm, parameters, salt and hash are
//! encoded together, so verification needs nothing but the stored text.

use argon2::Argon2;
use argon2::password_hash::{
    self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use rand::rngs::OsRng;

/// Failures raised while hashing or checking a password.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The stored digest could not be parsed; the record is corrupt.
    #[error("stored password digest is malformed: {message}")]
    Malformed { message: String },
    /// The hashing primitive itself failed.
    #[error("password hashing failed: {message}")]
    Hashing { message: String },
}

/// Self-describing password digest as persisted in `users.password`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest loaded from storage without re-validating it.
    ///
    /// Corruption is detected lazily by [`verify_password`].
    pub fn from_stored(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Hash `plaintext` with a fresh random salt.
///
/// # Examples
/// ```
/// use cafe_directory::domain::{hash_password, verify_password};
///
/// let digest = hash_password("pw1").unwrap();
/// assert!(digest.as_str().starts_with("$argon2id$"));
/// assert!(verify_password(&digest, "pw1").unwrap());
/// ```
pub fn hash_password(plaintext: &str) -> Result<PasswordDigest, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::Hashing {
            message: err.to_string(),
        })?;
    Ok(PasswordDigest(hash.to_string()))
}

/// Check `plaintext` against `digest` in constant time.
///
/// Returns `Ok(false)` on mismatch and an error only when the digest itself
/// cannot be parsed.
pub fn verify_password(digest: &PasswordDigest, plaintext: &str) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(digest.as_str()).map_err(|err| PasswordHashError::Malformed {
        message: err.to_string(),
    })?;
    match Argon2::default().verify_password(plaintext.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::Malformed {
            message: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn round_trip_accepts_original_password() {
        let digest = hash_password("pw1").expect("hash");
        assert!(verify_password(&digest, "pw1").expect("verify"));
    }

    #[rstest]
    fn wrong_password_is_rejected() {
        let digest = hash_password("pw1").expect("hash");
        assert!(!verify_password(&digest, "pw2").expect("verify"));
    }

    #[rstest]
    fn salts_differ_per_call() {
        let first = hash_password("same").expect("hash");
        let second = hash_password("same").expect("hash");
        assert_ne!(first, second);
    }

    #[rstest]
    fn digest_never_contains_plaintext() {
        let digest = hash_password("hunter2-secret").expect("hash");
        assert!(!digest.as_str().contains("hunter2-secret"));
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
    }

    #[rstest]
    #[case("")]
    #[case("plaintext-password")]
    fn malformed_digest_is_reported_as_corruption(#[case] stored: &str) {
        let digest = PasswordDigest::from_stored(stored);
        let err = verify_password(&digest, "anything").expect_err("corrupt digest");
        assert!(matches!(err, PasswordHashError::Malformed { .. }));
    }
}
