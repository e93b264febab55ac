//! Domain primitives, services and ports.
//!
//! Purpose: define the strongly typed café directory model and the use-cases
//! that operate on it. Nothing here imports actix or Diesel; adapters live in
//! `inbound` and `outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Cafe, Review: persisted records, linked by id only.
//! - Identity and the `require_*` guards: request authorisation.
//! - AccountService, CafeService: implementations of the driving ports.

pub mod account_service;
pub mod auth;
pub mod cafe;
pub mod cafe_service;
pub mod error;
pub mod identity;
pub mod password;
pub mod ports;
pub mod review;
pub mod trace_id;
pub mod user;

pub use self::account_service::{AccountService, INVALID_LOGIN_MESSAGE};
pub use self::auth::{CredentialsValidationError, LoginCredentials, Registration};
pub use self::cafe::{Amenity, Cafe, CafeDraft, CafeId, CafeValidationError, SeatRange};
pub use self::cafe_service::CafeService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::{
    ADMIN_USER_ID, Identity, is_admin_id, require_admin, require_authenticated,
};
pub use self::password::{PasswordDigest, PasswordHashError, hash_password, verify_password};
pub use self::review::{NewReview, Review, ReviewId, ReviewText, ReviewValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, NewUser, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use cafe_directory::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
