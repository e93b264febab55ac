//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by the outbound adapters;
//! driving ports are implemented by domain services and called by HTTP
//! handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod cafe_command;
mod cafe_query;
mod cafe_repository;
mod login_service;
mod review_repository;
mod user_repository;

pub use cafe_command::CafeCommand;
pub use cafe_query::{CafeDetail, CafeQuery, ReviewEntry};
#[cfg(test)]
pub use cafe_repository::MockCafeRepository;
pub use cafe_repository::{CafePersistenceError, CafeRepository};
pub use login_service::{IdentityQuery, LoginService, RegistrationService};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewPersistenceError, ReviewRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
