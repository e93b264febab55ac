//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin: they translate between the internal row structs in
//! `models.rs` and domain records, and map Diesel failures onto the port
//! error enums. Connections come from a `bb8` pool of `diesel-async`
//! connections.
//!
//! # Example
//!
//! ```ignore
//! use cafe_directory::outbound::persistence::{DbPool, DieselCafeRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/cafes")).await?;
//! let cafes = DieselCafeRepository::new(pool);
//! ```

mod diesel_cafe_repository;
mod diesel_error_mapping;
mod diesel_review_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_cafe_repository::DieselCafeRepository;
pub use diesel_review_repository::DieselReviewRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
