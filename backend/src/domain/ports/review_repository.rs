//! Driven port for review persistence.

use async_trait::async_trait;

use crate::domain::{CafeId, NewReview, Review};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "review repository query failed: {message}",
        /// The café or author referenced by the review no longer exists.
        MissingParent { message: String } => "review parent missing: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn insert(&self, review: NewReview) -> Result<Review, ReviewPersistenceError>;

    /// Reviews of one café in insertion order.
    async fn list_for_cafe(&self, cafe_id: CafeId) -> Result<Vec<Review>, ReviewPersistenceError>;
}
