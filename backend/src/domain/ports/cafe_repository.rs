//! Driven port for café persistence.

use async_trait::async_trait;

use crate::domain::{Cafe, CafeDraft, CafeId, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by café repository adapters.
    pub enum CafePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "cafe repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "cafe repository query failed: {message}",
        /// Another café already uses the name.
        Duplicate { message: String } => "cafe already exists: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CafeRepository: Send + Sync {
    /// Every café in insertion order.
    async fn list_all(&self) -> Result<Vec<Cafe>, CafePersistenceError>;

    async fn find_by_id(&self, id: CafeId) -> Result<Option<Cafe>, CafePersistenceError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Cafe>, CafePersistenceError>;

    /// Insert a café owned by `author`.
    async fn insert(&self, author: UserId, draft: CafeDraft)
    -> Result<Cafe, CafePersistenceError>;

    /// Overwrite every mutable field. Returns `None` when `id` is absent.
    async fn update(
        &self,
        id: CafeId,
        draft: CafeDraft,
    ) -> Result<Option<Cafe>, CafePersistenceError>;

    /// Delete a café together with its reviews. Returns `false` when absent.
    async fn delete(&self, id: CafeId) -> Result<bool, CafePersistenceError>;
}
