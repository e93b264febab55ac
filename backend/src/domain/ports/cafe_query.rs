//! Driving port for read-only café views.

use async_trait::async_trait;

use crate::domain::{Cafe, CafeId, Error, Review};

/// A review together with its author's display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    pub review: Review,
    pub author_name: String,
}

/// Everything the café detail page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeDetail {
    pub cafe: Cafe,
    pub author_name: String,
    pub reviews: Vec<ReviewEntry>,
}

#[async_trait]
pub trait CafeQuery: Send + Sync {
    /// Every café in insertion order.
    async fn list_cafes(&self) -> Result<Vec<Cafe>, Error>;

    /// A single café; `not_found` when absent.
    async fn cafe(&self, id: CafeId) -> Result<Cafe, Error>;

    /// Café, author and reviews; `not_found` when absent.
    async fn cafe_detail(&self, id: CafeId) -> Result<CafeDetail, Error>;
}
