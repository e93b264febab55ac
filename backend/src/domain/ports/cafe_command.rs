//! Driving port for café mutations.
//!
//! Methods take the acting [`User`] or [`Identity`] explicitly; callers run
//! the matching guard before reaching for a user value.

use async_trait::async_trait;

use crate::domain::{Cafe, CafeDraft, CafeId, Error, Identity, Review, ReviewText, User};

#[async_trait]
pub trait CafeCommand: Send + Sync {
    /// Create a café owned by `author`. A taken name yields `conflict`.
    async fn add_cafe(&self, author: &User, draft: CafeDraft) -> Result<Cafe, Error>;

    /// Overwrite every field of an existing café.
    ///
    /// Any logged-in user may edit any café. Fails with `not_found` for an
    /// absent id and `conflict` when renaming onto another café's name.
    async fn edit_cafe(&self, editor: &User, id: CafeId, draft: CafeDraft) -> Result<Cafe, Error>;

    /// Delete a café and its reviews. Only the administrator may do this;
    /// everybody else gets `forbidden` before existence is checked.
    async fn delete_cafe(&self, identity: &Identity, id: CafeId) -> Result<(), Error>;

    /// Attach a review by `author` to café `id`.
    async fn add_review(&self, author: &User, id: CafeId, text: ReviewText) -> Result<Review, Error>;
}
