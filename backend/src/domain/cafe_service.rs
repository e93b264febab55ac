//! Café directory services implementing [`CafeQuery`] and [`CafeCommand`].

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CafeCommand, CafeDetail, CafePersistenceError, CafeQuery, CafeRepository, ReviewEntry,
    ReviewPersistenceError, ReviewRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Cafe, CafeDraft, CafeId, Error, Identity, NewReview, Review, ReviewText, User, UserId,
    require_admin,
};

/// Shown in place of an author whose account row is missing.
const UNKNOWN_AUTHOR: &str = "Unknown";

/// Café service over the three driven repositories.
#[derive(Clone)]
pub struct CafeService<C, R, U> {
    cafes: Arc<C>,
    reviews: Arc<R>,
    users: Arc<U>,
}

impl<C, R, U> CafeService<C, R, U> {
    pub fn new(cafes: Arc<C>, reviews: Arc<R>, users: Arc<U>) -> Self {
        Self {
            cafes,
            reviews,
            users,
        }
    }
}

fn map_cafe_error(error: CafePersistenceError) -> Error {
    match error {
        CafePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("cafe repository unavailable: {message}"))
        }
        CafePersistenceError::Query { message } => {
            Error::internal(format!("cafe repository error: {message}"))
        }
        CafePersistenceError::Duplicate { .. } => Error::conflict("this place already exists"),
    }
}

fn map_review_error(error: ReviewPersistenceError, cafe: CafeId) -> Error {
    match error {
        ReviewPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewPersistenceError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
        ReviewPersistenceError::MissingParent { .. } => cafe_not_found(cafe),
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } | UserPersistenceError::Duplicate { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn cafe_not_found(id: CafeId) -> Error {
    Error::not_found(format!("cafe {id} not found"))
}

fn invalid_draft(draft: &CafeDraft) -> Result<(), Error> {
    draft
        .validate()
        .map_err(|err| Error::invalid_request(err.to_string()))
}

impl<C, R, U> CafeService<C, R, U>
where
    C: CafeRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    async fn require_cafe(&self, id: CafeId) -> Result<Cafe, Error> {
        self.cafes
            .find_by_id(id)
            .await
            .map_err(map_cafe_error)?
            .ok_or_else(|| cafe_not_found(id))
    }
}

#[async_trait]
impl<C, R, U> CafeQuery for CafeService<C, R, U>
where
    C: CafeRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    async fn list_cafes(&self) -> Result<Vec<Cafe>, Error> {
        self.cafes.list_all().await.map_err(map_cafe_error)
    }

    async fn cafe(&self, id: CafeId) -> Result<Cafe, Error> {
        self.require_cafe(id).await
    }

    async fn cafe_detail(&self, id: CafeId) -> Result<CafeDetail, Error> {
        let cafe = self.require_cafe(id).await?;
        let reviews = self
            .reviews
            .list_for_cafe(id)
            .await
            .map_err(|err| map_review_error(err, id))?;

        let authors: Vec<UserId> = reviews
            .iter()
            .map(|review| review.author_id)
            .chain(std::iter::once(cafe.author_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names = self
            .users
            .find_names(&authors)
            .await
            .map_err(map_user_error)?;
        let name_of = |id: UserId| {
            names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_owned())
        };

        Ok(CafeDetail {
            author_name: name_of(cafe.author_id),
            reviews: reviews
                .into_iter()
                .map(|review| ReviewEntry {
                    author_name: name_of(review.author_id),
                    review,
                })
                .collect(),
            cafe,
        })
    }
}

#[async_trait]
impl<C, R, U> CafeCommand for CafeService<C, R, U>
where
    C: CafeRepository,
    R: ReviewRepository,
    U: UserRepository,
{
    async fn add_cafe(&self, author: &User, draft: CafeDraft) -> Result<Cafe, Error> {
        invalid_draft(&draft)?;
        if self
            .cafes
            .find_by_name(&draft.name)
            .await
            .map_err(map_cafe_error)?
            .is_some()
        {
            return Err(map_cafe_error(CafePersistenceError::duplicate(draft.name)));
        }
        let cafe = self
            .cafes
            .insert(author.id(), draft)
            .await
            .map_err(map_cafe_error)?;
        info!(cafe_id = %cafe.id, author_id = %author.id(), "cafe added");
        Ok(cafe)
    }

    async fn edit_cafe(&self, editor: &User, id: CafeId, draft: CafeDraft) -> Result<Cafe, Error> {
        invalid_draft(&draft)?;
        let cafe = self
            .cafes
            .update(id, draft)
            .await
            .map_err(map_cafe_error)?
            .ok_or_else(|| cafe_not_found(id))?;
        info!(cafe_id = %id, editor_id = %editor.id(), "cafe edited");
        Ok(cafe)
    }

    async fn delete_cafe(&self, identity: &Identity, id: CafeId) -> Result<(), Error> {
        let admin = require_admin(identity)?;
        if !self.cafes.delete(id).await.map_err(map_cafe_error)? {
            return Err(cafe_not_found(id));
        }
        info!(cafe_id = %id, admin_id = %admin.id(), "cafe deleted");
        Ok(())
    }

    async fn add_review(&self, author: &User, id: CafeId, text: ReviewText) -> Result<Review, Error> {
        self.require_cafe(id).await?;
        let review = self
            .reviews
            .insert(NewReview {
                cafe_id: id,
                author_id: author.id(),
                text,
            })
            .await
            .map_err(|err| map_review_error(err, id))?;
        info!(cafe_id = %id, review_id = %review.id, author_id = %author.id(), "review added");
        Ok(review)
    }
}
