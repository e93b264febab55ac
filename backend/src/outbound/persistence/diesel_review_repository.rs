//! PostgreSQL-backed `ReviewRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReviewPersistenceError, ReviewRepository};
use crate::domain::{CafeId, NewReview, Review};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewReviewRow, ReviewRow};
use super::pool::{DbPool, PoolError};
use super::schema::reviews;

#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReviewPersistenceError {
    ReviewPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ReviewPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => ReviewPersistenceError::connection(message),
        // The café was deleted between the existence check and the insert.
        DieselFailure::ForeignKeyViolation(constraint) => {
            ReviewPersistenceError::missing_parent(constraint)
        }
        DieselFailure::Query(message) | DieselFailure::UniqueViolation(message) => {
            ReviewPersistenceError::query(message)
        }
    }
}

fn to_domain(row: ReviewRow) -> Result<Review, ReviewPersistenceError> {
    Review::try_from(row).map_err(|err| ReviewPersistenceError::query(err.to_string()))
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn insert(&self, review: NewReview) -> Result<Review, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(reviews::table)
            .values(&NewReviewRow {
                author_id: review.author_id.get(),
                cafe_id: review.cafe_id.get(),
                text: review.text.as_str(),
            })
            .returning(ReviewRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(row)
    }

    async fn list_for_cafe(&self, cafe_id: CafeId) -> Result<Vec<Review>, ReviewPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::cafe_id.eq(cafe_id.get()))
            .order(reviews::id.asc())
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }
}
