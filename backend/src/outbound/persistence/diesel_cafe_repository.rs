//! PostgreSQL-backed `CafeRepository`.
//!
//! Name uniqueness is left to the `cafe_name_key` constraint; a violation
//! comes back as [`CafePersistenceError::Duplicate`]. Deleting a café relies
//! on `ON DELETE CASCADE` to drop its reviews in the same statement.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CafePersistenceError, CafeRepository};
use crate::domain::{Cafe, CafeDraft, CafeId, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CafeChanges, CafeRow, NewCafeRow};
use super::pool::{DbPool, PoolError};
use super::schema::cafe;

/// Diesel-backed café storage.
#[derive(Clone)]
pub struct DieselCafeRepository {
    pool: DbPool,
}

impl DieselCafeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CafePersistenceError {
    CafePersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> CafePersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => CafePersistenceError::connection(message),
        DieselFailure::UniqueViolation(constraint) => CafePersistenceError::duplicate(constraint),
        DieselFailure::Query(message) | DieselFailure::ForeignKeyViolation(message) => {
            CafePersistenceError::query(message)
        }
    }
}

fn to_domain(row: CafeRow) -> Result<Cafe, CafePersistenceError> {
    Cafe::try_from(row).map_err(|err| CafePersistenceError::query(err.to_string()))
}

#[async_trait]
impl CafeRepository for DieselCafeRepository {
    async fn list_all(&self) -> Result<Vec<Cafe>, CafePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CafeRow> = cafe::table
            .order(cafe::id.asc())
            .select(CafeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_domain).collect()
    }

    async fn find_by_id(&self, id: CafeId) -> Result<Option<Cafe>, CafePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        cafe::table
            .find(id.get())
            .select(CafeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Cafe>, CafePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        cafe::table
            .filter(cafe::name.eq(name))
            .select(CafeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn insert(
        &self,
        author: UserId,
        draft: CafeDraft,
    ) -> Result<Cafe, CafePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(cafe::table)
            .values(&NewCafeRow {
                author_id: author.get(),
                changes: CafeChanges::from(&draft),
            })
            .returning(CafeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        to_domain(row)
    }

    async fn update(
        &self,
        id: CafeId,
        draft: CafeDraft,
    ) -> Result<Option<Cafe>, CafePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(cafe::table.find(id.get()))
            .set(&CafeChanges::from(&draft))
            .returning(CafeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(to_domain)
            .transpose()
    }

    async fn delete(&self, id: CafeId) -> Result<bool, CafePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(cafe::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
