//! In-memory adapter implementing every repository port.
//!
//! Used when no database URL is configured and by the HTTP tests. One mutex
//! guards all three tables so check-and-insert for unique columns, and the
//! review cascade on café delete, happen atomically just as they would inside
//! a single SQL statement.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    CafePersistenceError, CafeRepository, ReviewPersistenceError, ReviewRepository,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    Cafe, CafeDraft, CafeId, EmailAddress, NewReview, NewUser, Review, ReviewId, User, UserId,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    cafes: Vec<Cafe>,
    reviews: Vec<Review>,
    last_user_id: i32,
    last_cafe_id: i32,
    last_review_id: i32,
}

/// Shared in-process store. Wrap it in an `Arc` and hand the same instance to
/// every service so the three ports see one consistent dataset.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

/// Lock poisoning is reported as a query failure by each port.
struct Poisoned;

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, Poisoned> {
        self.tables.lock().map_err(|_| Poisoned)
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

impl From<Poisoned> for UserPersistenceError {
    fn from(_: Poisoned) -> Self {
        Self::query("in-memory store lock poisoned")
    }
}

impl From<Poisoned> for CafePersistenceError {
    fn from(_: Poisoned) -> Self {
        Self::query("in-memory store lock poisoned")
    }
}

impl From<Poisoned> for ReviewPersistenceError {
    fn from(_: Poisoned) -> Self {
        Self::query("in-memory store lock poisoned")
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut tables = self.lock()?;
        if tables.users.iter().any(|u| u.email() == &user.email) {
            return Err(UserPersistenceError::duplicate("users_email_key"));
        }
        let raw = next_id(&mut tables.last_user_id);
        let id = UserId::new(raw).map_err(|err| UserPersistenceError::query(err.to_string()))?;
        let created = User::new(id, user.email, user.name, user.city, user.password)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|u| u.id() == id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let tables = self.lock()?;
        Ok(tables.users.iter().find(|u| u.email() == email).cloned())
    }

    async fn find_names(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, String>, UserPersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id()))
            .map(|u| (u.id(), u.name().to_owned()))
            .collect())
    }
}

#[async_trait]
impl CafeRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Cafe>, CafePersistenceError> {
        Ok(self.lock()?.cafes.clone())
    }

    async fn find_by_id(&self, id: CafeId) -> Result<Option<Cafe>, CafePersistenceError> {
        let tables = self.lock()?;
        Ok(tables.cafes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Cafe>, CafePersistenceError> {
        let tables = self.lock()?;
        Ok(tables.cafes.iter().find(|c| c.name() == name).cloned())
    }

    async fn insert(
        &self,
        author: UserId,
        draft: CafeDraft,
    ) -> Result<Cafe, CafePersistenceError> {
        let mut tables = self.lock()?;
        if !tables.users.iter().any(|u| u.id() == author) {
            return Err(CafePersistenceError::query("cafe_author_id_fkey"));
        }
        if tables.cafes.iter().any(|c| c.name() == draft.name) {
            return Err(CafePersistenceError::duplicate("cafe_name_key"));
        }
        let raw = next_id(&mut tables.last_cafe_id);
        let id = CafeId::new(raw).map_err(|err| CafePersistenceError::query(err.to_string()))?;
        let cafe = Cafe {
            id,
            author_id: author,
            details: draft,
        };
        tables.cafes.push(cafe.clone());
        Ok(cafe)
    }

    async fn update(
        &self,
        id: CafeId,
        draft: CafeDraft,
    ) -> Result<Option<Cafe>, CafePersistenceError> {
        let mut tables = self.lock()?;
        if tables
            .cafes
            .iter()
            .any(|c| c.id != id && c.name() == draft.name)
        {
            return Err(CafePersistenceError::duplicate("cafe_name_key"));
        }
        Ok(tables.cafes.iter_mut().find(|c| c.id == id).map(|cafe| {
            cafe.details = draft;
            cafe.clone()
        }))
    }

    async fn delete(&self, id: CafeId) -> Result<bool, CafePersistenceError> {
        let mut tables = self.lock()?;
        let before = tables.cafes.len();
        tables.cafes.retain(|c| c.id != id);
        if tables.cafes.len() == before {
            return Ok(false);
        }
        tables.reviews.retain(|r| r.cafe_id != id);
        Ok(true)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn insert(&self, review: NewReview) -> Result<Review, ReviewPersistenceError> {
        let mut tables = self.lock()?;
        if !tables.cafes.iter().any(|c| c.id == review.cafe_id) {
            return Err(ReviewPersistenceError::missing_parent("reviews_cafe_id_fkey"));
        }
        if !tables.users.iter().any(|u| u.id() == review.author_id) {
            return Err(ReviewPersistenceError::missing_parent("reviews_author_id_fkey"));
        }
        let raw = next_id(&mut tables.last_review_id);
        let id =
            ReviewId::new(raw).map_err(|err| ReviewPersistenceError::query(err.to_string()))?;
        let created = Review {
            id,
            cafe_id: review.cafe_id,
            author_id: review.author_id,
            text: review.text,
        };
        tables.reviews.push(created.clone());
        Ok(created)
    }

    async fn list_for_cafe(&self, cafe_id: CafeId) -> Result<Vec<Review>, ReviewPersistenceError> {
        let tables = self.lock()?;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.cafe_id == cafe_id)
            .cloned()
            .collect())
    }
}
