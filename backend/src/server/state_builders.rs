//! Builds HTTP state from either the Diesel adapters or the in-memory store.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use cafe_directory::domain::{AccountService, CafeService};
use cafe_directory::inbound::http::state::HttpState;
use cafe_directory::outbound::memory::InMemoryStore;
use cafe_directory::outbound::persistence::{
    DbPool, DieselCafeRepository, DieselReviewRepository, DieselUserRepository,
};

fn diesel_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let cafes = Arc::new(DieselCafeRepository::new(pool.clone()));
    let reviews = Arc::new(DieselReviewRepository::new(pool.clone()));
    HttpState::from_services(
        Arc::new(AccountService::new(users.clone())),
        Arc::new(CafeService::new(cafes, reviews, users)),
    )
}

fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::from_services(
        Arc::new(AccountService::new(store.clone())),
        Arc::new(CafeService::new(store.clone(), store.clone(), store)),
    )
}

/// Wire services to PostgreSQL when a pool exists, else to memory.
pub fn build_http_state(pool: Option<&DbPool>) -> web::Data<HttpState> {
    let state = match pool {
        Some(pool) => diesel_state(pool),
        None => {
            warn!("no database configured; data is kept in memory and lost on restart");
            memory_state()
        }
    };
    web::Data::new(state)
}
