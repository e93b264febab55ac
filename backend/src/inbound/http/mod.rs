//! HTTP inbound adapter: page view models, form posts and redirects.

pub mod cafes;
pub mod error;
pub mod forms;
pub mod health;
pub mod identity;
pub mod pages;
pub mod redirect;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(any(test, feature = "test-support"))]
pub mod test_utils;
pub mod users;
pub mod views;

pub use error::ApiResult;
