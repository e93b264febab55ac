//! Session helpers so handlers deal in user ids and notices rather than raw
//! cookie state.
//!
//! Two keys are used: `user_id` holds the logged-in account and `notices`
//! queues one-shot flash messages until the next page view drains them.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const NOTICES_KEY: &str = "notices";

/// Newtype over the actix session exposing domain-level operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Remember `user_id` as logged in and rotate the session.
    pub fn persist_user(&self, user_id: UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.get())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))?;
        self.0.renew();
        Ok(())
    }

    /// The remembered user id, if any.
    ///
    /// Content that does not decode to a valid id is logged and treated as
    /// an anonymous session.
    pub fn user_id(&self) -> Option<UserId> {
        let raw = match self.0.get::<i32>(USER_ID_KEY) {
            Ok(raw) => raw?,
            Err(error) => {
                warn!(%error, "unreadable user id in session cookie");
                return None;
            }
        };
        match UserId::new(raw) {
            Ok(id) => Some(id),
            Err(error) => {
                warn!(%error, "invalid user id in session cookie");
                None
            }
        }
    }

    /// Drop every key, logging the client out.
    pub fn purge(&self) {
        self.0.purge();
    }

    /// Queue a flash message for the next page view.
    pub fn push_notice(&self, message: impl Into<String>) -> Result<(), Error> {
        let mut notices = self.pending_notices();
        notices.push(message.into());
        self.0
            .insert(NOTICES_KEY, notices)
            .map_err(|error| Error::internal(format!("failed to store notice: {error}")))
    }

    /// Remove and return all queued flash messages.
    ///
    /// The session is left untouched when nothing is queued, so plain page
    /// views neither issue a cookie nor extend its lifetime.
    pub fn take_notices(&self) -> Vec<String> {
        let notices = self.pending_notices();
        if !notices.is_empty() {
            self.0.remove(NOTICES_KEY);
        }
        notices
    }

    fn pending_notices(&self) -> Vec<String> {
        match self.0.get::<Vec<String>>(NOTICES_KEY) {
            Ok(notices) => notices.unwrap_or_default(),
            Err(error) => {
                warn!(%error, "discarding unreadable notices in session cookie");
                Vec::new()
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
