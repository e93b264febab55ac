//! Per-request identity resolution.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Identity};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// The identity behind the current request.
///
/// A session pointing at a user that no longer exists resolves to
/// [`Identity::Anonymous`] rather than failing the request.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl std::ops::Deref for CurrentIdentity {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentIdentity {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let session = session.await?;
            let Some(user_id) = session.user_id() else {
                return Ok(Self(Identity::Anonymous));
            };
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            match state.identity.load_user(user_id).await? {
                Some(user) => Ok(Self(Identity::Authenticated(user))),
                None => {
                    warn!(%user_id, "session refers to a missing user");
                    Ok(Self(Identity::Anonymous))
                }
            }
        })
    }
}
