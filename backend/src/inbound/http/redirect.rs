//! Post/redirect/get helpers shared by the page handlers.

use actix_web::HttpResponse;
use actix_web::http::header;

use crate::domain::{Error, Identity, User, require_authenticated};
use crate::inbound::http::session::SessionContext;

/// Notice queued when an anonymous visitor opens a members-only page.
pub const LOGIN_REQUIRED_NOTICE: &str = "Please log in to access this page.";

/// `303 See Other` pointing at `location`.
pub fn see_other(location: impl AsRef<str>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.as_ref()))
        .finish()
}

/// The logged-in user, or a redirect to `/login` with `notice` queued.
pub fn user_or_login_redirect<'a>(
    identity: &'a Identity,
    session: &SessionContext,
    notice: &str,
) -> Result<Result<&'a User, HttpResponse>, Error> {
    match require_authenticated(identity) {
        Ok(user) => Ok(Ok(user)),
        Err(_) => {
            session.push_notice(notice)?;
            Ok(Err(see_other("/login")))
        }
    }
}
