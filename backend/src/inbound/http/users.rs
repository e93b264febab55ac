//! Account handlers.
//!
//! ```text
//! GET  /register   registration page
//! POST /register   email=a@x.com&password=pw1&name=Ada&city=London
//! GET  /login      login page
//! POST /login      email=a@x.com&password=pw1
//! GET  /logout
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{ErrorCode, INVALID_LOGIN_MESSAGE};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{LoginForm, RegisterForm};
use crate::inbound::http::identity::CurrentIdentity;
use crate::inbound::http::redirect::see_other;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{Empty, Page};

/// Notice shown when registering with an email that already has an account.
pub const ALREADY_REGISTERED_NOTICE: &str = "You've already signed up, try to log in.";

#[get("/register")]
pub async fn register_page(
    identity: CurrentIdentity,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), Empty {})))
}

/// Create an account and log it in.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegisterForm>,
) -> ApiResult<HttpResponse> {
    let registration = form.into_inner().validate()?;
    match state.registration.register(&registration).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            Ok(see_other("/"))
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            session.push_notice(ALREADY_REGISTERED_NOTICE)?;
            Ok(see_other("/login"))
        }
        Err(err) => Err(err),
    }
}

#[get("/login")]
pub async fn login_page(
    identity: CurrentIdentity,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), Empty {})))
}

/// Verify credentials and establish a session.
///
/// Unknown emails and wrong passwords produce the same notice and leave the
/// session untouched.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = form.into_inner().validate()?;
    match state.login.authenticate(&credentials).await {
        Ok(user) => {
            session.persist_user(user.id())?;
            Ok(see_other("/"))
        }
        Err(err) if err.code() == ErrorCode::Unauthorized => {
            session.push_notice(INVALID_LOGIN_MESSAGE)?;
            Ok(see_other("/login"))
        }
        Err(err) => Err(err),
    }
}

#[get("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    see_other("/")
}
