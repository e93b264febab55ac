//! Café directory handlers.
//!
//! ```text
//! GET  /                  all cafés
//! GET  /cafe/{id}         café detail with reviews
//! POST /cafe/{id}         review_text=...
//! GET  /add               add form
//! POST /add               name=...&map_url=...&wifi=Yes&seats=10-20&...
//! GET  /edit-cafe/{id}    edit form
//! POST /edit-cafe/{id}
//! GET  /delete/{id}       admin only
//! ```

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{CafeId, Error, ErrorCode, require_admin};
use crate::inbound::http::ApiResult;
use crate::inbound::http::forms::{CafeForm, ReviewForm};
use crate::inbound::http::identity::CurrentIdentity;
use crate::inbound::http::redirect::{LOGIN_REQUIRED_NOTICE, see_other, user_or_login_redirect};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{
    CafeChoices, CafeDetailView, CafeFormPage, CafeList, CafeView, Page,
};

pub const REVIEW_LOGIN_NOTICE: &str = "You need to login to review.";
pub const CAFE_ADDED_NOTICE: &str = "Place successfully added.";
pub const CAFE_EXISTS_NOTICE: &str = "This place already exists.";

/// Ids that can never exist are reported like absent ones.
fn cafe_id(raw: i32) -> Result<CafeId, Error> {
    CafeId::new(raw).map_err(|_| Error::not_found(format!("cafe {raw} not found")))
}

#[get("/")]
pub async fn list_cafes(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let cafes = state.cafes.list_cafes().await?;
    let body = CafeList {
        cafes: cafes.iter().map(CafeView::from).collect(),
    };
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), body)))
}

#[get("/cafe/{id}")]
pub async fn show_cafe(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = cafe_id(path.into_inner())?;
    let detail = state.cafes.cafe_detail(id).await?;
    let body = CafeDetailView::new(detail, &identity);
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), body)))
}

/// Post a review on a café.
#[post("/cafe/{id}")]
pub async fn add_review(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<ReviewForm>,
) -> ApiResult<HttpResponse> {
    let id = cafe_id(path.into_inner())?;
    let user = match user_or_login_redirect(&identity, &session, REVIEW_LOGIN_NOTICE)? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };
    let text = form.into_inner().validate()?;
    state.cafe_commands.add_review(user, id, text).await?;
    Ok(see_other(format!("/cafe/{id}")))
}

#[get("/add")]
pub async fn add_cafe_page(
    identity: CurrentIdentity,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    if let Err(redirect) = user_or_login_redirect(&identity, &session, LOGIN_REQUIRED_NOTICE)? {
        return Ok(redirect);
    }
    let body = CafeFormPage {
        form: None,
        choices: CafeChoices::default(),
    };
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), body)))
}

/// Create a café owned by the current user.
#[post("/add")]
pub async fn add_cafe(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
    session: SessionContext,
    form: web::Form<CafeForm>,
) -> ApiResult<HttpResponse> {
    let user = match user_or_login_redirect(&identity, &session, LOGIN_REQUIRED_NOTICE)? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };
    let draft = form.into_inner().validate()?;
    match state.cafe_commands.add_cafe(user, draft).await {
        Ok(_) => {
            session.push_notice(CAFE_ADDED_NOTICE)?;
            Ok(see_other("/"))
        }
        Err(err) if err.code() == ErrorCode::Conflict => {
            session.push_notice(CAFE_EXISTS_NOTICE)?;
            Ok(see_other("/add"))
        }
        Err(err) => Err(err),
    }
}

#[get("/edit-cafe/{id}")]
pub async fn edit_cafe_page(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
    session: SessionContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = cafe_id(path.into_inner())?;
    if let Err(redirect) = user_or_login_redirect(&identity, &session, LOGIN_REQUIRED_NOTICE)? {
        return Ok(redirect);
    }
    let cafe = state.cafes.cafe(id).await?;
    let body = CafeFormPage {
        form: Some(CafeView::from(&cafe)),
        choices: CafeChoices::default(),
    };
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), body)))
}

/// Overwrite every field of a café.
///
/// Any logged-in user may edit any café.
#[post("/edit-cafe/{id}")]
pub async fn edit_cafe(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
    session: SessionContext,
    path: web::Path<i32>,
    form: web::Form<CafeForm>,
) -> ApiResult<HttpResponse> {
    let id = cafe_id(path.into_inner())?;
    let user = match user_or_login_redirect(&identity, &session, LOGIN_REQUIRED_NOTICE)? {
        Ok(user) => user,
        Err(redirect) => return Ok(redirect),
    };
    let draft = form.into_inner().validate()?;
    match state.cafe_commands.edit_cafe(user, id, draft).await {
        Ok(_) => Ok(see_other(format!("/cafe/{id}"))),
        Err(err) if err.code() == ErrorCode::Conflict => {
            session.push_notice(CAFE_EXISTS_NOTICE)?;
            Ok(see_other(format!("/edit-cafe/{id}")))
        }
        Err(err) => Err(err),
    }
}

/// Remove a café and its reviews. Only the administrator may do this.
#[get("/delete/{id}")]
pub async fn delete_cafe(
    state: web::Data<HttpState>,
    identity: CurrentIdentity,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    require_admin(&identity)?;
    let id = cafe_id(path.into_inner())?;
    state.cafe_commands.delete_cafe(&identity, id).await?;
    Ok(see_other("/"))
}

#[cfg(test)]
mod tests;
