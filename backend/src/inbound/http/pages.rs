//! Static informational pages.

use actix_web::{HttpResponse, get};

use crate::inbound::http::ApiResult;
use crate::inbound::http::identity::CurrentIdentity;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::views::{Page, StaticPage};

#[get("/about")]
pub async fn about(identity: CurrentIdentity, session: SessionContext) -> ApiResult<HttpResponse> {
    let body = StaticPage { title: "About" };
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), body)))
}

#[get("/contact")]
pub async fn contact(
    identity: CurrentIdentity,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let body = StaticPage { title: "Contact" };
    Ok(HttpResponse::Ok().json(Page::new(&identity, session.take_notices(), body)))
}
