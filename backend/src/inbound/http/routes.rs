//! Route table for the café directory.

use actix_web::{HttpRequest, error, web};

use crate::domain::Error;
use crate::inbound::http::{cafes, health, pages, users};

/// Bodies that are not valid urlencoded forms use the standard error envelope.
fn form_error(err: error::UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("malformed form body: {err}")).into()
}

/// Non-numeric ids name no café.
fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::not_found(format!("no such page: {err}")).into()
}

/// Register every page, form and probe handler.
///
/// Handlers expect `web::Data<HttpState>` and, for the probes,
/// `web::Data<HealthState>` to be registered on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .service(health::ready)
        .service(health::live)
        .service(cafes::list_cafes)
        .service(cafes::show_cafe)
        .service(cafes::add_review)
        .service(cafes::add_cafe_page)
        .service(cafes::add_cafe)
        .service(cafes::edit_cafe_page)
        .service(cafes::edit_cafe)
        .service(cafes::delete_cafe)
        .service(users::register_page)
        .service(users::register)
        .service(users::login_page)
        .service(users::login)
        .service(users::logout)
        .service(pages::about)
        .service(pages::contact);
}
