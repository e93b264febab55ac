//! A cookie-carrying client for driving the full route table.

use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self as actix_test, TestRequest};
use cafe_directory::inbound::http::test_utils::session_cookie;
use serde_json::Value;

/// Carries the session cookie between requests like a browser.
pub struct Browser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

impl<S> Browser<S>
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    pub fn new(app: S) -> Self {
        Self { app, cookie: None }
    }

    pub async fn send(&mut self, request: TestRequest) -> ServiceResponse {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let response = actix_test::call_service(&self.app, request.to_request()).await;
        if let Some(cookie) = session_cookie(&response) {
            self.cookie = Some(cookie);
        }
        response
    }

    /// Submit a form and return the redirect target.
    pub async fn post_form<T: serde::Serialize>(&mut self, uri: &str, form: T) -> String {
        let response = self.send(TestRequest::post().uri(uri).set_form(form)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "POST {uri}");
        redirect_target(&response)
    }

    pub async fn get(&mut self, uri: &str) -> ServiceResponse {
        self.send(TestRequest::get().uri(uri)).await
    }

    /// `GET uri` and decode the view model.
    pub async fn view(&mut self, uri: &str) -> Value {
        let response = self.get(uri).await;
        assert_eq!(response.status(), StatusCode::OK, "GET {uri}");
        actix_test::read_body_json(response).await
    }

    pub fn forget_session(&mut self) {
        self.cookie = None;
    }
}

pub fn redirect_target(response: &ServiceResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned()
}
