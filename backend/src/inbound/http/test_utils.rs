//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::{AccountService, CafeService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;

/// Name of the session cookie issued by [`test_session_middleware`].
pub const SESSION_COOKIE: &str = "session";

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE.to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state wired to a fresh in-memory store.
///
/// The store is returned too so tests can seed or inspect rows directly.
pub fn memory_state() -> (HttpState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let accounts = Arc::new(AccountService::new(store.clone()));
    let cafes = Arc::new(CafeService::new(store.clone(), store.clone(), store.clone()));
    (HttpState::from_services(accounts, cafes), store)
}

/// The session cookie set on `response`, if any.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(Cookie::into_owned)
}

/// Drives an initialised test service while carrying the session cookie
/// between requests, the way a browser would.
#[cfg(test)]
pub struct TestBrowser<S> {
    app: S,
    cookie: Option<Cookie<'static>>,
}

#[cfg(test)]
impl<S> TestBrowser<S>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    pub fn new(app: S) -> Self {
        Self { app, cookie: None }
    }

    /// Send `request` with the current cookie and keep any replacement.
    pub async fn send(&mut self, request: actix_web::test::TestRequest) -> ServiceResponse {
        let request = match &self.cookie {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        };
        let response = actix_web::test::call_service(&self.app, request.to_request()).await;
        if let Some(cookie) = session_cookie(&response) {
            self.cookie = Some(cookie);
        }
        response
    }

    /// `GET uri`, asserting success and decoding the JSON view model.
    pub async fn view(&mut self, uri: &str) -> serde_json::Value {
        let response = self.send(actix_web::test::TestRequest::get().uri(uri)).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::OK, "GET {uri}");
        actix_web::test::read_body_json(response).await
    }
}

/// `Location` header of a redirect.
pub fn location<B>(response: &ServiceResponse<B>) -> Option<&str> {
    response
        .headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

/// In-memory sink for `tracing` output, installed per thread.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl CapturedLogs {
    /// Route events on the current thread into a fresh buffer until the
    /// guard drops. `actix_web::test` runs handlers on that same thread.
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let logs = Self::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(logs.clone())
            .finish();
        (logs, tracing::subscriber::set_default(subscriber))
    }

    /// Number of captured lines containing `message`.
    pub fn count(&self, message: &str) -> usize {
        let buffer = self.0.lock().expect("log buffer");
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter(|line| line.contains(message))
            .count()
    }
}

#[cfg(test)]
impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
