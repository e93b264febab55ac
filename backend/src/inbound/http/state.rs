//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CafeCommand, CafeQuery, IdentityQuery, LoginService, RegistrationService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub identity: Arc<dyn IdentityQuery>,
    pub cafes: Arc<dyn CafeQuery>,
    pub cafe_commands: Arc<dyn CafeCommand>,
}

impl HttpState {
    /// Bundle an account service and a café service, each of which backs
    /// several ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use cafe_directory::domain::{AccountService, CafeService};
    /// use cafe_directory::inbound::http::state::HttpState;
    /// use cafe_directory::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let accounts = Arc::new(AccountService::new(store.clone()));
    /// let cafes = Arc::new(CafeService::new(store.clone(), store.clone(), store));
    /// let state = HttpState::from_services(accounts, cafes);
    /// let _query = state.cafes.clone();
    /// ```
    pub fn from_services<A, C>(accounts: Arc<A>, cafes: Arc<C>) -> Self
    where
        A: LoginService + RegistrationService + IdentityQuery + 'static,
        C: CafeQuery + CafeCommand + 'static,
    {
        Self {
            login: accounts.clone(),
            registration: accounts.clone(),
            identity: accounts,
            cafes: cafes.clone(),
            cafe_commands: cafes,
        }
    }
}
