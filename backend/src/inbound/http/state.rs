//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, SignupService, TaskCommand, TaskQuery, TokenAuthenticator, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub signup: Arc<dyn SignupService>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenAuthenticator>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub tasks: Arc<dyn TaskCommand>,
    pub tasks_query: Arc<dyn TaskQuery>,
}

impl HttpState {
    /// Construct state from one account service and one task service, each
    /// serving every port it implements.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use taskflow::domain::{AccountService, TaskService};
    /// use taskflow::inbound::http::state::HttpState;
    /// use taskflow::outbound::memory::{MemoryTaskRepository, MemoryUserRepository};
    /// use taskflow::outbound::security::{Argon2CredentialHasher, JwtTokenCodec, TokenSecret};
    ///
    /// let clock = Arc::new(DefaultClock);
    /// let accounts = AccountService::new(
    ///     Arc::new(MemoryUserRepository::new()),
    ///     Arc::new(Argon2CredentialHasher::new()),
    ///     Arc::new(JwtTokenCodec::new(&TokenSecret::generate(), JwtTokenCodec::DEFAULT_TTL)),
    ///     clock.clone(),
    /// );
    /// let tasks = TaskService::new(Arc::new(MemoryTaskRepository::new()), clock);
    /// let state = HttpState::from_services(Arc::new(accounts), Arc::new(tasks));
    /// let _login = state.login.clone();
    /// ```
    pub fn from_services<A, T>(accounts: Arc<A>, tasks: Arc<T>) -> Self
    where
        A: SignupService + LoginService + TokenAuthenticator + UserProfileQuery + 'static,
        T: TaskCommand + TaskQuery + 'static,
    {
        Self {
            signup: accounts.clone(),
            login: accounts.clone(),
            tokens: accounts.clone(),
            profile: accounts,
            tasks: tasks.clone(),
            tasks_query: tasks,
        }
    }
}
