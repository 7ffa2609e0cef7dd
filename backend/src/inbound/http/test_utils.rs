//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockLoginService, MockSignupService, MockTaskCommand, MockTaskQuery, MockTokenAuthenticator,
    MockUserProfileQuery,
};
use crate::domain::UserId;
use crate::inbound::http::state::HttpState;

/// Port mocks a handler test sets expectations on before building state.
#[derive(Default)]
pub struct MockPorts {
    pub signup: MockSignupService,
    pub login: MockLoginService,
    pub tokens: MockTokenAuthenticator,
    pub profile: MockUserProfileQuery,
    pub tasks: MockTaskCommand,
    pub tasks_query: MockTaskQuery,
}

impl MockPorts {
    /// Accept exactly `token` as a bearer token for `user_id`.
    pub fn authenticating(mut self, token: &'static str, user_id: UserId) -> Self {
        self.tokens
            .expect_authenticate()
            .withf(move |candidate| candidate.as_str() == token)
            .returning(move |_| Ok(user_id.clone()));
        self
    }
}

/// Build [`HttpState`] backed by the supplied mocks.
pub fn state_with(ports: MockPorts) -> HttpState {
    HttpState {
        signup: Arc::new(ports.signup),
        login: Arc::new(ports.login),
        tokens: Arc::new(ports.tokens),
        profile: Arc::new(ports.profile),
        tasks: Arc::new(ports.tasks),
        tasks_query: Arc::new(ports.tasks_query),
    }
}
