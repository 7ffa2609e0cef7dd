//! Login and signup view models.
//!
//! Failures collapse to one fixed message per form so the views never reveal
//! whether an email is registered.

use tracing::debug;

use crate::client::api::{ApiError, SignupFields, TaskApi};
use crate::client::session::SessionContext;
use crate::client::Navigation;

/// Shown for any failed login.
pub const LOGIN_FAILED: &str = "Invalid email or password";
/// Shown for any failed signup.
pub const SIGNUP_FAILED: &str = "User already exists or invalid data";

/// State of the login page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    error: Option<&'static str>,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            error: None,
        }
    }

    /// Message to display, if the last submission failed.
    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Post the credentials. On success the token is stored in `session`
    /// and the view moves to the dashboard.
    ///
    /// # Errors
    ///
    /// Only a failure to persist the issued token is returned; API failures
    /// set [`Self::error`] and keep the form on screen.
    pub async fn submit(
        &mut self,
        api: &dyn TaskApi,
        session: &mut SessionContext,
    ) -> std::io::Result<Navigation> {
        self.error = None;
        match api.login(&self.email, &self.password).await {
            Ok(token) => {
                session.sign_in(token)?;
                Ok(Navigation::Dashboard)
            }
            Err(error) => {
                log_failure("login", &error);
                self.error = Some(LOGIN_FAILED);
                Ok(Navigation::Stay)
            }
        }
    }
}

/// State of the signup page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub fields: SignupFields,
    error: Option<&'static str>,
}

impl SignupForm {
    pub fn new(fields: SignupFields) -> Self {
        Self {
            fields,
            error: None,
        }
    }

    pub fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Create the account; success moves to the login page.
    pub async fn submit(&mut self, api: &dyn TaskApi) -> Navigation {
        self.error = None;
        match api.signup(&self.fields).await {
            Ok(_) => Navigation::Login,
            Err(error) => {
                log_failure("signup", &error);
                self.error = Some(SIGNUP_FAILED);
                Navigation::Stay
            }
        }
    }
}

fn log_failure(action: &str, error: &ApiError) {
    debug!(action, %error, "form submission failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api::MockTaskApi;
    use crate::client::session::TokenFile;
    use rstest::rstest;

    fn session(dir: &tempfile::TempDir) -> SessionContext {
        SessionContext::load(TokenFile::open(&dir.path().join("token")).expect("token file"))
            .expect("session")
    }

    #[tokio::test]
    async fn successful_login_stores_token_and_opens_dashboard() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = session(&dir);
        let mut api = MockTaskApi::new();
        api.expect_login()
            .withf(|email, password| email == "ada@example.com" && password == "pw")
            .return_once(|_, _| Ok("issued".to_owned()));

        let mut form = LoginForm::new("ada@example.com", "pw");
        let next = form.submit(&api, &mut session).await.expect("submit");

        assert_eq!(next, Navigation::Dashboard);
        assert_eq!(session.token(), Some("issued"));
        assert_eq!(form.error(), None);
    }

    #[rstest]
    #[case(ApiError::Status { status: 401, message: "invalid credentials".to_owned() })]
    #[case(ApiError::Status { status: 400, message: "email must look like local@domain".to_owned() })]
    #[case(ApiError::Transport("connection refused".to_owned()))]
    #[tokio::test]
    async fn any_login_failure_shows_one_message(#[case] failure: ApiError) {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut session = session(&dir);
        let mut api = MockTaskApi::new();
        api.expect_login().return_once(move |_, _| Err(failure));

        let mut form = LoginForm::new("ada@example.com", "wrong");
        let next = form.submit(&api, &mut session).await.expect("submit");

        assert_eq!(next, Navigation::Stay);
        assert_eq!(form.error(), Some(LOGIN_FAILED));
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn successful_signup_goes_to_login() {
        let mut api = MockTaskApi::new();
        api.expect_signup()
            .withf(|fields| fields.name == "Ada")
            .return_once(|fields| {
                Ok(crate::domain::test_fixtures::sample_user(&fields.email))
            });

        let mut form = SignupForm::new(SignupFields {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "pw".to_owned(),
            ..SignupFields::default()
        });

        assert_eq!(form.submit(&api).await, Navigation::Login);
        assert_eq!(form.error(), None);
    }

    #[tokio::test]
    async fn failed_signup_stays_with_message() {
        let mut api = MockTaskApi::new();
        api.expect_signup().return_once(|_| {
            Err(ApiError::Status {
                status: 400,
                message: "email already registered".to_owned(),
            })
        });

        let mut form = SignupForm::default();

        assert_eq!(form.submit(&api).await, Navigation::Stay);
        assert_eq!(form.error(), Some(SIGNUP_FAILED));
    }
}
