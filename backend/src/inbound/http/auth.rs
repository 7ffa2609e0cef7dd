//! Bearer-token authentication extractor.
//!
//! Handlers that take [`BearerAuth`] only run once the `Authorization:
//! Bearer <token>` header has been verified, so they never see an
//! unauthenticated request.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::error;

use crate::domain::{AccessToken, Error, UserId};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Authenticated caller resolved from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerAuth(UserId);

impl BearerAuth {
    /// The authenticated user's id.
    pub fn user_id(&self) -> &UserId {
        &self.0
    }

    /// Consume the extractor, yielding the user id.
    pub fn into_user_id(self) -> UserId {
        self.0
    }
}

/// Pull the token out of an `Authorization` header value.
///
/// The scheme is matched case-insensitively; an empty token is rejected.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate_request(req: &HttpRequest) -> Result<BearerAuth, Error> {
    let Some(state) = req.app_data::<web::Data<HttpState>>() else {
        error!("HttpState missing from app data; cannot authenticate");
        return Err(Error::internal("authentication state unavailable"));
    };

    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("invalid authorization header"))?;
    let token = bearer_token(header).ok_or_else(|| Error::unauthorized("missing bearer token"))?;

    state
        .tokens
        .authenticate(&AccessToken::new(token))
        .map(BearerAuth)
}

impl FromRequest for BearerAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate_request(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockTokenAuthenticator;
    use crate::inbound::http::test_utils::state_with;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc", Some("abc"))]
    #[case("bearer   abc  ", Some("abc"))]
    #[case("Bearer", None)]
    #[case("Bearer    ", None)]
    #[case("Basic abc", None)]
    #[case("", None)]
    fn parses_bearer_header(#[case] header: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(header), expected);
    }

    async fn call_with_header(
        tokens: MockTokenAuthenticator,
        header: Option<&str>,
    ) -> (StatusCode, String) {
        let mut state = state_with(Default::default());
        state.tokens = std::sync::Arc::new(tokens);
        let app = actix_test::init_service(App::new().app_data(web::Data::new(state)).route(
            "/",
            web::get().to(|auth: BearerAuth| async move {
                HttpResponse::Ok().body(auth.user_id().to_string())
            }),
        ))
        .await;

        let mut request = actix_test::TestRequest::get().uri("/");
        if let Some(value) = header {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[actix_web::test]
    async fn valid_token_yields_user_id() {
        let user_id = UserId::random();
        let expected = user_id.to_string();
        let mut tokens = MockTokenAuthenticator::new();
        tokens
            .expect_authenticate()
            .withf(|token| token.as_str() == "good")
            .return_once(move |_| Ok(user_id));

        let (status, body) = call_with_header(tokens, Some("Bearer good")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Token good"))]
    #[actix_web::test]
    async fn missing_bearer_is_unauthorized_without_verifying(#[case] header: Option<&str>) {
        let mut tokens = MockTokenAuthenticator::new();
        tokens.expect_authenticate().times(0);

        let (status, body) = call_with_header(tokens, header).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("\"code\":\"unauthorized\""));
    }

    #[actix_web::test]
    async fn rejected_token_is_unauthorized() {
        let mut tokens = MockTokenAuthenticator::new();
        tokens
            .expect_authenticate()
            .return_once(|_| Err(Error::unauthorized("token expired")));

        let (status, body) = call_with_header(tokens, Some("Bearer stale")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("token expired"));
    }
}
