//! Handler tests for the account endpoints.

use super::*;
use crate::domain::test_fixtures::sample_user;
use crate::domain::{AccessToken, Error, UserId};
use crate::inbound::http::configure_extractors;
use crate::inbound::http::test_utils::{MockPorts, state_with};
use actix_web::http::StatusCode;
use actix_web::http::header::{AUTHORIZATION, CACHE_CONTROL};
use actix_web::{App, test};
use rstest::rstest;
use serde_json::{Value, json};

async fn send(ports: MockPorts, request: test::TestRequest) -> (StatusCode, Value, Option<String>) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(ports)))
            .configure(configure_extractors)
            .service(
                web::scope("/api")
                    .service(signup)
                    .service(login)
                    .service(profile),
            ),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let cache = response
        .headers()
        .get(CACHE_CONTROL)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value, cache)
}

fn detail<'a>(body: &'a Value, key: &str) -> Option<&'a str> {
    body.get("details")?.get(key)?.as_str()
}

#[actix_web::test]
async fn signup_returns_created_user_without_digest() {
    let mut ports = MockPorts::default();
    ports
        .signup
        .expect_signup()
        .withf(|details| details.email().as_ref() == "ada@example.com" && details.bio().is_none())
        .return_once(|details| Ok(sample_user(details.email().as_ref())));

    let request = test::TestRequest::post().uri("/api/auth/signup").set_json(json!({
        "name": "Ada",
        "email": " Ada@Example.com ",
        "password": "hunter2",
        "bio": "   "
    }));
    let (status, body, cache) = send(ports, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "ada@example.com");
    assert!(body.get("passwordDigest").is_none());
    assert!(body.get("createdAt").is_some());
    assert_eq!(cache.as_deref(), Some("private, no-store"));
}

#[rstest]
#[case(json!({"email": "a@b.c", "password": "pw"}), "name", "empty_name")]
#[case(json!({"name": "Ada", "email": "nope", "password": "pw"}), "email", "invalid_email")]
#[case(json!({"name": "Ada", "email": "a@b.c", "password": "  "}), "password", "empty_password")]
#[actix_web::test]
async fn signup_validation_fails_before_the_service(
    #[case] payload: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let mut ports = MockPorts::default();
    ports.signup.expect_signup().times(0);

    let request = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(payload);
    let (status, body, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(detail(&body, "field"), Some(field));
    assert_eq!(detail(&body, "code"), Some(code));
}

#[actix_web::test]
async fn duplicate_signup_is_bad_request() {
    let mut ports = MockPorts::default();
    ports
        .signup
        .expect_signup()
        .return_once(|_| Err(Error::invalid_request("email already registered")));

    let request = test::TestRequest::post().uri("/api/auth/signup").set_json(json!({
        "name": "Ada",
        "email": "ada@example.com",
        "password": "pw"
    }));
    let (status, body, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "email already registered");
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let request = test::TestRequest::post()
        .uri("/api/auth/signup")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json");
    let (status, body, _) = send(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(detail(&body, "code"), Some("malformed_json"));
}

#[actix_web::test]
async fn login_returns_token() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .withf(|credentials| credentials.email() == "ada@example.com")
        .return_once(|_| Ok(AccessToken::new("signed.jwt.value")));

    let request = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ADA@example.com", "password": "pw"}));
    let (status, body, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"token": "signed.jwt.value"}));
}

#[actix_web::test]
async fn blank_login_fields_are_bad_request() {
    let mut ports = MockPorts::default();
    ports.login.expect_login().times(0);

    let request = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "", "password": ""}));
    let (status, body, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn failed_login_is_unauthorized() {
    let mut ports = MockPorts::default();
    ports
        .login
        .expect_login()
        .return_once(|_| Err(Error::unauthorized("invalid credentials")));

    let request = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "wrong"}));
    let (status, body, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid credentials");
}

#[actix_web::test]
async fn profile_returns_the_authenticated_user() {
    let user = sample_user("ada@example.com");
    let user_id = user.id().clone();
    let mut ports = MockPorts::default().authenticating("token", user_id.clone());
    ports
        .profile
        .expect_fetch_profile()
        .withf(move |id| *id == user_id)
        .return_once(move |_| Ok(user));

    let request = test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header((AUTHORIZATION, "Bearer token"));
    let (status, body, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada Lovelace");
}

#[actix_web::test]
async fn profile_without_token_is_unauthorized() {
    let mut ports = MockPorts::default();
    ports.profile.expect_fetch_profile().times(0);

    let request = test::TestRequest::get().uri("/api/auth/profile");
    let (status, _, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_storage_failure_is_redacted() {
    let mut ports = MockPorts::default().authenticating("token", UserId::random());
    ports
        .profile
        .expect_fetch_profile()
        .return_once(|_| Err(Error::internal("user repository unavailable: refused")));

    let request = test::TestRequest::get()
        .uri("/api/auth/profile")
        .insert_header((AUTHORIZATION, "Bearer token"));
    let (status, body, _) = send(ports, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}
