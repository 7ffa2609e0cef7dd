//! In-memory TaskFlow app and request helpers shared by HTTP tests.
#![allow(dead_code, reason = "each test binary uses a subset of the helpers")]

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use taskflow::Trace;
use taskflow::domain::{AccountService, TaskService};
use taskflow::inbound::http::state::HttpState;
use taskflow::inbound::http::{api_scope, configure_extractors};
use taskflow::outbound::memory::{MemoryTaskRepository, MemoryUserRepository};
use taskflow::outbound::security::{Argon2CredentialHasher, JwtTokenCodec, TokenSecret};

pub const PASSWORD: &str = "correct horse battery staple";

/// Services over fresh in-memory repositories.
pub fn memory_state() -> HttpState {
    let clock = Arc::new(DefaultClock);
    let accounts = AccountService::new(
        Arc::new(MemoryUserRepository::new()),
        Arc::new(Argon2CredentialHasher::new()),
        Arc::new(JwtTokenCodec::new(
            &TokenSecret::generate(),
            JwtTokenCodec::DEFAULT_TTL,
        )),
        clock.clone(),
    );
    let tasks = TaskService::new(Arc::new(MemoryTaskRepository::new()), clock);
    HttpState::from_services(Arc::new(accounts), Arc::new(tasks))
}

pub async fn init_app()
-> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(memory_state()))
            .configure(configure_extractors)
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

/// Status and decoded JSON body of one call.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

pub async fn send<S>(app: &S, request: actix_test::TestRequest) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status().as_u16();
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Reply { status, body }
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

pub async fn signup<S>(app: &S, name: &str, email: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/signup")
            .set_json(json!({ "name": name, "email": email, "password": PASSWORD })),
    )
    .await
}

pub async fn login<S>(app: &S, email: &str, password: &str) -> Reply
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": password })),
    )
    .await
}

/// Register `email` and return a bearer token for it.
pub async fn signed_in<S>(app: &S, email: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    assert_eq!(signup(app, "Test User", email).await.status, 201);
    let reply = login(app, email, PASSWORD).await;
    assert_eq!(reply.status, 200, "login failed: {:?}", reply.body);
    reply.body["token"]
        .as_str()
        .expect("token string")
        .to_owned()
}

pub async fn create_task<S>(app: &S, token: &str, title: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let reply = send(
        app,
        actix_test::TestRequest::post()
            .uri("/api/tasks")
            .insert_header(bearer(token))
            .set_json(json!({ "title": title })),
    )
    .await;
    assert_eq!(reply.status, 201, "create failed: {:?}", reply.body);
    reply.body
}

pub async fn list_titles<S>(app: &S, token: &str, query: &str) -> Vec<String>
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = actix_web::Error>,
{
    let reply = send(
        app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/tasks{query}"))
            .insert_header(bearer(token)),
    )
    .await;
    assert_eq!(reply.status, 200, "list failed: {:?}", reply.body);
    reply
        .body
        .as_array()
        .expect("task array")
        .iter()
        .map(|task| task["title"].as_str().expect("title").to_owned())
        .collect()
}
