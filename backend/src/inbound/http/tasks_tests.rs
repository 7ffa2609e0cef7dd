//! Handler tests for the task endpoints.

use super::*;
use crate::domain::test_fixtures::sample_task;
use crate::domain::{TaskStatus, UserId};
use crate::inbound::http::configure_extractors;
use crate::inbound::http::test_utils::{MockPorts, state_with};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TOKEN: &str = "token";

#[fixture]
fn owner() -> UserId {
    UserId::random()
}

async fn send(ports: MockPorts, request: test::TestRequest) -> (StatusCode, Value) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(ports)))
            .configure(configure_extractors)
            .service(
                web::scope("/api")
                    .service(create_task)
                    .service(list_tasks)
                    .service(update_task)
                    .service(delete_task),
            ),
    )
    .await;
    let request = request.insert_header((AUTHORIZATION, format!("Bearer {TOKEN}")));
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn create_returns_pending_task(owner: UserId) {
    let created = sample_task(&owner, "Buy milk", 0);
    let expected_owner = owner.clone();
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports
        .tasks
        .expect_create_task()
        .withf(move |user, task| {
            *user == expected_owner
                && task.title.as_ref() == "Buy milk"
                && task.description.is_empty()
        })
        .return_once(move |_, _| Ok(created));

    let request = test::TestRequest::post()
        .uri("/api/tasks")
        .set_json(json!({"title": "  Buy milk  "}));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["description"], "");
}

#[rstest]
#[case(json!({}))]
#[case(json!({"title": ""}))]
#[case(json!({"title": "   ", "description": "x"}))]
#[actix_web::test]
async fn create_without_title_is_bad_request(owner: UserId, #[case] payload: Value) {
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports.tasks.expect_create_task().times(0);

    let request = test::TestRequest::post().uri("/api/tasks").set_json(payload);
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "title");
    assert_eq!(body["details"]["code"], "empty_title");
}

#[rstest]
#[actix_web::test]
async fn list_forwards_search_and_status(owner: UserId) {
    let tasks = vec![sample_task(&owner, "Buy milk", 5)];
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports
        .tasks_query
        .expect_list_tasks()
        .withf(|_, filter| {
            filter.search() == Some("MILK") && filter.status() == Some(TaskStatus::Pending)
        })
        .return_once(move |_, _| Ok(tasks));

    let request = test::TestRequest::get().uri("/api/tasks?search=MILK&status=pending");
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn empty_query_values_mean_no_filter(owner: UserId) {
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports
        .tasks_query
        .expect_list_tasks()
        .withf(|_, filter| filter.search().is_none() && filter.status().is_none())
        .return_once(|_, _| Ok(Vec::new()));

    let request = test::TestRequest::get().uri("/api/tasks?search=&status=");
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[rstest]
#[actix_web::test]
async fn unknown_status_filter_is_bad_request(owner: UserId) {
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports.tasks_query.expect_list_tasks().times(0);

    let request = test::TestRequest::get().uri("/api/tasks?status=archived");
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "unknown_status");
}

#[rstest]
#[actix_web::test]
async fn update_passes_only_supplied_fields(owner: UserId) {
    let mut updated = sample_task(&owner, "Buy milk", 0);
    let id = updated.id();
    updated.apply(
        &TaskChanges {
            status: Some(TaskStatus::Completed),
            ..TaskChanges::default()
        },
        updated.created_at(),
    );
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports
        .tasks
        .expect_update_task()
        .withf(move |_, task_id, changes| {
            *task_id == id
                && changes.title.is_none()
                && changes.description.is_none()
                && changes.status == Some(TaskStatus::Completed)
        })
        .return_once(move |_, _, _| Ok(updated));

    let request = test::TestRequest::put()
        .uri(&format!("/api/tasks/{id}"))
        .set_json(json!({"status": "completed"}));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
    assert_eq!(body["title"], "Buy milk");
}

#[rstest]
#[case(json!({"title": " "}), "empty_title")]
#[case(json!({"status": "done"}), "unknown_status")]
#[actix_web::test]
async fn invalid_update_fields_are_bad_request(
    owner: UserId,
    #[case] payload: Value,
    #[case] code: &str,
) {
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports.tasks.expect_update_task().times(0);

    let request = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", TaskId::random()))
        .set_json(payload);
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn update_of_foreign_task_is_not_found(owner: UserId) {
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports
        .tasks
        .expect_update_task()
        .return_once(|_, _, _| Err(Error::not_found(TASK_NOT_FOUND)));

    let request = test::TestRequest::put()
        .uri(&format!("/api/tasks/{}", TaskId::random()))
        .set_json(json!({"title": "Mine now"}));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], TASK_NOT_FOUND);
}

#[rstest]
#[case("PUT")]
#[case("DELETE")]
#[actix_web::test]
async fn malformed_task_id_is_not_found(owner: UserId, #[case] method: &str) {
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports.tasks.expect_update_task().times(0);
    ports.tasks.expect_delete_task().times(0);

    let request = match method {
        "PUT" => test::TestRequest::put()
            .uri("/api/tasks/not-a-uuid")
            .set_json(json!({"title": "x"})),
        _ => test::TestRequest::delete().uri("/api/tasks/not-a-uuid"),
    };
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], TASK_NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn delete_confirms_removal(owner: UserId) {
    let id = TaskId::random();
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports
        .tasks
        .expect_delete_task()
        .withf(move |_, task_id| *task_id == id)
        .return_once(|_, _| Ok(()));

    let request = test::TestRequest::delete().uri(&format!("/api/tasks/{id}"));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Task deleted successfully"}));
}

#[rstest]
#[actix_web::test]
async fn delete_storage_failure_does_not_leak_detail(owner: UserId) {
    let mut ports = MockPorts::default().authenticating(TOKEN, owner);
    ports
        .tasks
        .expect_delete_task()
        .return_once(|_, _| Err(Error::internal("task repository error: relation missing")));

    let request = test::TestRequest::delete().uri(&format!("/api/tasks/{}", TaskId::random()));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
    assert!(!body.to_string().contains("relation missing"));
}

#[actix_web::test]
async fn requests_without_token_never_reach_services() {
    let mut ports = MockPorts::default();
    ports.tokens.expect_authenticate().times(0);
    ports.tasks_query.expect_list_tasks().times(0);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state_with(ports)))
            .service(web::scope("/api").service(list_tasks)),
    )
    .await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/api/tasks").to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
