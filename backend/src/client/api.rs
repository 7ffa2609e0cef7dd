//! HTTP client for the TaskFlow REST API.
//!
//! [`TaskApi`] is the seam the view models depend on; [`HttpTaskApi`] owns
//! transport details only: URL building, bearer headers, status mapping and
//! JSON decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use crate::domain::{Task, TaskId, TaskStatus, User};

/// Failures surfaced by [`TaskApi`] calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server could not be reached or the connection failed.
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
    /// An endpoint URL could not be built from the configured base.
    #[error("invalid API URL: {0}")]
    Url(String),
}

impl ApiError {
    /// Whether the server rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Whether the addressed task does not exist for the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Fields for `POST /auth/signup`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role_title: Option<String>,
    pub bio: Option<String>,
}

/// Fields for `PUT /tasks/{id}`; `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Search and status restrictions for a task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub search: Option<String>,
    pub status: Option<TaskStatus>,
}

/// Operations the client views perform against the server.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskApi: Send + Sync {
    async fn signup(&self, fields: &SignupFields) -> Result<User, ApiError>;

    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError>;

    async fn profile(&self, token: &str) -> Result<User, ApiError>;

    /// List tasks, newest first.
    async fn list_tasks(&self, token: &str, filter: &ListFilter) -> Result<Vec<Task>, ApiError>;

    async fn create_task(
        &self,
        token: &str,
        title: &str,
        description: &str,
    ) -> Result<Task, ApiError>;

    async fn update_task(
        &self,
        token: &str,
        id: TaskId,
        update: &TaskUpdate,
    ) -> Result<Task, ApiError>;

    async fn delete_task(&self, token: &str, id: TaskId) -> Result<(), ApiError>;
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Reqwest-backed [`TaskApi`] talking to one server.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    base: Url,
}

impl HttpTaskApi {
    /// Build a client for the API rooted at `base` (for example
    /// `http://localhost:8080/api`).
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|error| ApiError::Url(format!("{path}: {error}")))
    }
}

/// `Url::join` replaces the last path segment unless the base ends in `/`.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::Transport(error.to_string())
}

/// Prefer the server's error message; fall back to the reason phrase.
fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned()
        });
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

async fn send_json<T>(request: RequestBuilder) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| ApiError::Decode(error.to_string()))
}

fn update_body(update: &TaskUpdate) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    if let Some(title) = &update.title {
        body.insert("title".to_owned(), json!(title));
    }
    if let Some(description) = &update.description {
        body.insert("description".to_owned(), json!(description));
    }
    if let Some(status) = update.status {
        body.insert("status".to_owned(), json!(status.as_str()));
    }
    serde_json::Value::Object(body)
}

/// Absent and empty filters are left out of the query string.
fn list_query(filter: &ListFilter) -> Vec<(&'static str, String)> {
    let mut query = Vec::with_capacity(2);
    if let Some(term) = filter.search.as_deref().filter(|term| !term.is_empty()) {
        query.push(("search", term.to_owned()));
    }
    if let Some(status) = filter.status {
        query.push(("status", status.as_str().to_owned()));
    }
    query
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn signup(&self, fields: &SignupFields) -> Result<User, ApiError> {
        let body = json!({
            "name": fields.name,
            "email": fields.email,
            "password": fields.password,
            "roleTitle": fields.role_title,
            "bio": fields.bio,
        });
        send_json(
            self.client
                .post(self.endpoint("auth/signup")?)
                .json(&body),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        let body: TokenBody = send_json(
            self.client
                .post(self.endpoint("auth/login")?)
                .json(&json!({ "email": email, "password": password })),
        )
        .await?;
        Ok(body.token)
    }

    async fn profile(&self, token: &str) -> Result<User, ApiError> {
        send_json(
            self.client
                .get(self.endpoint("auth/profile")?)
                .bearer_auth(token),
        )
        .await
    }

    async fn list_tasks(&self, token: &str, filter: &ListFilter) -> Result<Vec<Task>, ApiError> {
        send_json(
            self.client
                .get(self.endpoint("tasks")?)
                .bearer_auth(token)
                .query(&list_query(filter)),
        )
        .await
    }

    async fn create_task(
        &self,
        token: &str,
        title: &str,
        description: &str,
    ) -> Result<Task, ApiError> {
        send_json(
            self.client
                .post(self.endpoint("tasks")?)
                .bearer_auth(token)
                .json(&json!({ "title": title, "description": description })),
        )
        .await
    }

    async fn update_task(
        &self,
        token: &str,
        id: TaskId,
        update: &TaskUpdate,
    ) -> Result<Task, ApiError> {
        send_json(
            self.client
                .put(self.endpoint(&format!("tasks/{id}"))?)
                .bearer_auth(token)
                .json(&update_body(update)),
        )
        .await
    }

    async fn delete_task(&self, token: &str, id: TaskId) -> Result<(), ApiError> {
        let _confirmation: serde_json::Value = send_json(
            self.client
                .delete(self.endpoint(&format!("tasks/{id}"))?)
                .bearer_auth(token),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080/api", "http://localhost:8080/api/tasks")]
    #[case("http://localhost:8080/api/", "http://localhost:8080/api/tasks")]
    #[case("https://tasks.example/", "https://tasks.example/tasks")]
    fn endpoints_are_joined_under_the_base(#[case] base: &str, #[case] expected: &str) {
        let api = HttpTaskApi::new(
            Url::parse(base).expect("valid base"),
            Duration::from_secs(1),
        )
        .expect("client builds");

        assert_eq!(api.endpoint("tasks").expect("joins").as_str(), expected);
    }

    #[test]
    fn status_errors_carry_server_message() {
        let error = map_status_error(
            StatusCode::NOT_FOUND,
            br#"{"code":"not_found","message":"Task not found"}"#,
        );

        assert_eq!(
            error,
            ApiError::Status {
                status: 404,
                message: "Task not found".to_owned()
            }
        );
        assert!(error.is_not_found());
    }

    #[test]
    fn status_errors_without_json_use_reason_phrase() {
        let error = map_status_error(StatusCode::UNAUTHORIZED, b"nope");

        assert!(error.is_unauthorized());
        assert!(error.to_string().contains("Unauthorized"));
    }

    #[rstest]
    #[case(None, None, &[])]
    #[case(Some(""), None, &[])]
    #[case(Some("milk"), Some(TaskStatus::Completed), &[("search", "milk"), ("status", "completed")])]
    fn list_query_omits_absent_filters(
        #[case] search: Option<&str>,
        #[case] status: Option<TaskStatus>,
        #[case] expected: &[(&str, &str)],
    ) {
        let query = list_query(&ListFilter {
            search: search.map(str::to_owned),
            status,
        });
        let pairs: Vec<(&str, &str)> = query
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn update_body_only_names_supplied_fields() {
        let body = update_body(&TaskUpdate {
            status: Some(TaskStatus::Completed),
            ..TaskUpdate::default()
        });

        assert_eq!(body, json!({ "status": "completed" }));
    }
}
