//! Task API handlers.
//!
//! Every route requires a bearer token and only ever touches the caller's
//! own tasks. A task id that is missing, malformed or owned by someone else
//! is reported as the same 404.
//!
//! ```text
//! POST   /api/tasks          {"title":"Buy milk","description":"2 litres"}
//! GET    /api/tasks?search=milk&status=pending
//! PUT    /api/tasks/{id}     {"status":"completed"}
//! DELETE /api/tasks/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, NewTask, TaskChanges, TaskFilter, TaskId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerAuth;
use crate::inbound::http::cache_control::private_no_store_header;
use crate::inbound::http::schemas::{ErrorSchema, TaskSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::task_error;

const TASK_NOT_FOUND: &str = "Task not found";
const TASK_DELETED: &str = "Task deleted successfully";

/// Body for `POST /api/tasks`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body for `PUT /api/tasks/{id}`; omitted fields keep their values.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `pending` or `completed`.
    #[serde(default)]
    pub status: Option<String>,
}

/// Query string for `GET /api/tasks`. Empty values are ignored.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTasksQuery {
    /// Case-insensitive literal substring of the title.
    pub search: Option<String>,
    /// `pending` or `completed`.
    pub status: Option<String>,
}

/// Confirmation body returned by `DELETE /api/tasks/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct DeleteTaskResponse {
    pub message: String,
}

fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    TaskId::new(raw).map_err(|_| Error::not_found(TASK_NOT_FOUND))
}

/// Create a pending task owned by the caller.
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskSchema),
        (status = 400, description = "Missing or blank title", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let new_task = NewTask::try_from_parts(payload.title.as_deref(), payload.description.as_deref())
        .map_err(task_error)?;
    let task = state.tasks.create_task(auth.user_id(), new_task).await?;
    Ok(HttpResponse::Created()
        .insert_header(private_no_store_header())
        .json(task))
}

/// List the caller's tasks, newest first.
#[utoipa::path(
    get,
    path = "/api/tasks",
    params(ListTasksQuery),
    responses(
        (status = 200, description = "Matching tasks", body = [TaskSchema]),
        (status = 400, description = "Unknown status filter", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    query: web::Query<ListTasksQuery>,
) -> ApiResult<HttpResponse> {
    let filter = TaskFilter::try_from_parts(query.search.as_deref(), query.status.as_deref())
        .map_err(task_error)?;
    let tasks = state
        .tasks_query
        .list_tasks(auth.user_id(), &filter)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(tasks))
}

/// Overwrite the supplied fields of one of the caller's tasks.
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskSchema),
        (status = 400, description = "Blank title or unknown status", body = ErrorSchema),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 404, description = "Task not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[put("/tasks/{id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_task_id(&path)?;
    let changes = TaskChanges::try_from_parts(
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.status.as_deref(),
    )
    .map_err(task_error)?;
    let task = state
        .tasks
        .update_task(auth.user_id(), id, changes)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(task))
}

/// Delete one of the caller's tasks.
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = String, Path, description = "Task id")),
    responses(
        (status = 200, description = "Task deleted", body = DeleteTaskResponse),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorSchema),
        (status = 404, description = "Task not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    auth: BearerAuth,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_task_id(&path)?;
    state.tasks.delete_task(auth.user_id(), id).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_store_header())
        .json(DeleteTaskResponse {
            message: TASK_DELETED.to_owned(),
        }))
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
