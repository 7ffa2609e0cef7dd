//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (auth, tasks, health)
//! - **Schemas**: Domain type wrappers ([`ErrorSchema`], [`UserSchema`],
//!   [`TaskSchema`] and friends) that provide OpenAPI definitions without
//!   coupling domain types to the utoipa framework
//! - **Security**: JWT bearer authentication scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, TaskSchema, TaskStatusSchema, UserSchema,
};
use crate::inbound::http::tasks::{CreateTaskRequest, DeleteTaskResponse, UpdateTaskRequest};
use crate::inbound::http::users::{LoginRequest, LoginResponse, SignupRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "TaskFlow API",
        description = "Personal task tracking: accounts, bearer tokens and per-user task CRUD."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::signup,
        crate::inbound::http::users::login,
        crate::inbound::http::users::profile,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        TaskSchema,
        TaskStatusSchema,
        ErrorSchema,
        ErrorCodeSchema,
        SignupRequest,
        LoginRequest,
        LoginResponse,
        CreateTaskRequest,
        UpdateTaskRequest,
        DeleteTaskResponse,
    )),
    tags(
        (name = "auth", description = "Signup, login and profile"),
        (name = "tasks", description = "Per-user task management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
