//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the structure of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The task does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Title is required")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Validation failures carry `field` and `code`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(value_type = String, format = Uuid, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    /// Normalised to lowercase.
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Analyst")]
    role_title: Option<String>,
    bio: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::TaskStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TaskStatus)]
pub enum TaskStatusSchema {
    #[schema(rename = "pending")]
    Pending,
    #[schema(rename = "completed")]
    Completed,
}

/// OpenAPI schema for [`crate::domain::Task`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Task, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    /// Id of the owning user.
    #[schema(value_type = String, format = Uuid)]
    owner: String,
    #[schema(example = "Buy milk")]
    title: String,
    description: String,
    status: TaskStatusSchema,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    #[case(ErrorCodeSchema::name(), "crate.domain.ErrorCode")]
    #[case(ErrorSchema::name(), "crate.domain.Error")]
    #[case(UserSchema::name(), "crate.domain.User")]
    #[case(TaskStatusSchema::name(), "crate.domain.TaskStatus")]
    #[case(TaskSchema::name(), "crate.domain.Task")]
    fn schema_names_follow_domain_paths(
        #[case] name: std::borrow::Cow<'static, str>,
        #[case] expected: &str,
    ) {
        // utoipa replaces :: with . in schema names
        assert_eq!(name, expected);
    }

    #[test]
    fn error_schema_uses_camel_case_trace_id() {
        let schema_json = schema_to_json::<ErrorSchema>();
        assert!(schema_json.contains("traceId"));
        assert!(!schema_json.contains("trace_id"));
    }

    #[test]
    fn task_schema_lists_wire_fields() {
        let schema_json = schema_to_json::<TaskSchema>();
        for field in ["owner", "createdAt", "updatedAt", "status"] {
            assert!(schema_json.contains(field), "missing {field}");
        }
    }

    #[test]
    fn user_schema_never_mentions_password() {
        let schema_json = schema_to_json::<UserSchema>();
        assert!(schema_json.contains("roleTitle"));
        assert!(!schema_json.to_lowercase().contains("password"));
    }

    #[test]
    fn status_schema_lists_both_states() {
        let schema_json = schema_to_json::<TaskStatusSchema>();
        assert!(schema_json.contains("pending"));
        assert!(schema_json.contains("completed"));
    }
}
