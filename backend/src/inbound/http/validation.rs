//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every validation failure becomes an `invalid_request` error whose
//! `details` carry the offending `field` and a machine-readable `code`.

use actix_web::HttpRequest;
use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use serde_json::json;

use crate::domain::{CredentialsValidationError, Error, TaskValidationError};

/// Build an `invalid_request` error with field context.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Map signup/login validation failures.
pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    let message = err.to_string();
    match err {
        CredentialsValidationError::EmptyName => field_error("name", "empty_name", message),
        CredentialsValidationError::NameTooLong { .. } => {
            field_error("name", "name_too_long", message)
        }
        CredentialsValidationError::EmptyEmail => field_error("email", "empty_email", message),
        CredentialsValidationError::InvalidEmail => field_error("email", "invalid_email", message),
        CredentialsValidationError::EmptyPassword => {
            field_error("password", "empty_password", message)
        }
        CredentialsValidationError::ProfileFieldTooLong { field, .. } => {
            field_error(field, "too_long", message)
        }
    }
}

/// Map task field validation failures.
pub(crate) fn task_error(err: TaskValidationError) -> Error {
    let message = err.to_string();
    match err {
        TaskValidationError::EmptyTitle => field_error("title", "empty_title", message),
        TaskValidationError::TitleTooLong { .. } => field_error("title", "title_too_long", message),
        TaskValidationError::UnknownStatus { .. } => {
            field_error("status", "unknown_status", message)
        }
        TaskValidationError::InvalidId => field_error("id", "invalid_uuid", message),
    }
}

/// Extractor error handler for malformed JSON bodies.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let code = match &err {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "payload_too_large"
        }
        _ => "malformed_json",
    };
    field_error("body", code, format!("invalid JSON body: {err}")).into()
}

/// Extractor error handler for malformed query strings.
pub(crate) fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    field_error("query", "malformed_query", format!("invalid query string: {err}")).into()
}

/// Extractor error handler for path segments that fail to deserialise.
pub(crate) fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    field_error("path", "malformed_path", format!("invalid path: {err}")).into()
}
