//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence adapters, the ports those adapters implement, and the services
//! that orchestrate them. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`) — API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`) — stable error identifier.
//! - User (alias to `user::User`) — account identity and profile.
//! - Task (alias to `task::Task`) — a to-do item owned by one user.
//! - AccountService / TaskService — driving port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod task;
pub mod task_service;
pub mod trace_id;
pub mod user;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::account_service::AccountService;
pub use self::auth::{
    AccessToken, CredentialsValidationError, LoginCredentials, SignupDetails, SignupInput,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::task::{
    NewTask, TASK_TITLE_MAX, Task, TaskChanges, TaskDraft, TaskFilter, TaskId, TaskStatus,
    TaskTitle, TaskValidationError,
};
pub use self::task_service::TaskService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, PROFILE_FIELD_MAX, PasswordDigest, USER_NAME_MAX, User, UserAccount, UserId,
    UserName, UserValidationError, normalise_profile_field,
};
