//! Terminal client for the TaskFlow API.
//!
//! Views are plain state machines over [`api::TaskApi`] so they can be driven
//! from the `taskflow` CLI or from tests with a mocked API. The bearer token
//! lives in an explicit [`session::SessionContext`] rather than process-wide
//! storage.

pub mod api;
pub mod dashboard;
pub mod forms;
pub mod render;
pub mod session;

pub use api::{ApiError, HttpTaskApi, ListFilter, SignupFields, TaskApi, TaskUpdate};
pub use dashboard::{Dashboard, DashboardError, DashboardLoad, TaskAction};
pub use forms::{LoginForm, SignupForm};
pub use session::{SessionContext, TokenFile};

/// Where a view sends the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Remain on the current page, typically to show an error.
    Stay,
    Dashboard,
    Login,
}
