//! Driving port for task reads.

use async_trait::async_trait;

use crate::domain::{Error, Task, TaskFilter, UserId};

/// Domain use-case port for listing a user's tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// Tasks owned by `owner` matching `filter`, newest first. An empty
    /// result is not an error.
    async fn list_tasks(&self, owner: &UserId, filter: &TaskFilter) -> Result<Vec<Task>, Error>;
}
