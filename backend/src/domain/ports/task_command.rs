//! Driving port for task mutations.
//!
//! Every operation takes the authenticated owner; tasks owned by someone else
//! are reported exactly like tasks that do not exist.

use async_trait::async_trait;

use crate::domain::{Error, NewTask, Task, TaskChanges, TaskId, UserId};

/// Domain use-case port for creating, updating and deleting tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Create a pending task owned by `owner`.
    async fn create_task(&self, owner: &UserId, task: NewTask) -> Result<Task, Error>;

    /// Overwrite the supplied fields of the owner's task.
    async fn update_task(
        &self,
        owner: &UserId,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Task, Error>;

    /// Remove the owner's task.
    async fn delete_task(&self, owner: &UserId, id: TaskId) -> Result<(), Error>;
}
