//! Port for task persistence.
//!
//! Every read and mutation is scoped to an owner so adapters check existence
//! and ownership in the same query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Task, TaskChanges, TaskFilter, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
        /// The owning user does not exist.
        UnknownOwner { owner: String } => "task owner does not exist: {owner}",
    }
}

/// Task store keyed by id and partitioned by owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Persist a new task.
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError>;

    /// List the owner's tasks matching `filter`, newest first.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Apply `changes` to the owner's task and return it, or `None` when no
    /// task with `id` belongs to `owner`.
    async fn update_owned(
        &self,
        owner: &UserId,
        id: TaskId,
        changes: &TaskChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, TaskPersistenceError>;

    /// Delete the owner's task. Returns `false` when nothing was removed.
    async fn delete_owned(&self, owner: &UserId, id: TaskId) -> Result<bool, TaskPersistenceError>;
}
