//! Task domain services.
//!
//! Ownership is enforced by passing the authenticated owner into every
//! repository call; a task that belongs to someone else is indistinguishable
//! from one that does not exist.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{TaskCommand, TaskPersistenceError, TaskQuery, TaskRepository};
use crate::domain::{
    Error, NewTask, Task, TaskChanges, TaskDraft, TaskFilter, TaskId, TaskStatus, UserId,
};

const TASK_NOT_FOUND: &str = "Task not found";

fn map_repository_error(error: TaskPersistenceError) -> Error {
    match error {
        TaskPersistenceError::Connection { message } => {
            Error::internal(format!("task repository unavailable: {message}"))
        }
        TaskPersistenceError::Query { message } => {
            Error::internal(format!("task repository error: {message}"))
        }
        TaskPersistenceError::UnknownOwner { owner } => {
            Error::unauthorized(format!("account {owner} no longer exists"))
        }
    }
}

/// Task service implementing the task command and query driving ports.
#[derive(Clone)]
pub struct TaskService<R> {
    task_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TaskService<R> {
    /// Create a new service with the task repository and a clock used for
    /// creation and update timestamps.
    pub fn new(task_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { task_repo, clock }
    }
}

#[async_trait]
impl<R> TaskCommand for TaskService<R>
where
    R: TaskRepository,
{
    async fn create_task(&self, owner: &UserId, task: NewTask) -> Result<Task, Error> {
        let now = self.clock.utc();
        let NewTask { title, description } = task;
        let task = Task::new(TaskDraft {
            id: TaskId::random(),
            owner: owner.clone(),
            title,
            description,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
        });

        self.task_repo
            .insert(&task)
            .await
            .map_err(map_repository_error)?;

        info!(task_id = %task.id(), owner = %owner, "task created");
        Ok(task)
    }

    async fn update_task(
        &self,
        owner: &UserId,
        id: TaskId,
        changes: TaskChanges,
    ) -> Result<Task, Error> {
        let updated = self
            .task_repo
            .update_owned(owner, id, &changes, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(TASK_NOT_FOUND))?;

        info!(task_id = %id, owner = %owner, "task updated");
        Ok(updated)
    }

    async fn delete_task(&self, owner: &UserId, id: TaskId) -> Result<(), Error> {
        let removed = self
            .task_repo
            .delete_owned(owner, id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(Error::not_found(TASK_NOT_FOUND));
        }

        info!(task_id = %id, owner = %owner, "task deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> TaskQuery for TaskService<R>
where
    R: TaskRepository,
{
    async fn list_tasks(&self, owner: &UserId, filter: &TaskFilter) -> Result<Vec<Task>, Error> {
        self.task_repo
            .list_for_owner(owner, filter)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
