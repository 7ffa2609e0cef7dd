//! In-memory `TaskRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskChanges, TaskFilter, TaskId, UserId};

use super::poisoned;

struct StoredTask {
    /// Insertion order; breaks ties between equal creation timestamps.
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct Tasks {
    next_seq: u64,
    by_id: HashMap<TaskId, StoredTask>,
}

/// Mutex-guarded task store.
#[derive(Default)]
pub struct MemoryTaskRepository {
    tasks: Mutex<Tasks>,
}

impl MemoryTaskRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Tasks>, TaskPersistenceError> {
        self.tasks
            .lock()
            .map_err(|_| TaskPersistenceError::connection(poisoned("task")))
    }
}

#[async_trait]
impl TaskRepository for MemoryTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut guard = self.lock()?;
        if guard.by_id.contains_key(&task.id()) {
            return Err(TaskPersistenceError::query("duplicate task id"));
        }
        let seq = guard.next_seq;
        guard.next_seq += 1;
        guard.by_id.insert(
            task.id(),
            StoredTask {
                seq,
                task: task.clone(),
            },
        );
        Ok(())
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskPersistenceError> {
        let guard = self.lock()?;
        let mut matching: Vec<&StoredTask> = guard
            .by_id
            .values()
            .filter(|stored| stored.task.owner() == owner && filter.matches(&stored.task))
            .collect();
        matching.sort_by(|a, b| {
            b.task
                .created_at()
                .cmp(&a.task.created_at())
                .then(b.seq.cmp(&a.seq))
        });
        Ok(matching.into_iter().map(|stored| stored.task.clone()).collect())
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: TaskId,
        changes: &TaskChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut guard = self.lock()?;
        let Some(stored) = guard
            .by_id
            .get_mut(&id)
            .filter(|stored| stored.task.owner() == owner)
        else {
            return Ok(None);
        };
        stored.task.apply(changes, updated_at);
        Ok(Some(stored.task.clone()))
    }

    async fn delete_owned(&self, owner: &UserId, id: TaskId) -> Result<bool, TaskPersistenceError> {
        let mut guard = self.lock()?;
        let owned = guard
            .by_id
            .get(&id)
            .is_some_and(|stored| stored.task.owner() == owner);
        if owned {
            guard.by_id.remove(&id);
        }
        Ok(owned)
    }
}
