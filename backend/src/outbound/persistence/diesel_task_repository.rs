//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Ownership is part of every `WHERE` clause so existence and ownership are
//! checked by the same statement. Title search uses `ILIKE` with the user's
//! term escaped, so `%` and `_` match literally.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{
    Task, TaskChanges, TaskDraft, TaskFilter, TaskId, TaskStatus, TaskTitle, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    TaskPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, owner: &UserId) -> TaskPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::ForeignKeyViolation => TaskPersistenceError::unknown_owner(owner.to_string()),
        DieselFailure::Connection(message) => TaskPersistenceError::connection(message),
        DieselFailure::Query(message) => TaskPersistenceError::query(message),
        DieselFailure::UniqueViolation => TaskPersistenceError::query("duplicate task id"),
    }
}

/// Build an `ILIKE` pattern matching `term` anywhere in the title.
///
/// PostgreSQL's default `LIKE` escape character is backslash.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

fn row_to_task(row: TaskRow) -> Result<Task, TaskPersistenceError> {
    let TaskRow {
        id,
        owner_id,
        title,
        description,
        status,
        created_at,
        updated_at,
    } = row;

    let invalid = |err: crate::domain::TaskValidationError| {
        TaskPersistenceError::query(format!("stored task {id} is invalid: {err}"))
    };

    Ok(Task::new(TaskDraft {
        id: TaskId::from_uuid(id),
        owner: UserId::from_uuid(owner_id),
        title: TaskTitle::new(title).map_err(invalid)?,
        description,
        status: TaskStatus::from_str(&status).map_err(invalid)?,
        created_at,
        updated_at,
    }))
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewTaskRow {
            id: *task.id().as_uuid(),
            owner_id: *task.owner().as_uuid(),
            title: task.title().as_ref(),
            description: task.description(),
            status: task.status().as_str(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        };

        diesel::insert_into(tasks::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, task.owner()))
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = tasks::table
            .filter(tasks::owner_id.eq(*owner.as_uuid()))
            .select(TaskRow::as_select())
            .into_boxed();
        if let Some(term) = filter.search() {
            query = query.filter(tasks::title.ilike(contains_pattern(term)));
        }
        if let Some(status) = filter.status() {
            query = query.filter(tasks::status.eq(status.as_str()));
        }

        let rows: Vec<TaskRow> = query
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, owner))?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: TaskId,
        changes: &TaskChanges,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = TaskChangeset {
            title: changes.title.as_ref().map(|title| title.as_ref()),
            description: changes.description.as_deref(),
            status: changes.status.map(TaskStatus::as_str),
            updated_at,
        };

        let row = diesel::update(
            tasks::table.filter(
                tasks::id
                    .eq(*id.as_uuid())
                    .and(tasks::owner_id.eq(*owner.as_uuid())),
            ),
        )
        .set(&changeset)
        .returning(TaskRow::as_returning())
        .get_result::<TaskRow>(&mut conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, owner))?;

        row.map(row_to_task).transpose()
    }

    async fn delete_owned(&self, owner: &UserId, id: TaskId) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            tasks::table.filter(
                tasks::id
                    .eq(*id.as_uuid())
                    .and(tasks::owner_id.eq(*owner.as_uuid())),
            ),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, owner))?;

        Ok(deleted > 0)
    }
}
