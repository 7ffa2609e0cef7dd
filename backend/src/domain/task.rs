//! Task data model, partial updates and list filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Maximum allowed length for a task title.
pub const TASK_TITLE_MAX: usize = 200;

/// Validation errors returned by the task value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    InvalidId,
    EmptyTitle,
    TitleTooLong { max: usize },
    UnknownStatus { value: String },
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "task id must be a valid UUID"),
            Self::EmptyTitle => write!(f, "Title is required"),
            Self::TitleTooLong { max } => write!(f, "title must be at most {max} characters"),
            Self::UnknownStatus { value } => {
                write!(f, "status must be pending or completed, got '{value}'")
            }
        }
    }
}

impl std::error::Error for TaskValidationError {}

/// Stable task identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Parse a task identifier from its textual form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| TaskValidationError::InvalidId)
    }

    /// Generate a new random [`TaskId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task title, stored trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskTitle(String);

impl TaskTitle {
    pub fn new(title: impl AsRef<str>) -> Result<Self, TaskValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TASK_TITLE_MAX {
            return Err(TaskValidationError::TitleTooLong {
                max: TASK_TITLE_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<TaskTitle> for String {
    fn from(value: TaskTitle) -> Self {
        value.0
    }
}

impl TryFrom<String> for TaskTitle {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Completion state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(TaskValidationError::UnknownStatus {
                value: other.to_owned(),
            }),
        }
    }
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: String,
}

impl NewTask {
    /// Validate raw creation fields; a missing description defaults to empty.
    pub fn try_from_parts(
        title: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        let title = TaskTitle::new(title.unwrap_or_default())?;
        Ok(Self {
            title,
            description: description.unwrap_or_default().to_owned(),
        })
    }
}

/// Validated inputs for a [`Task`].
#[derive(Debug, Clone)]
pub struct TaskDraft {
    pub id: TaskId,
    pub owner: UserId,
    pub title: TaskTitle,
    pub description: String,
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A unit of work owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    owner: UserId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(draft: TaskDraft) -> Self {
        let TaskDraft {
            id,
            owner,
            title,
            description,
            status,
            created_at,
            updated_at,
        } = draft;
        Self {
            id,
            owner,
            title,
            description,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Overwrite the supplied fields and stamp the update time.
    pub fn apply(&mut self, changes: &TaskChanges, updated_at: DateTime<Utc>) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = updated_at;
    }
}

/// Partial update; `None` fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<TaskTitle>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskChanges {
    /// Validate raw update fields. A supplied title must not be blank.
    pub fn try_from_parts(
        title: Option<&str>,
        description: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        Ok(Self {
            title: title.map(TaskTitle::new).transpose()?,
            description: description.map(str::to_owned),
            status: status.map(TaskStatus::from_str).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// Restrictions applied when listing a user's tasks.
///
/// `search` matches titles as a literal, case-insensitive substring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: Option<String>,
    status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Build a filter from query values; empty strings count as absent.
    pub fn try_from_parts(
        search: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, TaskValidationError> {
        let search = search.filter(|term| !term.is_empty()).map(str::to_owned);
        let status = status
            .filter(|value| !value.is_empty())
            .map(TaskStatus::from_str)
            .transpose()?;
        Ok(Self { search, status })
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Whether `task` satisfies both restrictions.
    pub fn matches(&self, task: &Task) -> bool {
        let status_ok = self.status.is_none_or(|status| task.status() == status);
        let search_ok = self.search.as_deref().is_none_or(|term| {
            task.title()
                .as_ref()
                .to_lowercase()
                .contains(&term.to_lowercase())
        });
        status_ok && search_ok
    }
}
