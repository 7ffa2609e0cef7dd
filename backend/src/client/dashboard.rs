//! Dashboard view model.
//!
//! Holds the UI state for one signed-in user: profile, task list, the
//! create-task draft, at most one in-progress edit and the current
//! search/status filter. Every filter change and every mutation re-fetches
//! the list from the server; nothing is cached or applied optimistically.

use tracing::debug;
use zeroize::Zeroizing;

use crate::client::Navigation;
use crate::client::api::{ApiError, ListFilter, TaskApi, TaskUpdate};
use crate::client::session::SessionContext;
use crate::domain::{Task, TaskId, TaskStatus, User};

/// Per-task controls the dashboard offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Complete,
    Edit,
    Delete,
}

impl TaskAction {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

/// Controls offered for `task`; completion only while it is pending.
pub fn actions_for(task: &Task) -> &'static [TaskAction] {
    match task.status() {
        TaskStatus::Pending => &[TaskAction::Complete, TaskAction::Edit, TaskAction::Delete],
        TaskStatus::Completed => &[TaskAction::Edit, TaskAction::Delete],
    }
}

/// Contents of the create-task form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraftForm {
    pub title: String,
    pub description: String,
}

/// The edit in progress, seeded from the task being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    id: TaskId,
    pub title: String,
    pub description: String,
}

impl EditDraft {
    pub fn id(&self) -> TaskId {
        self.id
    }
}

/// Dashboard failures. API errors pass through untouched.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("task {0} is not in the current list")]
    UnknownTask(TaskId),
    #[error("{} is not offered for task {id}", action.label())]
    ActionNotOffered { action: TaskAction, id: TaskId },
    #[error("no edit in progress")]
    NotEditing,
}

/// Result of opening the dashboard.
pub enum DashboardLoad<'a> {
    Ready(Dashboard<'a>),
    /// No stored token; the login page must be shown instead.
    RedirectToLogin,
}

/// Signed-in task view.
pub struct Dashboard<'a> {
    api: &'a dyn TaskApi,
    token: Zeroizing<String>,
    profile: User,
    tasks: Vec<Task>,
    filter: ListFilter,
    editing: Option<EditDraft>,
    pub new_task: TaskDraftForm,
}

impl std::fmt::Debug for Dashboard<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("profile", &self.profile)
            .field("tasks", &self.tasks.len())
            .field("filter", &self.filter)
            .field("editing", &self.editing)
            .finish_non_exhaustive()
    }
}

impl<'a> Dashboard<'a> {
    /// Load profile and tasks for the session's user.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] when either initial fetch fails.
    pub async fn open(
        api: &'a dyn TaskApi,
        session: &SessionContext,
    ) -> Result<DashboardLoad<'a>, DashboardError> {
        Self::open_with_filter(api, session, ListFilter::default()).await
    }

    /// As [`Self::open`], starting from `filter` instead of the full list.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] when either initial fetch fails.
    pub async fn open_with_filter(
        api: &'a dyn TaskApi,
        session: &SessionContext,
        filter: ListFilter,
    ) -> Result<DashboardLoad<'a>, DashboardError> {
        let Some(token) = session.token() else {
            return Ok(DashboardLoad::RedirectToLogin);
        };
        let token = Zeroizing::new(token.to_owned());
        let profile = api.profile(&token).await?;
        let tasks = api.list_tasks(&token, &filter).await?;
        Ok(DashboardLoad::Ready(Self {
            api,
            token,
            profile,
            tasks,
            filter,
            editing: None,
            new_task: TaskDraftForm::default(),
        }))
    }

    pub fn profile(&self) -> &User {
        &self.profile
    }

    /// Tasks as last fetched, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> &ListFilter {
        &self.filter
    }

    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    pub fn editing_mut(&mut self) -> Option<&mut EditDraft> {
        self.editing.as_mut()
    }

    fn find(&self, id: TaskId) -> Result<&Task, DashboardError> {
        self.tasks
            .iter()
            .find(|task| task.id() == id)
            .ok_or(DashboardError::UnknownTask(id))
    }

    /// Re-fetch the list with the current filter.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] when the fetch fails; the previous
    /// list is kept.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.tasks = self.api.list_tasks(&self.token, &self.filter).await?;
        debug!(count = self.tasks.len(), "task list refreshed");
        Ok(())
    }

    /// Change the search term; an empty term clears it.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::refresh`] failures.
    pub async fn set_search(&mut self, term: impl Into<String>) -> Result<(), DashboardError> {
        let term = term.into();
        self.filter.search = (!term.is_empty()).then_some(term);
        self.refresh().await
    }

    /// Change the status filter; `None` shows every status.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::refresh`] failures.
    pub async fn set_status_filter(
        &mut self,
        status: Option<TaskStatus>,
    ) -> Result<(), DashboardError> {
        self.filter.status = status;
        self.refresh().await
    }

    /// Submit the create-task form. An empty title does nothing and returns
    /// `false`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Api`] when creation or the refresh fails.
    pub async fn create_task(&mut self) -> Result<bool, DashboardError> {
        if self.new_task.title.trim().is_empty() {
            return Ok(false);
        }
        self.api
            .create_task(
                &self.token,
                &self.new_task.title,
                &self.new_task.description,
            )
            .await?;
        self.new_task = TaskDraftForm::default();
        self.refresh().await?;
        Ok(true)
    }

    /// Mark a pending task as completed.
    ///
    /// # Errors
    ///
    /// Fails with [`DashboardError::ActionNotOffered`] for completed tasks
    /// and [`DashboardError::UnknownTask`] for tasks not in the list.
    pub async fn mark_complete(&mut self, id: TaskId) -> Result<(), DashboardError> {
        if !actions_for(self.find(id)?).contains(&TaskAction::Complete) {
            return Err(DashboardError::ActionNotOffered {
                action: TaskAction::Complete,
                id,
            });
        }
        let update = TaskUpdate {
            status: Some(TaskStatus::Completed),
            ..TaskUpdate::default()
        };
        self.api.update_task(&self.token, id, &update).await?;
        self.refresh().await
    }

    /// Begin editing `id`, replacing any edit already in progress.
    ///
    /// # Errors
    ///
    /// Fails with [`DashboardError::UnknownTask`] for tasks not in the list.
    pub fn start_edit(&mut self, id: TaskId) -> Result<&mut EditDraft, DashboardError> {
        let task = self.find(id)?;
        let draft = EditDraft {
            id,
            title: task.title().to_string(),
            description: task.description().to_owned(),
        };
        Ok(self.editing.insert(draft))
    }

    /// Abandon the edit in progress, if any.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Send the edited title and description. The edit stays open if the
    /// server rejects it.
    ///
    /// # Errors
    ///
    /// Fails with [`DashboardError::NotEditing`] when no edit is open, or
    /// [`DashboardError::Api`] when the update or refresh fails.
    pub async fn save_edit(&mut self) -> Result<(), DashboardError> {
        let draft = self.editing.as_ref().ok_or(DashboardError::NotEditing)?;
        let update = TaskUpdate {
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            status: None,
        };
        self.api.update_task(&self.token, draft.id, &update).await?;
        self.editing = None;
        self.refresh().await
    }

    /// Delete a task shown in the list.
    ///
    /// # Errors
    ///
    /// Fails with [`DashboardError::UnknownTask`] for tasks not in the list,
    /// or [`DashboardError::Api`] when the delete or refresh fails.
    pub async fn delete_task(&mut self, id: TaskId) -> Result<(), DashboardError> {
        self.find(id)?;
        self.api.delete_task(&self.token, id).await?;
        if self.editing.as_ref().is_some_and(|draft| draft.id == id) {
            self.editing = None;
        }
        self.refresh().await
    }

    /// Clear the session and return to the login page.
    ///
    /// # Errors
    ///
    /// Returns the token file removal error.
    pub fn logout(self, session: &mut SessionContext) -> std::io::Result<Navigation> {
        session.sign_out()?;
        Ok(Navigation::Login)
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;
