//! Plain-text rendering of client views.

use std::fmt::Write as _;

use chrono::SecondsFormat;

use crate::client::dashboard::{Dashboard, actions_for};
use crate::domain::{Task, TaskStatus, User};

const NO_TASKS: &str = "No tasks found.";

/// One-line-per-field profile summary.
pub fn render_profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}>", user.name(), user.email());
    if let Some(role) = user.role_title() {
        let _ = writeln!(out, "Role: {role}");
    }
    if let Some(bio) = user.bio() {
        let _ = writeln!(out, "Bio: {bio}");
    }
    let _ = writeln!(
        out,
        "Member since {}",
        user.created_at().to_rfc3339_opts(SecondsFormat::Secs, true)
    );
    out
}

/// A task line followed by its description and offered actions.
pub fn render_task(task: &Task) -> String {
    let mut out = String::new();
    let mark = match task.status() {
        TaskStatus::Completed => 'x',
        TaskStatus::Pending => ' ',
    };
    let _ = writeln!(out, "[{mark}] {}  {}", task.title(), task.id());
    if !task.description().is_empty() {
        let _ = writeln!(out, "    {}", task.description());
    }
    let actions: Vec<&str> = actions_for(task).iter().map(|action| action.label()).collect();
    let _ = writeln!(
        out,
        "    {} | created {} | actions: {}",
        task.status(),
        task.created_at().to_rfc3339_opts(SecondsFormat::Secs, true),
        actions.join(", ")
    );
    out
}

/// Whole dashboard: greeting, active filters, then tasks newest first.
pub fn render_dashboard(dashboard: &Dashboard<'_>) -> String {
    let mut out = format!("Signed in as {}\n", dashboard.profile().name());
    let filter = dashboard.filter();
    if let Some(term) = filter.search.as_deref() {
        let _ = writeln!(out, "Search: {term}");
    }
    if let Some(status) = filter.status {
        let _ = writeln!(out, "Status: {status}");
    }
    if let Some(draft) = dashboard.editing() {
        let _ = writeln!(out, "Editing {}: {}", draft.id(), draft.title);
    }
    out.push('\n');
    render_tasks_into(&mut out, dashboard.tasks());
    out
}

/// Task list alone, or a placeholder when it is empty.
pub fn render_tasks(tasks: &[Task]) -> String {
    let mut out = String::new();
    render_tasks_into(&mut out, tasks);
    out
}

fn render_tasks_into(out: &mut String, tasks: &[Task]) {
    if tasks.is_empty() {
        out.push_str(NO_TASKS);
        out.push('\n');
        return;
    }
    for task in tasks {
        out.push_str(&render_task(task));
    }
}
