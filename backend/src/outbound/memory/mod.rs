//! Process-local repositories used when no database is configured.
//!
//! State lives for the lifetime of the server process only. Both adapters
//! honour the same port contracts as their Diesel counterparts: emails are
//! unique, and task reads and mutations are scoped to the owner.

mod task_repository;
mod user_repository;

pub use task_repository::MemoryTaskRepository;
pub use user_repository::MemoryUserRepository;

fn poisoned(store: &str) -> String {
    format!("{store} store lock poisoned")
}
