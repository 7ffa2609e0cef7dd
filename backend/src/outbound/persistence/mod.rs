//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the user and task repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: Repository implementations only translate between
//!   Diesel models and domain types. No business logic resides here.
//! - **Internal models**: Diesel row structs (`models.rs`) and schema
//!   definitions (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: All database errors are mapped to domain
//!   persistence error types; driver messages are only logged.
//!
//! # Example
//!
//! ```ignore
//! use taskflow::outbound::persistence::{DbPool, PoolConfig, DieselTaskRepository};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/taskflow")).await?;
//! let repo = DieselTaskRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
