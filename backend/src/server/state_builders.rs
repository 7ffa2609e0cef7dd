//! Builders wiring domain services onto repository adapters.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use taskflow::domain::ports::{TaskRepository, UserRepository};
use taskflow::domain::{AccountService, TaskService};
use taskflow::inbound::http::state::HttpState;
use taskflow::outbound::memory::{MemoryTaskRepository, MemoryUserRepository};
use taskflow::outbound::persistence::{DieselTaskRepository, DieselUserRepository};
use taskflow::outbound::security::{Argon2CredentialHasher, JwtTokenCodec};

use super::ServerConfig;

/// Wire account and task services over the supplied repositories.
fn services_over<U, T>(config: &ServerConfig, users: Arc<U>, tasks: Arc<T>) -> HttpState
where
    U: UserRepository + 'static,
    T: TaskRepository + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let accounts = AccountService::new(
        users,
        Arc::new(Argon2CredentialHasher::new()),
        Arc::new(JwtTokenCodec::new(&config.token_secret, config.token_ttl)),
        clock.clone(),
    );
    let task_service = TaskService::new(tasks, clock);
    HttpState::from_services(Arc::new(accounts), Arc::new(task_service))
}

/// Build HTTP state backed by PostgreSQL when a pool is configured, or by
/// process-local memory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => services_over(
            config,
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTaskRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; accounts and tasks are kept in memory");
            services_over(
                config,
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryTaskRepository::new()),
            )
        }
    }
}
