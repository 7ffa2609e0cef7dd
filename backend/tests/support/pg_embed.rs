//! Embedded PostgreSQL for repository integration tests.
//!
//! One cluster is shared by the whole test binary; every test gets its own
//! temporary database with the embedded migrations applied. Set
//! `SKIP_TEST_CLUSTER=1` where the cluster cannot start to skip these suites
//! instead of failing them.

use std::time::Duration;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use taskflow::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;

const SHARED_CLUSTER_RETRIES: u32 = 3;
const RETRY_DELAY_MS: u64 = 500;

/// A migrated temporary database plus the runtime that owns its pool.
/// Fields drop in order: the pool closes before its runtime and database.
pub struct MigratedDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    _database: TemporaryDatabase,
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    let mut attempt = 0;
    loop {
        match pg_embedded_setup_unpriv::test_support::shared_cluster_handle() {
            Ok(handle) => return Ok(handle),
            Err(err) if attempt < SHARED_CLUSTER_RETRIES => {
                let delay = Duration::from_millis(RETRY_DELAY_MS * (1 << attempt));
                eprintln!("pg-embed: cluster start failed, retrying in {delay:?}: {err:?}");
                std::thread::sleep(delay);
                attempt += 1;
            }
            Err(err) => return Err(format!("{err:?}")),
        }
    }
}

/// Provision a fresh database, run migrations and open a small pool on it.
pub fn migrated_database() -> Result<MigratedDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = cluster
        .create_temporary_database()
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();

    let pool = runtime.block_on(async {
        run_pending_migrations(&url)
            .await
            .map_err(|err| err.to_string())?;
        DbPool::new(PoolConfig::new(url.as_str()).with_max_size(2))
            .await
            .map_err(|err| err.to_string())
    })?;

    Ok(MigratedDatabase {
        pool,
        runtime,
        _database: database,
    })
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}
