//! Embedded PostgreSQL for repository integration tests.
//!
//! Every test provisions its own migrated database on a cluster shared by the
//! whole test binary. Where the cluster cannot start, set
//! `SKIP_TEST_CLUSTER=1` to skip instead of failing.

use std::sync::Once;

use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use recordkeeper::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use tokio::runtime::Runtime;
use uuid::Uuid;

const STABLE_PASSWORD: &str = "recordkeeper_embedded_test";

static PASSWORD_INIT: Once = Once::new();

/// Runtime and pool bound to one freshly migrated database.
///
/// Repository futures must run on `runtime`; pooled connections belong to it.
pub struct PgContext {
    pub runtime: Runtime,
    pub pool: DbPool,
    pub database_url: String,
}

impl PgContext {
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes`.
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Keep the cluster password stable across test binaries sharing a data
/// directory; the library otherwise generates a fresh one per process.
fn ensure_stable_password() {
    PASSWORD_INIT.call_once(|| {
        if std::env::var_os("PG_PASSWORD").is_none() {
            // SAFETY: runs once, before the cluster spawns any threads.
            unsafe {
                std::env::set_var("PG_PASSWORD", STABLE_PASSWORD);
            }
        }
    });
}

fn provision() -> Result<PgContext, String> {
    ensure_stable_password();
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;

    let name = format!("records_{}", Uuid::new_v4().simple());
    cluster
        .create_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    let database_url = cluster.connection().database_url(&name).to_string();

    runtime
        .block_on(run_migrations(&database_url))
        .map_err(|err| err.to_string())?;
    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(database_url.as_str()).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(PgContext {
        runtime,
        pool,
        database_url,
    })
}

/// Provision a database, or `None` when the cluster is unavailable and
/// skipping is enabled.
///
/// # Panics
/// Panics when setup fails and `SKIP_TEST_CLUSTER` is not set, so CI
/// breakage is never masked.
pub fn pg_context() -> Option<PgContext> {
    match provision() {
        Ok(context) => Some(context),
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}
