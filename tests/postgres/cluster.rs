//! Cluster lifecycle helpers for `PostgreSQL` integration tests.

use diesel::prelude::*;
use postgresql_embedded::PostgreSQL;
use std::sync::OnceLock;
use tokio::runtime::{Builder, Runtime};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

static SHARED_CLUSTER: OnceLock<Result<ManagedCluster, String>> = OnceLock::new();

/// Shared `PostgreSQL` cluster handle for integration tests.
pub type PostgresCluster = &'static ManagedCluster;

/// Embedded `PostgreSQL` server shared by every test in the binary.
///
/// The server runs on its own runtime so test runtimes can come and go.
pub struct ManagedCluster {
    postgres: PostgreSQL,
    _runtime: Runtime,
}

impl ManagedCluster {
    fn new() -> Result<Self, BoxError> {
        let runtime = Builder::new_multi_thread().enable_all().build()?;
        let mut postgres = PostgreSQL::default();
        runtime.block_on(async {
            postgres.setup().await?;
            postgres.start().await
        })?;
        Ok(Self {
            postgres,
            _runtime: runtime,
        })
    }

    /// Returns the connection URL of `database` on this cluster.
    #[must_use]
    pub fn database_url(&self, database: &str) -> String {
        self.postgres.settings().url(database)
    }

    /// Creates an empty database that is dropped with the returned guard.
    pub async fn temporary_database(
        &'static self,
        name: String,
    ) -> Result<TemporaryDatabase, BoxError> {
        let cluster = self;
        tokio::task::spawn_blocking(move || {
            let sql = format!("CREATE DATABASE {}", quote_identifier(&name));
            cluster.execute_admin_sql(&sql)?;
            Ok(TemporaryDatabase {
                cluster,
                url: cluster.database_url(&name),
                name,
            })
        })
        .await?
    }

    fn execute_admin_sql(&self, sql: &str) -> Result<(), BoxError> {
        let mut conn = PgConnection::establish(&self.database_url("postgres"))?;
        diesel::sql_query(sql).execute(&mut conn)?;
        Ok(())
    }
}

/// Database dropped when the guard goes out of scope.
pub struct TemporaryDatabase {
    cluster: PostgresCluster,
    name: String,
    url: String,
}

impl TemporaryDatabase {
    /// Returns the connection URL of this database.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for TemporaryDatabase {
    fn drop(&mut self) {
        let sql = format!(
            "DROP DATABASE IF EXISTS {} WITH (FORCE)",
            quote_identifier(&self.name)
        );
        drop(self.cluster.execute_admin_sql(&sql));
    }
}

/// Returns the shared cluster, starting it on first use.
///
/// # Errors
///
/// Returns the startup failure, repeated for every caller.
pub fn shared_cluster() -> Result<PostgresCluster, BoxError> {
    // Started off the test runtime: the cluster owns a runtime of its own.
    let cluster = SHARED_CLUSTER.get_or_init(|| {
        std::thread::spawn(|| ManagedCluster::new().map_err(|err| err.to_string()))
            .join()
            .unwrap_or_else(|_| Err("cluster startup panicked".to_owned()))
    });
    cluster
        .as_ref()
        .map_err(|err| format!("failed to start PostgreSQL: {err}").into())
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
