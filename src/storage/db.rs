use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use log::{debug, info};
use sea_orm::sqlx::{sqlite::SqliteConnection, Connection};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityName, Schema, Statement, TransactionTrait,
};

use crate::entities::{context, project, task};
use crate::repositories::{ContextRepository, ProjectRepository, TaskRepository};
use crate::tracker::TrackerError;

/// Location string that selects a private in-memory database.
pub const MEMORY_LOCATION: &str = ":memory:";

/// Default upper bound on how long a pooled connection is kept.
pub const DEFAULT_MAX_LIFETIME: Duration = Duration::from_secs(30 * 60);

static MEMORY_DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Local storage manager backed by SQLite.
pub struct LocalStorage {
    pub conn: DatabaseConnection,
    location: String,
    // Holds a shared-cache in-memory database open while pool connections rotate.
    anchor: Option<SqliteConnection>,
}

impl LocalStorage {
    /// Open the database at `location`, creating the file if it does not exist.
    ///
    /// `location` is either a filesystem path or [`MEMORY_LOCATION`].
    pub async fn open(location: &str) -> Result<Self, TrackerError> {
        Self::open_with_lifetime(location, DEFAULT_MAX_LIFETIME).await
    }

    /// Like [`LocalStorage::open`], with an explicit pooled connection lifetime.
    pub async fn open_with_lifetime(location: &str, max_lifetime: Duration) -> Result<Self, TrackerError> {
        let database_url = Self::database_url(location);
        let unavailable = |source: sea_orm::DbErr| TrackerError::StorageUnavailable {
            location: location.to_string(),
            source,
        };

        // Anchor connection outside the pool
        let anchor = if location == MEMORY_LOCATION {
            let anchor = SqliteConnection::connect(&database_url)
                .await
                .map_err(|e| unavailable(sea_orm::DbErr::Conn(sea_orm::RuntimeErr::Internal(e.to_string()))))?;
            Some(anchor)
        } else {
            None
        };

        let mut options = ConnectOptions::new(database_url);
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(Duration::from_secs(3600))
            .max_lifetime(max_lifetime)
            .sqlx_logging(false);

        let conn = Database::connect(options).await.map_err(unavailable)?;

        info!("Opened task database at {}", location);
        Ok(Self {
            conn,
            location: location.to_string(),
            anchor,
        })
    }

    /// Open an empty in-memory database with the schema in place.
    pub async fn in_memory() -> Result<Self, TrackerError> {
        let storage = Self::open(MEMORY_LOCATION).await?;
        storage.setup_schema().await?;
        Ok(storage)
    }

    fn database_url(location: &str) -> String {
        if location == MEMORY_LOCATION {
            // Named so every pool connection and the anchor see the same database.
            let id = MEMORY_DB_COUNTER.fetch_add(1, Ordering::Relaxed);
            format!(
                "sqlite:file:pocketgtd_memdb_{}_{}?mode=memory&cache=shared",
                std::process::id(),
                id
            )
        } else {
            format!("sqlite://{}?mode=rwc", Path::new(location).display())
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Release the underlying connection pool.
    pub async fn close(self) -> Result<()> {
        debug!("Closing task database at {}", self.location);
        self.conn.close().await?;
        if let Some(anchor) = self.anchor {
            anchor.close().await?;
        }
        Ok(())
    }

    /// Create the tasks, projects and contexts tables if they are missing.
    pub async fn setup_schema(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        // Parents first so the task foreign keys have something to point at.
        let mut projects = schema.create_table_from_entity(project::Entity);
        let mut contexts = schema.create_table_from_entity(context::Entity);
        let mut tasks = schema.create_table_from_entity(task::Entity);

        for stmt in [projects.if_not_exists(), contexts.if_not_exists(), tasks.if_not_exists()] {
            self.conn.execute(backend.build(&*stmt)).await?;
        }

        info!("Task schema ready");
        Ok(())
    }

    /// Check whether the schema has been created.
    pub async fn has_schema(&self) -> Result<bool> {
        let backend = self.conn.get_database_backend();
        let row = self
            .conn
            .query_one(Statement::from_sql_and_values(
                backend,
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                ["tasks".into()],
            ))
            .await?;
        Ok(row.is_some())
    }

    /// Check if the database holds any tasks
    pub async fn has_data(&self) -> Result<bool> {
        Ok(TaskRepository::count(&self.conn).await? > 0)
    }

    /// Clear all data and restart id numbering.
    pub async fn clear_all_data(&self) -> Result<()> {
        let txn = self.conn.begin().await?;

        // Tasks reference projects and contexts, so they go first.
        let tasks = TaskRepository::delete_all(&txn).await?;
        let projects = ProjectRepository::delete_all(&txn).await?;
        let contexts = ContextRepository::delete_all(&txn).await?;

        // AUTOINCREMENT counters survive row deletion; drop them so ids start at 1.
        let has_sequence = txn
            .query_one(Statement::from_string(
                txn.get_database_backend(),
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'",
            ))
            .await?
            .is_some();
        if has_sequence {
            txn.execute_unprepared(&format!(
                "DELETE FROM sqlite_sequence WHERE name IN ('{}', '{}', '{}')",
                task::Entity.table_name(),
                project::Entity.table_name(),
                context::Entity.table_name(),
            ))
            .await?;
        }

        txn.commit().await?;
        info!(
            "Cleared {} tasks, {} projects and {} contexts",
            tasks, projects, contexts
        );
        Ok(())
    }
}
