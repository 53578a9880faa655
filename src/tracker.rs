//! Task tracker: the operations behind every command.
//!
//! The tracker owns a [`LocalStorage`] and keeps tasks linked to their
//! project and context records. Projects and contexts are created on first
//! use and are never removed except by [`Tracker::destroy_all`].

use std::collections::HashMap;
use std::fmt::Write;
use std::path::Path;

use log::{debug, info};
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::entities::task;
use crate::repositories::{ContextRepository, ProjectRepository, TaskRepository};
use crate::storage::LocalStorage;
use crate::tagger::ParsedTask;

/// Errors surfaced by tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Context not found: {0}")]
    ContextNotFound(String),

    #[error("Storage unavailable at '{location}': {source}")]
    StorageUnavailable {
        location: String,
        #[source]
        source: sea_orm::DbErr,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for TrackerError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.into())
    }
}

impl TrackerError {
    /// True for the recoverable "no such project/context" case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProjectNotFound(_) | Self::ContextNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Render one task as `"{id}. {description}[ <project>][ [context]]"`.
pub fn render_task(task: &task::Model, project: Option<&str>, context: Option<&str>) -> String {
    let mut line = format!("{}. {}", task.id, task.description);
    if let Some(project) = project {
        let _ = write!(line, " <{}>", project);
    }
    if let Some(context) = context {
        let _ = write!(line, " [{}]", context);
    }
    line
}

pub struct Tracker {
    storage: LocalStorage,
}

impl Tracker {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    /// Close the underlying storage.
    pub async fn close(self) -> Result<()> {
        Ok(self.storage.close().await?)
    }

    pub async fn setup_schema(&self) -> Result<()> {
        Ok(self.storage.setup_schema().await?)
    }

    /// Parse `raw_text` for tags and store the resulting task.
    ///
    /// Tagged projects and contexts are looked up by exact name and created
    /// when missing. The whole insert runs in one transaction.
    pub async fn add_task(&self, raw_text: &str) -> Result<task::Model> {
        let parsed = ParsedTask::parse(raw_text);
        let txn = self.storage.conn.begin().await?;

        let project_id = match parsed.project.as_deref() {
            Some(name) => Some(ProjectRepository::find_or_create(&txn, name).await?.id),
            None => None,
        };
        let context_id = match parsed.context.as_deref() {
            Some(name) => Some(ContextRepository::find_or_create(&txn, name).await?.id),
            None => None,
        };

        let task = TaskRepository::create(&txn, &parsed.description, project_id, context_id).await?;
        txn.commit().await?;

        info!(
            "Added task {} (project: {:?}, context: {:?})",
            task.id, parsed.project, parsed.context
        );
        Ok(task)
    }

    /// Delete a task. Unknown ids are ignored.
    pub async fn remove_task(&self, id: i32) -> Result<()> {
        if TaskRepository::delete(&self.storage.conn, id).await? {
            info!("Removed task {}", id);
        } else {
            debug!("No task {} to remove", id);
        }
        Ok(())
    }

    /// Every task, rendered, in ascending id order.
    pub async fn list_tasks(&self) -> Result<Vec<String>> {
        let tasks = TaskRepository::get_all(&self.storage.conn).await?;
        self.render_all(&tasks).await
    }

    /// Tasks tagged with the named project, in creation order.
    pub async fn list_tasks_for_project(&self, name: &str) -> Result<Vec<String>> {
        let conn = &self.storage.conn;
        let project = ProjectRepository::get_by_name(conn, name)
            .await?
            .ok_or_else(|| TrackerError::ProjectNotFound(name.to_string()))?;
        let tasks = TaskRepository::get_for_project(conn, project.id).await?;
        self.render_all(&tasks).await
    }

    /// Tasks tagged with the named context, in creation order.
    pub async fn list_tasks_for_context(&self, name: &str) -> Result<Vec<String>> {
        let conn = &self.storage.conn;
        let context = ContextRepository::get_by_name(conn, name)
            .await?
            .ok_or_else(|| TrackerError::ContextNotFound(name.to_string()))?;
        let tasks = TaskRepository::get_for_context(conn, context.id).await?;
        self.render_all(&tasks).await
    }

    /// Bare descriptions of every task, in ascending id order.
    pub async fn dump(&self) -> Result<Vec<String>> {
        Ok(TaskRepository::get_all(&self.storage.conn)
            .await?
            .into_iter()
            .map(|task| task.description)
            .collect())
    }

    /// Write [`Tracker::dump`] to `path`, one description per line.
    pub async fn dump_to_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<String>> {
        let content = self.dump().await?;
        let mut text = content.join("\n");
        if !content.is_empty() {
            text.push('\n');
        }
        tokio::fs::write(&path, text).await?;

        info!("Dumped {} tasks to {}", content.len(), path.as_ref().display());
        Ok(content)
    }

    /// Create one untagged task per line. Tag-like text is kept verbatim.
    pub async fn import(&self, content: &str) -> Result<usize> {
        let txn = self.storage.conn.begin().await?;
        let mut created = 0;
        for line in content.lines() {
            TaskRepository::create(&txn, line, None, None).await?;
            created += 1;
        }
        txn.commit().await?;

        info!("Imported {} tasks", created);
        Ok(created)
    }

    pub async fn import_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let content = tokio::fs::read_to_string(&path).await?;
        self.import(&content).await
    }

    /// Remove every task, project and context. Ids start again at 1.
    pub async fn destroy_all(&self) -> Result<()> {
        Ok(self.storage.clear_all_data().await?)
    }

    async fn render_all(&self, tasks: &[task::Model]) -> Result<Vec<String>> {
        let (projects, contexts) = Self::load_names(&self.storage.conn).await?;
        Ok(tasks
            .iter()
            .map(|task| {
                let project = task.project_id.and_then(|id| projects.get(&id)).map(String::as_str);
                let context = task.context_id.and_then(|id| contexts.get(&id)).map(String::as_str);
                render_task(task, project, context)
            })
            .collect())
    }

    async fn load_names<C>(conn: &C) -> Result<(HashMap<i32, String>, HashMap<i32, String>)>
    where
        C: ConnectionTrait,
    {
        let projects = ProjectRepository::get_all(conn)
            .await?
            .into_iter()
            .map(|p| (p.id, p.name))
            .collect();
        let contexts = ContextRepository::get_all(conn)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();
        Ok((projects, contexts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i32, description: &str) -> task::Model {
        task::Model {
            id,
            description: description.to_string(),
            status: None,
            project_id: None,
            context_id: None,
        }
    }

    #[test]
    fn test_render_task_appends_tags() {
        let model = task(3, "call bob");
        assert_eq!(render_task(&model, None, None), "3. call bob");
        assert_eq!(render_task(&model, Some("house"), None), "3. call bob <house>");
        assert_eq!(render_task(&model, None, Some("phone")), "3. call bob [phone]");
        assert_eq!(render_task(&model, Some("house"), Some("phone")), "3. call bob <house> [phone]");
    }

    #[test]
    fn test_db_error_is_storage_error() {
        let err: TrackerError = sea_orm::DbErr::Custom("disk on fire".to_string()).into();
        assert!(matches!(err, TrackerError::Storage(_)));
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("disk on fire"));
    }
}
