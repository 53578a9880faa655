//! Task repository for database operations.

use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::entities::task;

/// Repository for task-related database operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Insert a task and return it with its assigned id.
    pub async fn create<C>(
        conn: &C,
        description: &str,
        project_id: Option<i32>,
        context_id: Option<i32>,
    ) -> Result<task::Model>
    where
        C: ConnectionTrait,
    {
        let model = task::ActiveModel {
            description: ActiveValue::Set(description.to_string()),
            project_id: ActiveValue::Set(project_id),
            context_id: ActiveValue::Set(context_id),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    /// Get all tasks in ascending id order.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find().order_by_asc(task::Column::Id).all(conn).await?)
    }

    /// Get a single task by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get all tasks linked to a project, in creation order.
    pub async fn get_for_project<C>(conn: &C, project_id: i32) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find()
            .filter(task::Column::ProjectId.eq(project_id))
            .order_by_asc(task::Column::Id)
            .all(conn)
            .await?)
    }

    /// Get all tasks linked to a context, in creation order.
    pub async fn get_for_context<C>(conn: &C, context_id: i32) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find()
            .filter(task::Column::ContextId.eq(context_id))
            .order_by_asc(task::Column::Id)
            .all(conn)
            .await?)
    }

    pub async fn count<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find().count(conn).await?)
    }

    /// Delete a task by id. Returns whether a row was removed.
    pub async fn delete<C>(conn: &C, id: i32) -> Result<bool>
    where
        C: ConnectionTrait,
    {
        let result = task::Entity::delete_by_id(id).exec(conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Delete every task.
    pub async fn delete_all<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::delete_many().exec(conn).await?.rows_affected)
    }
}
