//! Project repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::project;

/// Repository for project-related database operations.
pub struct ProjectRepository;

impl ProjectRepository {
    /// Get all projects ordered by id.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find().order_by_asc(project::Column::Id).all(conn).await?)
    }

    /// Get a single project by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single project by exact, case-sensitive name.
    pub async fn get_by_name<C>(conn: &C, name: &str) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find().filter(project::Column::Name.eq(name)).one(conn).await?)
    }

    /// Return the project with this name, inserting it on a miss.
    pub async fn find_or_create<C>(conn: &C, name: &str) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        if let Some(existing) = Self::get_by_name(conn, name).await? {
            return Ok(existing);
        }

        let model = project::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    /// Delete every project.
    pub async fn delete_all<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::delete_many().exec(conn).await?.rows_affected)
    }
}
