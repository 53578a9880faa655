//! Context repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};

use crate::entities::context;

/// Repository for context-related database operations.
pub struct ContextRepository;

impl ContextRepository {
    /// Get all contexts ordered by id.
    pub async fn get_all<C>(conn: &C) -> Result<Vec<context::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(context::Entity::find().order_by_asc(context::Column::Id).all(conn).await?)
    }

    /// Get a single context by id.
    pub async fn get_by_id<C>(conn: &C, id: i32) -> Result<Option<context::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(context::Entity::find_by_id(id).one(conn).await?)
    }

    /// Get a single context by exact, case-sensitive name.
    pub async fn get_by_name<C>(conn: &C, name: &str) -> Result<Option<context::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(context::Entity::find().filter(context::Column::Name.eq(name)).one(conn).await?)
    }

    /// Return the context with this name, inserting it on a miss.
    pub async fn find_or_create<C>(conn: &C, name: &str) -> Result<context::Model>
    where
        C: ConnectionTrait,
    {
        if let Some(existing) = Self::get_by_name(conn, name).await? {
            return Ok(existing);
        }

        let model = context::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            ..Default::default()
        };
        Ok(model.insert(conn).await?)
    }

    /// Delete every context.
    pub async fn delete_all<C>(conn: &C) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(context::Entity::delete_many().exec(conn).await?.rows_affected)
    }
}
