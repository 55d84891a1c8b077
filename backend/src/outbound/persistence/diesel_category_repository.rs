//! PostgreSQL-backed `CategoryRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CategoryRepository, CategoryRepositoryError};
use crate::domain::Category;

use super::models::CategoryRow;
use super::pool::DbPool;
use super::schema::categories;
use super::StoreFailure;

/// Diesel-backed implementation of the category repository port.
#[derive(Clone)]
pub struct DieselCategoryRepository {
    pool: DbPool,
}

impl DieselCategoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for DieselCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(CategoryRepositoryError::from_pool)?;
        let rows: Vec<CategoryRow> = categories::table
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(CategoryRepositoryError::from_diesel)?;
        Ok(rows.into_iter().map(Category::from).collect())
    }
}
