//! Port for category reads.

use async_trait::async_trait;

use crate::domain::Category;

/// Errors raised by category repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryRepositoryError {
    /// Repository connection could not be established.
    #[error("category repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query failed during execution.
    #[error("category repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl CategoryRepositoryError {
    /// Construct a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Construct a query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for reading category records. Categories are read-only here.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories in storage-native order.
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError>;
}

/// In-memory repository for tests and fixtures.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct InMemoryCategoryRepository {
    categories: Vec<Category>,
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryCategoryRepository {
    /// Create a repository seeded with the given categories.
    #[must_use]
    pub fn seeded(categories: Vec<Category>) -> Self {
        Self { categories }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, CategoryRepositoryError> {
        Ok(self.categories.clone())
    }
}
