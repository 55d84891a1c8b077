//! Diesel persistence adapters for the storage ports.

use tracing::debug;

use crate::domain::ports::{CategoryRepositoryError, QuestionRepositoryError};

mod diesel_category_repository;
mod diesel_question_repository;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_question_repository::DieselQuestionRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Storage-failure constructors shared by the repository error types.
///
/// The default methods translate pool and Diesel failures uniformly across
/// the adapters. Details are logged rather than propagated so nothing SQL
/// shaped reaches client-facing messages.
pub(crate) trait StoreFailure: Sized {
    fn connection_failure(message: String) -> Self;
    fn query_failure(message: String) -> Self;

    fn from_pool(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::connection_failure(message)
            }
        }
    }

    /// Closed connections are connection failures; everything else is a
    /// query failure.
    fn from_diesel(error: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error as DieselError};

        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::NotFound => Self::query_failure("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => {
                Self::query_failure("database query error".to_owned())
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::connection_failure("database connection error".to_owned())
            }
            _ => Self::query_failure("database error".to_owned()),
        }
    }
}

impl StoreFailure for QuestionRepositoryError {
    fn connection_failure(message: String) -> Self {
        Self::connection(message)
    }

    fn query_failure(message: String) -> Self {
        Self::query(message)
    }
}

impl StoreFailure for CategoryRepositoryError {
    fn connection_failure(message: String) -> Self {
        Self::connection(message)
    }

    fn query_failure(message: String) -> Self {
        Self::query(message)
    }
}
