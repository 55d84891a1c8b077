//! Ports to the storage collaborator.
//!
//! Adapters in `outbound::persistence` implement these traits against
//! PostgreSQL; tests substitute the in-memory implementations.

mod category_repository;
mod question_repository;

pub use category_repository::{CategoryRepository, CategoryRepositoryError};
pub use question_repository::{CommitMode, QuestionRepository, QuestionRepositoryError};

#[cfg(any(test, feature = "test-support"))]
pub use category_repository::InMemoryCategoryRepository;
#[cfg(any(test, feature = "test-support"))]
pub use question_repository::InMemoryQuestionRepository;
