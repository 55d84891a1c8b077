//! Port for question persistence and query shaping.
//!
//! The storage collaborator is treated as a black box supporting ordered
//! fetches, equality and substring filters, exclusion sets, inserts, and
//! deletes. Pagination slicing is not part of this port; it belongs to the
//! [`crate::domain::QuestionService`].

#[cfg(any(test, feature = "test-support"))]
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{NewQuestion, Question};

/// Errors raised by question repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionRepositoryError {
    /// Repository connection could not be established.
    #[error("question repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("question repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
    /// The targeted question does not exist.
    #[error("question {id} not found")]
    NotFound {
        /// Identifier that matched no row.
        id: i32,
    },
}

impl QuestionRepositoryError {
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

    /// Construct a not-found error for the given identifier.
    #[must_use]
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }
}

/// Whether an insert is finalised or staged and rolled back.
///
/// `DryRun` exists for test isolation: the write is executed far enough to
/// observe the store-assigned identifier, then discarded. It is an explicit
/// parameter rather than ambient state so production call sites always read
/// as `CommitMode::Commit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    /// Persist the write.
    Commit,
    /// Stage the write and roll it back before returning.
    DryRun,
}

/// Port for reading and mutating question records.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// All questions ordered by ascending identifier, optionally restricted
    /// to one category by equality.
    async fn list_ordered(
        &self,
        category: Option<i32>,
    ) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Questions whose category equals `category`, in storage-native order.
    async fn find_by_category(
        &self,
        category: i32,
    ) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Questions whose text contains `term` as a case-insensitive substring.
    async fn search(&self, term: &str) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Questions in `category` whose identifier is not in `excluded`.
    async fn quiz_candidates(
        &self,
        category: i32,
        excluded: &[i32],
    ) -> Result<Vec<Question>, QuestionRepositoryError>;

    /// Persist a new question and return it with its assigned identifier.
    async fn insert(
        &self,
        draft: &NewQuestion,
        mode: CommitMode,
    ) -> Result<Question, QuestionRepositoryError>;

    /// Delete the question with the given identifier.
    ///
    /// Returns [`QuestionRepositoryError::NotFound`] when no row matches.
    async fn delete(&self, id: i32) -> Result<(), QuestionRepositoryError>;
}

/// In-memory repository for tests and fixtures.
///
/// Mirrors the contract of the Diesel adapter closely enough for endpoint
/// tests: identifiers are assigned from a monotonically increasing counter
/// and a dry-run insert consumes an identifier without storing the row, as a
/// rolled-back PostgreSQL `serial` would.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct InMemoryQuestionRepository {
    state: Mutex<InMemoryState>,
}

#[cfg(any(test, feature = "test-support"))]
#[derive(Debug)]
struct InMemoryState {
    questions: Vec<Question>,
    next_id: i32,
}

#[cfg(any(test, feature = "test-support"))]
impl Default for InMemoryState {
    fn default() -> Self {
        // Serial columns start at 1.
        Self {
            questions: Vec::new(),
            next_id: 1,
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
impl InMemoryQuestionRepository {
    /// Create a repository seeded with the given questions.
    #[must_use]
    pub fn seeded(questions: Vec<Question>) -> Self {
        let next_id = questions.iter().map(|q| q.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(InMemoryState { questions, next_id }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, InMemoryState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn list_ordered(
        &self,
        category: Option<i32>,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let state = self.lock();
        let mut questions: Vec<Question> = state
            .questions
            .iter()
            .filter(|q| category.is_none_or(|c| q.category == c))
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }

    async fn find_by_category(
        &self,
        category: i32,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let state = self.lock();
        Ok(state
            .questions
            .iter()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Question>, QuestionRepositoryError> {
        let needle = term.to_lowercase();
        let state = self.lock();
        Ok(state
            .questions
            .iter()
            .filter(|q| q.question.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn quiz_candidates(
        &self,
        category: i32,
        excluded: &[i32],
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let state = self.lock();
        Ok(state
            .questions
            .iter()
            .filter(|q| q.category == category && !excluded.contains(&q.id))
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        draft: &NewQuestion,
        mode: CommitMode,
    ) -> Result<Question, QuestionRepositoryError> {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        let question = Question {
            id,
            question: draft.question().to_owned(),
            answer: draft.answer().to_owned(),
            category: draft.category(),
            difficulty: draft.difficulty(),
        };
        if matches!(mode, CommitMode::Commit) {
            state.questions.push(question.clone());
        }
        Ok(question)
    }

    async fn delete(&self, id: i32) -> Result<(), QuestionRepositoryError> {
        let mut state = self.lock();
        let before = state.questions.len();
        state.questions.retain(|q| q.id != id);
        if state.questions.len() == before {
            return Err(QuestionRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i32, text: &str, category: i32) -> Question {
        Question {
            id,
            question: text.to_owned(),
            answer: "a".to_owned(),
            category,
            difficulty: 1,
        }
    }

    #[tokio::test]
    async fn list_ordered_sorts_by_id_and_honours_filter() {
        let repo = InMemoryQuestionRepository::seeded(vec![
            question(3, "c", 1),
            question(1, "a", 1),
            question(2, "b", 2),
        ]);

        let all = repo.list_ordered(None).await.expect("list");
        assert_eq!(all.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2, 3]);

        let filtered = repo.list_ordered(Some(1)).await.expect("list");
        assert_eq!(
            filtered.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let repo = InMemoryQuestionRepository::seeded(vec![
            question(1, "Which AND gate?", 1),
            question(2, "unrelated", 1),
        ]);

        let upper = repo.search("AND").await.expect("search");
        let lower = repo.search("and").await.expect("search");
        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
    }

    #[tokio::test]
    async fn dry_run_insert_assigns_an_id_without_storing() {
        let repo = InMemoryQuestionRepository::default();
        let draft = NewQuestion::new("A?", "B", 1, 1).expect("draft");

        let staged = repo.insert(&draft, CommitMode::DryRun).await.expect("insert");
        assert_eq!(staged.id, 1);
        assert!(repo.list_ordered(None).await.expect("list").is_empty());

        let committed = repo.insert(&draft, CommitMode::Commit).await.expect("insert");
        assert_eq!(committed.id, 2);
        assert_eq!(repo.list_ordered(None).await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn delete_missing_row_is_not_found() {
        let repo = InMemoryQuestionRepository::default();
        assert_eq!(
            repo.delete(41).await,
            Err(QuestionRepositoryError::not_found(41))
        );
    }
}
