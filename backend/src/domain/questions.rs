//! Question Access Layer.
//!
//! Pagination, category filtering, substring search, and quiz candidate
//! selection over the [`QuestionRepository`] port. The service is stateless:
//! every call is a self-contained read or read-modify-write delegated to the
//! storage collaborator.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::domain::ports::{CommitMode, QuestionRepository, QuestionRepositoryError};
use crate::domain::{Error, NewQuestion, Question};

/// Fixed page size for question listings.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// One page of questions plus the total count matching the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    /// The page's worth of questions, at most [`QUESTIONS_PER_PAGE`].
    pub questions: Vec<Question>,
    /// Total number of questions matching the filter, across all pages.
    pub total: usize,
}

/// Outcome of asking for the next quiz question.
///
/// Exhaustion is an expected end state of normal play, so it is a variant
/// here rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    /// A question chosen uniformly at random from the unseen candidates.
    Question(Question),
    /// Every question in the category has already been seen.
    Exhausted,
}

/// Query-shaping service over question storage.
#[derive(Clone)]
pub struct QuestionService {
    repository: Arc<dyn QuestionRepository>,
}

fn map_repository_error(error: QuestionRepositoryError) -> Error {
    match error {
        QuestionRepositoryError::Connection { message }
        | QuestionRepositoryError::Query { message } => Error::internal(message),
        QuestionRepositoryError::NotFound { id } => {
            Error::invalid_input(format!("question {id} does not exist"))
        }
    }
}

impl QuestionService {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<dyn QuestionRepository>) -> Self {
        Self { repository }
    }

    /// Return one page of questions plus the total matching count.
    ///
    /// Pages are 1-based and sliced from the id-ordered sequence as the
    /// half-open range `[(page-1)*10, page*10)`, clamped to the sequence
    /// bounds. Requests past the last page yield an empty page, never an
    /// error; the 404 policy for empty pages belongs to the HTTP boundary.
    ///
    /// A category filter of `Some(0)` is normalised to "no filter". Clients
    /// send zero and empty values interchangeably for "all categories", so
    /// id 0 is never treated as a real category.
    pub async fn paginate(
        &self,
        page: u32,
        category: Option<i32>,
    ) -> Result<QuestionPage, Error> {
        let category = category.filter(|&id| id != 0);
        let questions = self
            .repository
            .list_ordered(category)
            .await
            .map_err(map_repository_error)?;
        let total = questions.len();
        let start = (page.saturating_sub(1) as usize).saturating_mul(QUESTIONS_PER_PAGE);
        let questions = questions
            .into_iter()
            .skip(start)
            .take(QUESTIONS_PER_PAGE)
            .collect();
        Ok(QuestionPage { questions, total })
    }

    /// Every question whose category equals `category`, in storage-native
    /// order. Unknown categories yield an empty list, not an error.
    pub async fn by_category(&self, category: i32) -> Result<Vec<Question>, Error> {
        self.repository
            .find_by_category(category)
            .await
            .map_err(map_repository_error)
    }

    /// Every question containing `term` as a case-insensitive substring.
    ///
    /// A blank term is rejected rather than matching the entire corpus. The
    /// rejection surfaces as an internal error so the HTTP status matches
    /// the published contract for this endpoint.
    pub async fn search(&self, term: &str) -> Result<Vec<Question>, Error> {
        if term.trim().is_empty() {
            return Err(Error::internal("search term must not be empty"));
        }
        self.repository
            .search(term)
            .await
            .map_err(map_repository_error)
    }

    /// Pick the next quiz question for `category`, excluding identifiers the
    /// caller has already seen. Selection is uniform over the remaining
    /// candidates.
    pub async fn next_quiz_question(
        &self,
        category: i32,
        previous: &[i32],
    ) -> Result<QuizOutcome, Error> {
        let candidates = self
            .repository
            .quiz_candidates(category, previous)
            .await
            .map_err(map_repository_error)?;
        let chosen = candidates.choose(&mut rand::thread_rng()).cloned();
        Ok(match chosen {
            Some(question) => QuizOutcome::Question(question),
            None => QuizOutcome::Exhausted,
        })
    }

    /// Persist a new question and return it with its assigned identifier.
    pub async fn create(
        &self,
        draft: NewQuestion,
        mode: CommitMode,
    ) -> Result<Question, Error> {
        self.repository
            .insert(&draft, mode)
            .await
            .map_err(map_repository_error)
    }

    /// Delete the question with the given identifier.
    ///
    /// Deleting a missing identifier is an explicit invalid-operation error
    /// (surfaced as 422), not a storage crash.
    pub async fn delete(&self, id: i32) -> Result<(), Error> {
        self.repository
            .delete(id)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::InMemoryQuestionRepository;
    use crate::domain::ErrorCode;
    use async_trait::async_trait;
    use rstest::rstest;

    /// Stub that fails every call with a query error.
    struct FailingRepository;

    #[async_trait]
    impl QuestionRepository for FailingRepository {
        async fn list_ordered(
            &self,
            _category: Option<i32>,
        ) -> Result<Vec<Question>, QuestionRepositoryError> {
            Err(QuestionRepositoryError::query("database error"))
        }

        async fn find_by_category(
            &self,
            _category: i32,
        ) -> Result<Vec<Question>, QuestionRepositoryError> {
            Err(QuestionRepositoryError::query("database error"))
        }

        async fn search(&self, _term: &str) -> Result<Vec<Question>, QuestionRepositoryError> {
            Err(QuestionRepositoryError::query("database error"))
        }

        async fn quiz_candidates(
            &self,
            _category: i32,
            _excluded: &[i32],
        ) -> Result<Vec<Question>, QuestionRepositoryError> {
            Err(QuestionRepositoryError::query("database error"))
        }

        async fn insert(
            &self,
            _draft: &NewQuestion,
            _mode: CommitMode,
        ) -> Result<Question, QuestionRepositoryError> {
            Err(QuestionRepositoryError::connection("database unavailable"))
        }

        async fn delete(&self, id: i32) -> Result<(), QuestionRepositoryError> {
            Err(QuestionRepositoryError::not_found(id))
        }
    }

    fn question(id: i32, text: &str, category: i32) -> Question {
        Question {
            id,
            question: text.to_owned(),
            answer: "a".to_owned(),
            category,
            difficulty: 1,
        }
    }

    fn seeded_service(count: i32, category: i32) -> QuestionService {
        let questions = (1..=count)
            .map(|id| question(id, &format!("q{id}"), category))
            .collect();
        QuestionService::new(Arc::new(InMemoryQuestionRepository::seeded(questions)))
    }

    #[rstest]
    #[case(1, 10, 25)]
    #[case(2, 10, 25)]
    #[case(3, 5, 25)]
    #[case(4, 0, 25)]
    #[case(9, 0, 25)]
    #[tokio::test]
    async fn pages_are_sliced_and_clamped(
        #[case] page: u32,
        #[case] expected_len: usize,
        #[case] expected_total: usize,
    ) {
        let service = seeded_service(25, 1);
        let result = service.paginate(page, None).await.expect("paginate");
        assert_eq!(result.questions.len(), expected_len);
        assert_eq!(result.total, expected_total);
    }

    #[tokio::test]
    async fn pages_are_ordered_by_ascending_id() {
        let service = seeded_service(25, 1);
        let first = service.paginate(1, None).await.expect("paginate");
        let ids: Vec<i32> = first.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());

        let second = service.paginate(2, None).await.expect("paginate");
        let ids: Vec<i32> = second.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, (11..=20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn repeated_pagination_is_stable() {
        let service = seeded_service(25, 1);
        let first = service.paginate(2, None).await.expect("paginate");
        let again = service.paginate(2, None).await.expect("paginate");
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn category_zero_means_no_filter() {
        let repo = InMemoryQuestionRepository::seeded(vec![
            question(1, "a", 1),
            question(2, "b", 2),
        ]);
        let service = QuestionService::new(Arc::new(repo));

        let unfiltered = service.paginate(1, None).await.expect("paginate");
        let zero = service.paginate(1, Some(0)).await.expect("paginate");
        assert_eq!(unfiltered, zero);
        assert_eq!(zero.total, 2);
    }

    #[tokio::test]
    async fn category_filter_restricts_total_and_page() {
        let repo = InMemoryQuestionRepository::seeded(vec![
            question(1, "a", 1),
            question(2, "b", 2),
            question(3, "c", 2),
        ]);
        let service = QuestionService::new(Arc::new(repo));

        let page = service.paginate(1, Some(2)).await.expect("paginate");
        assert_eq!(page.total, 2);
        assert!(page.questions.iter().all(|q| q.category == 2));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[tokio::test]
    async fn blank_search_terms_are_internal_errors(#[case] term: &str) {
        let service = seeded_service(3, 1);
        let error = service.search(term).await.expect_err("blank term");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn search_matches_either_case() {
        let repo = InMemoryQuestionRepository::seeded(vec![
            question(1, "Largest lake in Africa?", 1),
            question(2, "Deepest LAKE on Earth?", 1),
            question(3, "Tallest mountain?", 1),
        ]);
        let service = QuestionService::new(Arc::new(repo));

        let lower = service.search("lake").await.expect("search");
        let upper = service.search("LAKE").await.expect("search");
        assert_eq!(lower, upper);
        assert_eq!(lower.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[tokio::test]
    async fn quiz_never_repeats_previous_questions() {
        let service = seeded_service(5, 1);
        let previous = vec![1, 2, 3];

        for _ in 0..20 {
            let outcome = service
                .next_quiz_question(1, &previous)
                .await
                .expect("quiz");
            match outcome {
                QuizOutcome::Question(q) => assert!(!previous.contains(&q.id)),
                QuizOutcome::Exhausted => panic!("candidates remain"),
            }
        }
    }

    #[tokio::test]
    async fn exhausted_category_is_a_successful_outcome() {
        let service = seeded_service(3, 1);
        let outcome = service
            .next_quiz_question(1, &[1, 2, 3])
            .await
            .expect("quiz");
        assert_eq!(outcome, QuizOutcome::Exhausted);
    }

    #[tokio::test]
    async fn unknown_quiz_category_is_exhausted_not_an_error() {
        let service = seeded_service(3, 1);
        let outcome = service.next_quiz_question(99, &[]).await.expect("quiz");
        assert_eq!(outcome, QuizOutcome::Exhausted);
    }

    #[tokio::test]
    async fn create_then_fetch_then_delete_round_trip() {
        let service = QuestionService::new(Arc::new(InMemoryQuestionRepository::default()));
        let draft = NewQuestion::new("A?", "B", 1, 1).expect("draft");

        let created = service
            .create(draft, CommitMode::Commit)
            .await
            .expect("create");
        let fetched = service.by_category(1).await.expect("fetch");
        assert!(fetched.contains(&created));

        service.delete(created.id).await.expect("delete");
        let after = service.by_category(1).await.expect("fetch");
        assert!(!after.contains(&created));
    }

    #[tokio::test]
    async fn delete_missing_question_maps_to_invalid_input() {
        let service = QuestionService::new(Arc::new(InMemoryQuestionRepository::default()));
        let error = service.delete(9999).await.expect_err("missing id");
        assert_eq!(error.code(), ErrorCode::InvalidInput);
    }

    #[tokio::test]
    async fn storage_failures_surface_as_internal_errors() {
        let service = QuestionService::new(Arc::new(FailingRepository));

        let error = service.paginate(1, None).await.expect_err("failure");
        assert_eq!(error.code(), ErrorCode::InternalError);

        let error = service.search("x").await.expect_err("failure");
        assert_eq!(error.code(), ErrorCode::InternalError);

        let draft = NewQuestion::new("A?", "B", 1, 1).expect("draft");
        let error = service
            .create(draft, CommitMode::Commit)
            .await
            .expect_err("failure");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
