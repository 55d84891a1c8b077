//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{CommitMode, QuestionRepository, QuestionRepositoryError};
use crate::domain::{NewQuestion, Question};

use super::models::{NewQuestionRow, QuestionRow};
use super::pool::DbPool;
use super::schema::questions;
use super::StoreFailure;

/// Diesel-backed implementation of the question repository port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Build an unanchored, escaped `ILIKE` pattern for a search term.
///
/// `%`, `_`, and the escape character itself are escaped so user input
/// matches literally instead of acting as wildcards.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Carrier for the dry-run insert transaction.
///
/// The staged row is smuggled out through the error channel so the
/// transaction always rolls back.
enum DryRunOutcome {
    Staged(QuestionRow),
    Failed(diesel::result::Error),
}

impl From<diesel::result::Error> for DryRunOutcome {
    fn from(error: diesel::result::Error) -> Self {
        Self::Failed(error)
    }
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn list_ordered(
        &self,
        category: Option<i32>,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(QuestionRepositoryError::from_pool)?;
        let mut query = questions::table
            .select(QuestionRow::as_select())
            .into_boxed();
        if let Some(id) = category {
            query = query.filter(questions::category.eq(id));
        }
        let rows: Vec<QuestionRow> = query
            .order(questions::id.asc())
            .load(&mut conn)
            .await
            .map_err(QuestionRepositoryError::from_diesel)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn find_by_category(
        &self,
        category: i32,
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(QuestionRepositoryError::from_pool)?;
        let rows: Vec<QuestionRow> = questions::table
            .filter(questions::category.eq(category))
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(QuestionRepositoryError::from_diesel)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn search(&self, term: &str) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(QuestionRepositoryError::from_pool)?;
        let rows: Vec<QuestionRow> = questions::table
            .filter(questions::question.ilike(like_pattern(term)))
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(QuestionRepositoryError::from_diesel)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn quiz_candidates(
        &self,
        category: i32,
        excluded: &[i32],
    ) -> Result<Vec<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(QuestionRepositoryError::from_pool)?;
        let rows: Vec<QuestionRow> = questions::table
            .filter(questions::category.eq(category))
            .filter(questions::id.ne_all(excluded.to_vec()))
            .select(QuestionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(QuestionRepositoryError::from_diesel)?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn insert(
        &self,
        draft: &NewQuestion,
        mode: CommitMode,
    ) -> Result<Question, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(QuestionRepositoryError::from_pool)?;
        let new_row = NewQuestionRow {
            question: draft.question(),
            answer: draft.answer(),
            category: draft.category(),
            difficulty: draft.difficulty(),
        };

        match mode {
            CommitMode::Commit => {
                let row: QuestionRow = diesel::insert_into(questions::table)
                    .values(&new_row)
                    .returning(QuestionRow::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(QuestionRepositoryError::from_diesel)?;
                Ok(row.into())
            }
            CommitMode::DryRun => {
                let result = conn
                    .transaction::<(), DryRunOutcome, _>(|conn| {
                        async move {
                            let row: QuestionRow = diesel::insert_into(questions::table)
                                .values(&new_row)
                                .returning(QuestionRow::as_returning())
                                .get_result(conn)
                                .await?;
                            Err(DryRunOutcome::Staged(row))
                        }
                        .scope_boxed()
                    })
                    .await;

                match result {
                    Err(DryRunOutcome::Staged(row)) => Ok(row.into()),
                    Err(DryRunOutcome::Failed(error)) => {
                        Err(QuestionRepositoryError::from_diesel(error))
                    }
                    Ok(()) => Err(QuestionRepositoryError::query(
                        "dry-run insert committed unexpectedly",
                    )),
                }
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<(), QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(QuestionRepositoryError::from_pool)?;
        let affected = diesel::delete(questions::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(QuestionRepositoryError::from_diesel)?;
        if affected == 0 {
            return Err(QuestionRepositoryError::not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outbound::persistence::PoolError;
    use rstest::rstest;

    #[rstest]
    #[case("title", "%title%")]
    #[case("50%", "%50\\%%")]
    #[case("a_b", "%a\\_b%")]
    #[case("back\\slash", "%back\\\\slash%")]
    fn like_patterns_escape_wildcards(#[case] term: &str, #[case] expected: &str) {
        assert_eq!(like_pattern(term), expected);
    }

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let error = QuestionRepositoryError::from_pool(PoolError::checkout("timed out"));
        assert_eq!(error, QuestionRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_failure() {
        let error = QuestionRepositoryError::from_diesel(diesel::result::Error::NotFound);
        assert_eq!(error, QuestionRepositoryError::query("record not found"));
    }

    #[rstest]
    fn closed_connections_map_to_connection_failures() {
        let error = QuestionRepositoryError::from_diesel(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::ClosedConnection,
            Box::new("connection closed".to_owned()),
        ));
        assert_eq!(
            error,
            QuestionRepositoryError::connection("database connection error")
        );
    }
}
