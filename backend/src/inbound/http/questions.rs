//! Question API handlers.
//!
//! ```text
//! GET /questions?page=2&category=1
//! POST /questions {"question":"A?","answer":"B","difficulty":1,"category":1}
//! POST /questions/search {"search_term":"title"}
//! DELETE /questions/5
//! ```

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CommitMode;
use crate::domain::{Error, ErrorCode, NewQuestion, Question};
use crate::inbound::http::categories::categories_map;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

const MISSING_CREATE_FIELDS: &str = "It's required to provide the question and answer text, \
                                     category (id), and difficulty score.";

/// Query string for `GET /questions`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct QuestionsQuery {
    /// 1-based page number. Absent and non-numeric values fall back to the
    /// first page; values below one are a not-found condition.
    pub page: Option<String>,
    /// Optional category filter. Empty and zero values disable the filter.
    pub category: Option<String>,
}

/// Response body for `GET /questions` and `POST /questions/search`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuestionListResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The page's worth of questions (search returns all matches).
    pub questions: Vec<Question>,
    /// Total questions matching the filter, across all pages.
    pub total_questions: usize,
    /// Echo of the requested category filter; `null` when unfiltered.
    pub current_category: Option<i32>,
    /// Category id mapped to its type label.
    pub categories: BTreeMap<i32, String>,
}

/// Request body for `POST /questions`.
///
/// All four content fields are required; absence is a client-input error
/// detected before any record is constructed. `dry_run` stages the insert
/// without committing, a test-isolation affordance.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateQuestionRequest {
    /// Question text.
    pub question: Option<String>,
    /// Answer text.
    pub answer: Option<String>,
    /// Difficulty score, a small positive integer.
    pub difficulty: Option<i32>,
    /// Referenced category id.
    pub category: Option<i32>,
    /// Stage the write without finalising the transaction.
    #[serde(default)]
    pub dry_run: bool,
}

/// Response body for a successful `POST /questions`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateQuestionResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The created question with its store-assigned id.
    pub question: Question,
}

/// Request body for `POST /questions/search`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SearchRequest {
    /// Case-insensitive substring to match against question text.
    pub search_term: Option<String>,
}

/// Response body for `DELETE /questions/{question_id}`, both outcomes.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteQuestionResponse {
    /// Whether the deletion succeeded.
    pub success: bool,
    /// Echo of the requested identifier.
    pub question_id: String,
    /// Human-readable outcome description.
    pub message: String,
}

/// Parse the page query parameter.
///
/// Absent and non-numeric values fall back to the first page, while values
/// below one are a not-found condition, the same as a page past the end.
fn parse_page(raw: Option<&str>) -> Result<u32, Error> {
    let Some(value) = raw else { return Ok(1) };
    match value.parse::<i64>() {
        // Pages beyond u32 are necessarily past the end; clamping keeps the
        // empty-page path responsible for the 404.
        Ok(page) if page >= 1 => Ok(u32::try_from(page).unwrap_or(u32::MAX)),
        Ok(_) => Err(Error::not_found("page not found")),
        Err(_) => Ok(1),
    }
}

/// Parse the category query parameter.
///
/// Absent and empty values mean "no filter". A non-numeric value is a
/// not-found condition at this boundary, per the error taxonomy.
fn parse_category(raw: Option<&str>) -> Result<Option<i32>, Error> {
    match raw {
        None => Ok(None),
        Some(value) if value.is_empty() => Ok(None),
        Some(value) => value
            .parse::<i32>()
            .map(Some)
            .map_err(|_| Error::not_found("page not found")),
    }
}

/// Paginated question listing with optional category filter.
#[utoipa::path(
    get,
    path = "/questions",
    params(QuestionsQuery),
    responses(
        (status = 200, description = "One page of questions", body = QuestionListResponse),
        (status = 404, description = "Empty page or page < 1", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "listQuestions"
)]
pub async fn list_questions(
    state: web::Data<HttpState>,
    query: web::Query<QuestionsQuery>,
) -> ApiResult<HttpResponse> {
    let page = parse_page(query.page.as_deref())?;
    let category = parse_category(query.category.as_deref())?;

    let result = state.questions.paginate(page, category).await?;
    if result.questions.is_empty() {
        return Err(Error::not_found("page not found"));
    }

    Ok(HttpResponse::Ok().json(QuestionListResponse {
        success: true,
        questions: result.questions,
        total_questions: result.total,
        current_category: category,
        categories: categories_map(&state).await?,
    }))
}

/// Create a question.
#[utoipa::path(
    post,
    path = "/questions",
    request_body = CreateQuestionRequest,
    responses(
        (status = 201, description = "Question created", body = CreateQuestionResponse),
        (status = 422, description = "Missing or invalid fields", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "createQuestion"
)]
pub async fn create_question(
    state: web::Data<HttpState>,
    payload: web::Json<CreateQuestionRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let (Some(question), Some(answer), Some(difficulty), Some(category)) =
        (body.question, body.answer, body.difficulty, body.category)
    else {
        return Err(Error::invalid_input(MISSING_CREATE_FIELDS));
    };

    let draft = NewQuestion::new(question, answer, category, difficulty)
        .map_err(|err| Error::invalid_input(err.to_string()))?;
    let mode = if body.dry_run {
        CommitMode::DryRun
    } else {
        CommitMode::Commit
    };

    let created = state.questions.create(draft, mode).await?;
    Ok(HttpResponse::Created().json(CreateQuestionResponse {
        success: true,
        question: created,
    }))
}

/// Substring search over question text.
#[utoipa::path(
    post,
    path = "/questions/search",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching questions", body = QuestionListResponse),
        (status = 500, description = "Missing or empty search term", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["questions"],
    operation_id = "searchQuestions"
)]
pub async fn search_questions(
    state: web::Data<HttpState>,
    payload: web::Json<SearchRequest>,
) -> ApiResult<HttpResponse> {
    let term = payload.into_inner().search_term.unwrap_or_default();
    let questions = state.questions.search(&term).await?;

    Ok(HttpResponse::Ok().json(QuestionListResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: None,
        categories: categories_map(&state).await?,
    }))
}

/// Delete a question by identifier.
///
/// The identifier is taken as a raw string and echoed back, matching the
/// published response shape; values that do not parse as a known identifier
/// are reported the same way as a missing row.
#[utoipa::path(
    delete,
    path = "/questions/{question_id}",
    params(("question_id" = String, Path, description = "Question identifier")),
    responses(
        (status = 200, description = "Question deleted", body = DeleteQuestionResponse),
        (status = 422, description = "Unknown identifier", body = DeleteQuestionResponse)
    ),
    tags = ["questions"],
    operation_id = "deleteQuestion"
)]
pub async fn delete_question(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let raw_id = path.into_inner();

    let deleted = match raw_id.parse::<i32>() {
        Ok(id) => match state.questions.delete(id).await {
            Ok(()) => Ok(()),
            // Storage failures keep the normalised 500 envelope; only the
            // invalid-operation outcome uses the deletion response shape.
            Err(err) if err.code() == ErrorCode::InternalError => return Err(err),
            Err(_) => Err(()),
        },
        Err(_) => Err(()),
    };

    let response = match deleted {
        Ok(()) => HttpResponse::Ok().json(DeleteQuestionResponse {
            success: true,
            question_id: raw_id,
            message: "Successfully deleted".to_owned(),
        }),
        Err(()) => HttpResponse::UnprocessableEntity().json(DeleteQuestionResponse {
            success: false,
            question_id: raw_id,
            message: "Unable to delete question".to_owned(),
        }),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, Ok(None))]
    #[case(Some(""), Ok(None))]
    #[case(Some("3"), Ok(Some(3)))]
    #[case(Some("0"), Ok(Some(0)))]
    fn category_parsing(#[case] raw: Option<&str>, #[case] expected: Result<Option<i32>, ()>) {
        assert_eq!(parse_category(raw).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case(None, Ok(1))]
    #[case(Some("2"), Ok(2))]
    #[case(Some("abc"), Ok(1))]
    #[case(Some("1.5"), Ok(1))]
    fn page_parsing(#[case] raw: Option<&str>, #[case] expected: Result<u32, ()>) {
        assert_eq!(parse_page(raw).map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("0")]
    #[case("-1")]
    #[case("-9999999999")]
    fn pages_below_one_are_not_found(#[case] raw: &str) {
        let error = parse_page(Some(raw)).expect_err("below one");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn non_numeric_category_is_not_found() {
        let error = parse_category(Some("history")).expect_err("non-numeric");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }
}
