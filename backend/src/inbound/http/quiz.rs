//! Quiz API handler.
//!
//! ```text
//! POST /quiz {"quiz_category":1,"previous_questions":[4,7]}
//! ```

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Question, QuizOutcome};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

const MISSING_QUIZ_FIELDS: &str =
    "It's required to provide the quiz_category and previous_questions.";
const NO_MORE_QUESTIONS: &str = "There are no more questions for this category.";

/// Request body for `POST /quiz`.
///
/// Both fields are required; their absence is a client-input error. The
/// category is accepted as raw JSON and coerced afterwards so a non-numeric
/// value reaches the coercion step and surfaces as a storage-class failure,
/// matching the published behaviour of this endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuizRequest {
    /// Category to draw from.
    #[schema(value_type = Object, example = 1)]
    pub quiz_category: Option<serde_json::Value>,
    /// Identifiers of questions already seen this game.
    pub previous_questions: Option<Vec<i32>>,
}

/// Response body for `POST /quiz`.
///
/// Carries either the chosen question or, when the category is exhausted,
/// an explanatory message. Exhaustion is a successful outcome.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuizResponse {
    /// Always `true` on success.
    pub success: bool,
    /// The chosen question, absent when the category is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    /// Exhaustion notice, absent when a question was chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn coerce_category(value: &serde_json::Value) -> Result<i32, Error> {
    value
        .as_i64()
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| Error::internal(format!("quiz category is not a numeric id: {value}")))
}

/// Serve the next quiz question for a category.
#[utoipa::path(
    post,
    path = "/quiz",
    request_body = QuizRequest,
    responses(
        (status = 200, description = "Next question or exhaustion notice", body = QuizResponse),
        (status = 422, description = "Missing required fields", body = crate::inbound::http::error::ErrorBody),
        (status = 500, description = "Non-numeric category or storage failure", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["quiz"],
    operation_id = "playQuiz"
)]
pub async fn play_quiz(
    state: web::Data<HttpState>,
    payload: web::Json<QuizRequest>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let (Some(raw_category), Some(previous)) = (body.quiz_category, body.previous_questions)
    else {
        return Err(Error::invalid_input(MISSING_QUIZ_FIELDS));
    };

    let category = coerce_category(&raw_category)?;
    let outcome = state
        .questions
        .next_quiz_question(category, &previous)
        .await?;

    let response = match outcome {
        QuizOutcome::Question(question) => QuizResponse {
            success: true,
            question: Some(question),
            message: None,
        },
        QuizOutcome::Exhausted => QuizResponse {
            success: true,
            question: None,
            message: Some(NO_MORE_QUESTIONS.to_owned()),
        },
    };
    Ok(HttpResponse::Ok().json(response))
}
