//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct generating the OpenAPI specification for
//! the trivia REST API: every question, category, and quiz endpoint plus
//! the request/response schemas they reference. The generated document
//! backs Swagger UI in debug builds.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trivia backend API",
        description = "CRUD and quiz endpoints over trivia questions and categories."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::questions_by_category,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::create_question,
        crate::inbound::http::questions::search_questions,
        crate::inbound::http::questions::delete_question,
        crate::inbound::http::quiz::play_quiz,
    ),
    components(schemas(
        crate::domain::Question,
        crate::domain::Category,
        crate::inbound::http::error::ErrorBody,
        crate::inbound::http::categories::CategoriesResponse,
        crate::inbound::http::categories::CategoryQuestionsResponse,
        crate::inbound::http::questions::QuestionListResponse,
        crate::inbound::http::questions::CreateQuestionRequest,
        crate::inbound::http::questions::CreateQuestionResponse,
        crate::inbound::http::questions::SearchRequest,
        crate::inbound::http::questions::DeleteQuestionResponse,
        crate::inbound::http::quiz::QuizRequest,
        crate::inbound::http::quiz::QuizResponse,
    )),
    tags(
        (name = "categories", description = "Category listings"),
        (name = "questions", description = "Question CRUD and search"),
        (name = "quiz", description = "Quiz play")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_endpoint() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/categories",
            "/categories/{category_id}/questions",
            "/questions",
            "/questions/search",
            "/questions/{question_id}",
            "/quiz",
        ] {
            assert!(paths.contains(&expected), "missing path: {expected}");
        }
    }
}
