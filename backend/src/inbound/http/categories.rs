//! Category API handlers.
//!
//! ```text
//! GET /categories
//! GET /categories/{category_id}/questions
//! ```

use std::collections::BTreeMap;

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::CategoryRepositoryError;
use crate::domain::{Error, Question};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Response body for `GET /categories`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoriesResponse {
    /// Category id mapped to its type label.
    #[schema(example = json!({"1": "Science", "2": "Art"}))]
    pub categories: BTreeMap<i32, String>,
}

/// Response body for `GET /categories/{category_id}/questions`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryQuestionsResponse {
    /// Always `true` on success.
    pub success: bool,
    /// Every question in the category, storage-native order.
    pub questions: Vec<Question>,
    /// Number of questions in the category.
    pub total_questions: usize,
    /// Echo of the requested category id.
    pub current_category: i32,
}

fn map_category_error(error: CategoryRepositoryError) -> Error {
    match error {
        CategoryRepositoryError::Connection { message }
        | CategoryRepositoryError::Query { message } => Error::internal(message),
    }
}

/// Fetch all categories as an `{id: type}` map.
pub(crate) async fn categories_map(state: &HttpState) -> Result<BTreeMap<i32, String>, Error> {
    let categories = state
        .categories
        .list()
        .await
        .map_err(map_category_error)?;
    Ok(categories.into_iter().map(|c| (c.id, c.kind)).collect())
}

/// List all available categories.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "Category map", body = CategoriesResponse),
        (status = 500, description = "Storage failure", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let categories = categories_map(&state).await?;
    Ok(HttpResponse::Ok().json(CategoriesResponse { categories }))
}

/// List every question in one category.
///
/// Unknown category ids yield an empty list; a non-numeric id never reaches
/// this handler (the path extractor rejects it with a 404 envelope).
#[utoipa::path(
    get,
    path = "/categories/{category_id}/questions",
    params(("category_id" = i32, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Questions in the category", body = CategoryQuestionsResponse),
        (status = 404, description = "Non-numeric category id", body = crate::inbound::http::error::ErrorBody)
    ),
    tags = ["categories"],
    operation_id = "questionsByCategory"
)]
pub async fn questions_by_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let category_id = path.into_inner();
    let questions = state.questions.by_category(category_id).await?;
    Ok(HttpResponse::Ok().json(CategoryQuestionsResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category_id,
    }))
}
