//! HTTP inbound adapter exposing the REST endpoints.

pub mod categories;
pub mod error;
pub mod questions;
pub mod quiz;
pub mod state;

pub use error::ApiResult;
pub use state::HttpState;

use actix_web::web;

/// Wire every endpoint, extractor error handler, and fallback into a
/// service configuration.
///
/// Shared between the server assembly and the integration tests so both
/// exercise identical routing. Resources carry a method fallback so an
/// unsupported verb on a known path yields the 405 envelope rather than the
/// global 404.
pub fn configure(state: HttpState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
            .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
            .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
            .service(
                web::resource("/categories")
                    .route(web::get().to(categories::list_categories))
                    .default_service(web::route().to(error::method_not_allowed_fallback)),
            )
            .service(
                web::resource("/categories/{category_id}/questions")
                    .route(web::get().to(categories::questions_by_category))
                    .default_service(web::route().to(error::method_not_allowed_fallback)),
            )
            .service(
                web::resource("/questions")
                    .route(web::get().to(questions::list_questions))
                    .route(web::post().to(questions::create_question))
                    .default_service(web::route().to(error::method_not_allowed_fallback)),
            )
            // Registered before the id pattern so "search" is not taken as
            // a question identifier.
            .service(
                web::resource("/questions/search")
                    .route(web::post().to(questions::search_questions))
                    .default_service(web::route().to(error::method_not_allowed_fallback)),
            )
            .service(
                web::resource("/questions/{question_id}")
                    .route(web::delete().to(questions::delete_question))
                    .default_service(web::route().to(error::method_not_allowed_fallback)),
            )
            .service(
                web::resource("/quiz")
                    .route(web::post().to(quiz::play_quiz))
                    .default_service(web::route().to(error::method_not_allowed_fallback)),
            )
            .default_service(web::route().to(error::not_found_fallback));
    }
}
