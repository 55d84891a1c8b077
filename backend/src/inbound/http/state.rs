//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without a database.

use std::sync::Arc;

use crate::domain::ports::{CategoryRepository, QuestionRepository};
use crate::domain::QuestionService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Question Access Layer service.
    pub questions: QuestionService,
    /// Read-only category storage.
    pub categories: Arc<dyn CategoryRepository>,
}

impl HttpState {
    /// Assemble handler state from port implementations.
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            questions: QuestionService::new(questions),
            categories,
        }
    }
}
