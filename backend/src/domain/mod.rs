//! Domain entities and the Question Access Layer.
//!
//! Purpose: strongly typed trivia entities, the transport-agnostic error
//! type, the query-shaping service over question storage, and the ports the
//! persistence adapters implement.
//!
//! Public surface:
//! - [`Question`] / [`NewQuestion`] — question entity and validated draft.
//! - [`Category`] — read-only category entity.
//! - [`QuestionService`] — pagination, filtering, search, quiz selection.
//! - [`Error`] / [`ErrorCode`] — failure category plus message.
//! - [`ports`] — storage collaborator traits.

pub mod error;
pub mod ports;

mod category;
mod question;
mod questions;

pub use self::category::Category;
pub use self::error::{Error, ErrorCode};
pub use self::question::{NewQuestion, Question, QuestionValidationError};
pub use self::questions::{QuestionPage, QuestionService, QuizOutcome, QUESTIONS_PER_PAGE};
