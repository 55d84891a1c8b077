//! Question entity and validated creation draft.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted trivia question.
///
/// The identifier is store-assigned and immutable once persisted. The
/// `category` field references a [`crate::domain::Category`] by id, but
/// referential integrity is deliberately not enforced here: a question may
/// carry a category id with no matching category row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Question {
    /// Store-assigned unique identifier.
    #[schema(example = 7)]
    pub id: i32,
    /// The question text shown to players.
    #[schema(example = "What boxer's original name is Cassius Clay?")]
    pub question: String,
    /// The accepted answer text.
    #[schema(example = "Muhammad Ali")]
    pub answer: String,
    /// Referenced category identifier.
    #[schema(example = 4)]
    pub category: i32,
    /// Difficulty score, a small positive integer.
    #[schema(example = 1)]
    pub difficulty: i32,
}

/// Validation failures raised when constructing a [`NewQuestion`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestionValidationError {
    /// The question text is empty or whitespace-only.
    #[error("question text must not be blank")]
    BlankQuestion,
    /// The answer text is empty or whitespace-only.
    #[error("answer text must not be blank")]
    BlankAnswer,
    /// The difficulty score is zero or negative.
    #[error("difficulty must be a positive integer")]
    NonPositiveDifficulty,
}

/// A question awaiting persistence; the store assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    question: String,
    answer: String,
    category: i32,
    difficulty: i32,
}

impl NewQuestion {
    /// Validate and construct a creation draft.
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        category: i32,
        difficulty: i32,
    ) -> Result<Self, QuestionValidationError> {
        let question = question.into();
        let answer = answer.into();
        if question.trim().is_empty() {
            return Err(QuestionValidationError::BlankQuestion);
        }
        if answer.trim().is_empty() {
            return Err(QuestionValidationError::BlankAnswer);
        }
        if difficulty < 1 {
            return Err(QuestionValidationError::NonPositiveDifficulty);
        }
        Ok(Self {
            question,
            answer,
            category,
            difficulty,
        })
    }

    /// Question text.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Answer text.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Referenced category identifier.
    #[must_use]
    pub fn category(&self) -> i32 {
        self.category
    }

    /// Difficulty score.
    #[must_use]
    pub fn difficulty(&self) -> i32 {
        self.difficulty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn accepts_a_complete_draft() {
        let draft = NewQuestion::new("A?", "B", 1, 1).expect("valid draft");
        assert_eq!(draft.question(), "A?");
        assert_eq!(draft.answer(), "B");
        assert_eq!(draft.category(), 1);
        assert_eq!(draft.difficulty(), 1);
    }

    #[rstest]
    #[case("", "B", 1, QuestionValidationError::BlankQuestion)]
    #[case("  ", "B", 1, QuestionValidationError::BlankQuestion)]
    #[case("A?", "", 1, QuestionValidationError::BlankAnswer)]
    #[case("A?", "B", 0, QuestionValidationError::NonPositiveDifficulty)]
    #[case("A?", "B", -3, QuestionValidationError::NonPositiveDifficulty)]
    fn rejects_invalid_drafts(
        #[case] question: &str,
        #[case] answer: &str,
        #[case] difficulty: i32,
        #[case] expected: QuestionValidationError,
    ) {
        let result = NewQuestion::new(question, answer, 1, difficulty);
        assert_eq!(result, Err(expected));
    }
}
