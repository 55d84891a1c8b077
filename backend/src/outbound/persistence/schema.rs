//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the deployed `trivia` database exactly; they
//! are used by Diesel for compile-time query validation and type-safe SQL
//! generation. Regenerate with `diesel print-schema` after schema changes.

diesel::table! {
    /// Trivia questions.
    ///
    /// `category` references `categories.id` but is not a foreign key in the
    /// deployed schema; orphaned category ids are possible.
    questions (id) {
        /// Primary key, assigned by a serial sequence.
        id -> Int4,
        /// Question text.
        question -> Text,
        /// Answer text.
        answer -> Text,
        /// Referenced category id.
        category -> Int4,
        /// Difficulty score.
        difficulty -> Int4,
    }
}

diesel::table! {
    /// Question categories.
    categories (id) {
        /// Primary key, assigned by a serial sequence.
        id -> Int4,
        /// Free-text type label. `type` is reserved in Rust, hence the
        /// renamed column identifier.
        #[sql_name = "type"]
        type_ -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(questions, categories);
