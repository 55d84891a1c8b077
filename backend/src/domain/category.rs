//! Category entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A question category.
///
/// Categories are read-only from this service's perspective: there is no
/// create, update, or delete path exposed over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Store-assigned unique identifier.
    #[schema(example = 4)]
    pub id: i32,
    /// Free-text type label, e.g. "History".
    #[serde(rename = "type")]
    #[schema(example = "History")]
    pub kind: String,
}
