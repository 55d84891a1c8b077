//! Domain-level error type.
//!
//! These errors are transport agnostic. The HTTP inbound adapter maps them to
//! status codes and the JSON error envelope; the domain only records the
//! failure category and a human-readable message.

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The request payload could not be parsed.
    BadRequest,
    /// The requested resource or page does not exist.
    NotFound,
    /// The path exists but does not support the requested method.
    MethodNotAllowed,
    /// The request was well-formed but fails input validation.
    InvalidInput,
    /// A storage or runtime failure occurred inside the domain.
    InternalError,
}

/// Domain error payload.
///
/// # Examples
/// ```
/// use trivia_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("page not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::BadRequest`].
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::MethodNotAllowed`].
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MethodNotAllowed, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::bad_request("x"), ErrorCode::BadRequest)]
    #[case(Error::not_found("x"), ErrorCode::NotFound)]
    #[case(Error::method_not_allowed("x"), ErrorCode::MethodNotAllowed)]
    #[case(Error::invalid_input("x"), ErrorCode::InvalidInput)]
    #[case(Error::internal("x"), ErrorCode::InternalError)]
    fn constructors_set_expected_code(#[case] error: Error, #[case] code: ErrorCode) {
        assert_eq!(error.code(), code);
        assert_eq!(error.message(), "x");
    }

    #[rstest]
    fn display_uses_message() {
        let error = Error::invalid_input("difficulty must be positive");
        assert_eq!(error.to_string(), "difficulty must be positive");
    }
}
