use thiserror::Error;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// Every variant is handled at the boundary where it occurs and turned into
/// user-visible state or a safe fallback; none of them is meant to reach the
/// top of the application unhandled.
#[derive(Debug, Error)]
pub enum AppError {
    /// An answer, message or selection outside the fixed input domain.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Submission attempted before every question was answered.
    #[error("Assessment incomplete: {answered}/{required} questions answered")]
    IncompleteAssessment { answered: usize, required: usize },

    /// An answer was recorded after submission without a retake.
    #[error("Assessment already submitted; retake it to change answers")]
    AssessmentClosed,

    /// Credential mismatch. Carries no detail.
    #[error("Invalid email or password")]
    AuthenticationFailure,

    /// Static content is malformed: a band table gap, a missing english entry, a bad fixture.
    #[error("Configuration gap: {0}")]
    ConfigurationGap(String),

    /// A referenced record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Represents errors originating from the key/value store, typically from `sqlx`.
    #[error("Storage error: {0}")]
    Storage(#[from] sqlx::Error),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Represents data validation errors reported by `validator`.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// An actor mailbox or reply channel was closed.
    #[error("Actor error: {0}")]
    Actor(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl AppError {
    /// Translation key of the inline message a UI shows for this error, if any.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            AppError::AuthenticationFailure => Some("auth.error.invalidCredentials"),
            AppError::IncompleteAssessment { .. } => Some("phq9.error.incomplete"),
            AppError::Storage(_) | AppError::Actor(_) | AppError::Timeout(_) => {
                Some("auth.error.generic")
            }
            _ => None,
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::InvalidInput(format!("Date parse error: {}", err))
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for AppError {
    fn from(err: tokio::sync::mpsc::error::SendError<T>) -> Self {
        AppError::Actor(err.to_string())
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for AppError {
    fn from(err: tokio::sync::oneshot::error::RecvError) -> Self {
        AppError::Actor(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failure_has_inline_message_key() {
        let err = AppError::AuthenticationFailure;
        assert_eq!(err.message_key(), Some("auth.error.invalidCredentials"));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_incomplete_assessment_display() {
        let err = AppError::IncompleteAssessment {
            answered: 4,
            required: 9,
        };
        assert_eq!(err.to_string(), "Assessment incomplete: 4/9 questions answered");
    }

    #[test]
    fn test_json_error_converts() {
        let err: AppError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
