//! Error types for fieldcheck
//!
//! Each error type has a corresponding error code for programmatic handling.

use thiserror::Error;

/// Result type alias for fieldcheck operations
pub type Result<T> = std::result::Result<T, FieldcheckError>;

/// Main error type for all fieldcheck operations
#[derive(Debug, Error)]
pub enum FieldcheckError {
    /// Identity lookup did not find the login token
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// An operation needed a logged-in user but none is recorded
    #[error("No user is logged in")]
    MissingUser,

    /// The validation-record collaborator could not allocate an id
    #[error("Failed to create validation record: {0}")]
    RecordCreation(String),

    /// The submission collaborator rejected the checkout payload
    #[error("Submission failed: {0}")]
    Submission(String),

    /// The session is not on the step an operation belongs to
    #[error("Expected step {expected}, session is on {actual}")]
    StepMismatch { expected: String, actual: String },

    /// Invalid JSON format
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error with context
    #[error("{context}: {message}")]
    Wrapped { context: String, message: String },
}

impl FieldcheckError {
    /// Get the error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            FieldcheckError::UserNotFound(_) => "USER_NOT_FOUND",
            FieldcheckError::MissingUser => "MISSING_USER",
            FieldcheckError::RecordCreation(_) => "RECORD_CREATION",
            FieldcheckError::Submission(_) => "SUBMISSION",
            FieldcheckError::StepMismatch { .. } => "STEP_MISMATCH",
            FieldcheckError::InvalidJson(_) => "INVALID_JSON",
            FieldcheckError::FileNotFound(_) => "FILE_NOT_FOUND",
            FieldcheckError::ConfigError(_) => "CONFIG_ERROR",
            FieldcheckError::Io(_) => "IO_ERROR",
            FieldcheckError::Wrapped { .. } => "WRAPPED_ERROR",
        }
    }

    /// Whether the session can continue after this error.
    ///
    /// Collaborator failures leave the session on its current step.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FieldcheckError::UserNotFound(_)
                | FieldcheckError::MissingUser
                | FieldcheckError::RecordCreation(_)
                | FieldcheckError::Submission(_)
                | FieldcheckError::StepMismatch { .. }
        )
    }

    /// Wrap an error with additional context
    pub fn wrap<E: std::fmt::Display>(error: E, context: impl Into<String>) -> Self {
        FieldcheckError::Wrapped {
            context: context.into(),
            message: error.to_string(),
        }
    }
}

/// Convert an error to an appropriate exit code
pub fn to_exit_code(error: &FieldcheckError) -> i32 {
    match error {
        FieldcheckError::ConfigError(_) => 78, // EX_CONFIG
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FieldcheckError::UserNotFound("U1".into()).code(), "USER_NOT_FOUND");
        assert_eq!(FieldcheckError::MissingUser.code(), "MISSING_USER");
        assert_eq!(FieldcheckError::RecordCreation("x".into()).code(), "RECORD_CREATION");
        assert_eq!(FieldcheckError::Submission("x".into()).code(), "SUBMISSION");
        assert_eq!(FieldcheckError::InvalidJson("x".into()).code(), "INVALID_JSON");
        assert_eq!(FieldcheckError::FileNotFound("x".into()).code(), "FILE_NOT_FOUND");
        assert_eq!(FieldcheckError::ConfigError("x".into()).code(), "CONFIG_ERROR");
        assert_eq!(
            FieldcheckError::StepMismatch {
                expected: "login".into(),
                actual: "checkout".into()
            }
            .code(),
            "STEP_MISMATCH"
        );
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(FieldcheckError::UserNotFound("U1".into()).is_recoverable());
        assert!(FieldcheckError::RecordCreation("down".into()).is_recoverable());
        assert!(!FieldcheckError::InvalidJson("bad".into()).is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(to_exit_code(&FieldcheckError::ConfigError("bad".into())), 78);
        assert_eq!(to_exit_code(&FieldcheckError::MissingUser), 1);
    }

    #[test]
    fn test_wrap_error() {
        let wrapped = FieldcheckError::wrap("inner error", "outer context");
        assert_eq!(wrapped.code(), "WRAPPED_ERROR");
        assert!(wrapped.to_string().contains("outer context"));
        assert!(wrapped.to_string().contains("inner error"));
    }
}
