//! Error types for the conjure CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for conjure operations.
///
/// Every stage returns on the first error; nothing inside resolution is
/// skipped or retried. Each variant maps to a specific exit code.
#[derive(Error, Debug)]
pub enum ConjureError {
    /// User provided invalid arguments or settings.
    #[error("{0}")]
    UserError(String),

    /// A document could not be read or deserialized.
    #[error("Failed to load document: {0}")]
    Load(String),

    /// A document is missing required structural fields.
    #[error("Invalid document: {0}")]
    Validation(String),

    /// A parent reference could not be located, or the chain is cyclic or too deep.
    #[error("Inheritance resolution failed: {0}")]
    InheritanceResolution(String),

    /// An item value could not be rendered into template bytes.
    #[error("Substitution failed: {0}")]
    Substitution(String),

    /// A variant resolved to an unusable output path.
    #[error("Invalid output path: {0}")]
    Path(String),

    /// Writing an output file failed.
    #[error("Write failed: {0}")]
    Write(String),
}

impl ConjureError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConjureError::UserError(_) => exit_codes::USER_ERROR,
            ConjureError::Load(_) | ConjureError::Validation(_) => exit_codes::DOCUMENT_FAILURE,
            ConjureError::InheritanceResolution(_) | ConjureError::Substitution(_) => {
                exit_codes::RESOLUTION_FAILURE
            }
            ConjureError::Path(_) | ConjureError::Write(_) => exit_codes::OUTPUT_FAILURE,
        }
    }
}

/// Result type alias for conjure operations.
pub type Result<T> = std::result::Result<T, ConjureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_error_has_correct_exit_code() {
        let err = ConjureError::UserError("missing --source".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }

    #[test]
    fn document_errors_share_exit_code() {
        assert_eq!(
            ConjureError::Load("x".into()).exit_code(),
            exit_codes::DOCUMENT_FAILURE
        );
        assert_eq!(
            ConjureError::Validation("x".into()).exit_code(),
            exit_codes::DOCUMENT_FAILURE
        );
    }

    #[test]
    fn resolution_errors_share_exit_code() {
        assert_eq!(
            ConjureError::InheritanceResolution("x".into()).exit_code(),
            exit_codes::RESOLUTION_FAILURE
        );
        assert_eq!(
            ConjureError::Substitution("x".into()).exit_code(),
            exit_codes::RESOLUTION_FAILURE
        );
    }

    #[test]
    fn output_errors_share_exit_code() {
        assert_eq!(
            ConjureError::Path("x".into()).exit_code(),
            exit_codes::OUTPUT_FAILURE
        );
        assert_eq!(
            ConjureError::Write("x".into()).exit_code(),
            exit_codes::OUTPUT_FAILURE
        );
    }

    #[test]
    fn error_messages_are_descriptive() {
        let err = ConjureError::Path("file `cfg` resolves to '.'".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid output path: file `cfg` resolves to '.'"
        );

        let err = ConjureError::Validation("missing field `files`".to_string());
        assert_eq!(err.to_string(), "Invalid document: missing field `files`");
    }
}
