//! Unified error types and result handling for `AttendanceBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Validation failures
//! collected at the write boundary travel as [`Error::Validation`] so callers can
//! show every problem at once instead of only the first.

use crate::core::validation::ValidationError;
use thiserror::Error;

/// Crate-wide error type
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// The database rejected a query or could not be reached
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// One or more validation rules failed before a write was attempted
    #[error("Validation failed: {}", join_messages(.0))]
    Validation(Vec<ValidationError>),

    /// No subject with this name or ID exists for the user
    #[error("Subject not found: {name}")]
    SubjectNotFound {
        /// Name or ID that was looked up
        name: String,
    },

    /// A subject with the same name (ignoring case) already exists for the user
    #[error("Subject already exists: {name}")]
    SubjectAlreadyExists {
        /// Conflicting subject name
        name: String,
    },

    /// A stored value could not be interpreted
    #[error("Corrupt stored value for {field}: {value}")]
    CorruptValue {
        /// Column the value came from
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// Writing into a `String` buffer failed
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Socket or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The Discord client failed
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

impl From<ValidationError> for Error {
    fn from(value: ValidationError) -> Self {
        Self::Validation(vec![value])
    }
}

impl From<Vec<ValidationError>> for Error {
    fn from(value: Vec<ValidationError>) -> Self {
        Self::Validation(value)
    }
}

impl Error {
    /// Human-readable messages for this error, one per validation failure.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Validation(errors) => errors.iter().map(ToString::to_string).collect(),
            other => vec![other.to_string()],
        }
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_message() {
        let error = Error::Validation(vec![
            ValidationError::InvalidDay {
                day: "9".to_string(),
            },
            ValidationError::DuplicateSubject {
                name: "Math".to_string(),
            },
        ]);

        let messages = error.messages();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains('9'));
        assert!(messages[1].contains("Math"));
        assert!(error.to_string().contains("; "));
    }

    #[test]
    fn test_single_validation_error_converts() {
        let error: Error = ValidationError::InvalidDay {
            day: "7".to_string(),
        }
        .into();
        assert!(matches!(error, Error::Validation(ref errs) if errs.len() == 1));
    }

    #[test]
    fn test_non_validation_error_has_one_message() {
        let error = Error::SubjectNotFound {
            name: "Chemistry".to_string(),
        };
        assert_eq!(error.messages(), vec!["Subject not found: Chemistry".to_string()]);
    }
}
