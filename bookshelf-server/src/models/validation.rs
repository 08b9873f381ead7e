//! Validation error types

use std::fmt;

/// Validation error for book input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field was not supplied at all
    Missing { field: &'static str },

    /// Field is empty (or only whitespace) when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// Field contains a character the store cannot hold (NUL)
    InvalidCharacter { field: &'static str },

    /// Request body could not be read as a JSON book payload
    Malformed { reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "'{}' is required", field),
            Self::Empty { field } => write!(f, "'{}' cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "'{}' exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidCharacter { field } => {
                write!(f, "'{}' contains an invalid character", field)
            }
            Self::Malformed { reason } => write!(f, "invalid request body: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "title",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "'title' exceeds maximum length of 100 characters"
        );
        assert_eq!(
            ValidationError::Missing { field: "author" }.to_string(),
            "'author' is required"
        );
    }
}
