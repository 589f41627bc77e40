//! Errors raised while turning EGG text into a scene graph.

use thiserror::Error;

/// Errors that can occur during EGG parsing.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Egg is malformed at line {line}, column {column}: {message}")]
    Format {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unrecognized token {found} at line {line}, column {column}")]
    UnexpectedToken {
        line: usize,
        column: usize,
        found: String,
    },

    #[error("Unclosed <{type_name}> entry starting at line {line}")]
    UnclosedEntry { type_name: String, line: usize },

    #[error("Invalid {expected} value {value:?} in <{entry}>")]
    InvalidNumber {
        entry: String,
        value: String,
        expected: &'static str,
    },

    #[error("<{entry}> is missing {what}")]
    MissingValue { entry: String, what: String },
}

/// Broad category of a [`ParseError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Reading the document failed.
    Io,
    /// The text could not be tokenized or nested.
    Format,
    /// A scalar value could not be converted, or a required value is absent.
    Conversion,
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Io(_) => ErrorKind::Io,
            ParseError::Format { .. }
            | ParseError::UnexpectedToken { .. }
            | ParseError::UnclosedEntry { .. } => ErrorKind::Format,
            ParseError::InvalidNumber { .. } | ParseError::MissingValue { .. } => {
                ErrorKind::Conversion
            }
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let format = ParseError::Format {
            line: 1,
            column: 1,
            message: "unrecognized token #".to_string(),
        };
        let conversion = ParseError::InvalidNumber {
            entry: "Vertex".to_string(),
            value: "abc".to_string(),
            expected: "float",
        };

        assert_eq!(format.kind(), ErrorKind::Format);
        assert_eq!(conversion.kind(), ErrorKind::Conversion);
    }

    #[test]
    fn test_error_messages() {
        let err = ParseError::UnclosedEntry {
            type_name: "Group".to_string(),
            line: 3,
        };
        assert_eq!(err.to_string(), "Unclosed <Group> entry starting at line 3");

        let err = ParseError::MissingValue {
            entry: "RGBA".to_string(),
            what: "4 scalar values".to_string(),
        };
        assert_eq!(err.to_string(), "<RGBA> is missing 4 scalar values");
    }
}
