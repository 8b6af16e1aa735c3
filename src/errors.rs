//! Error types for model construction and search

use thiserror::Error;

/// Reasons a puzzle is rejected before any search starts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{word} \"{text}\" has {actual} letters, layout expects {expected}")]
    WidthMismatch {
        word: &'static str,
        text: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid character '{ch}' in {word}: only letters are allowed")]
    InvalidCharacter { word: &'static str, ch: char },

    #[error("puzzle uses {count} distinct letters, at most 10 can take distinct digits")]
    TooManyLetters { count: usize },

    #[error("addend width {0} is not supported (expected 1..=9)")]
    UnsupportedWidth(usize),
}

/// Internal invariant violations detected by the search engine.
///
/// These indicate a defective model rather than an unsolvable puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("variable {name} reached selection with an empty domain")]
    EmptyDomain { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ModelError::WidthMismatch {
            word: "sum",
            text: "MONE".to_string(),
            expected: 5,
            actual: 4,
        };
        assert_eq!(err.to_string(), "sum \"MONE\" has 4 letters, layout expects 5");

        let err = ModelError::TooManyLetters { count: 11 };
        assert!(err.to_string().contains("11 distinct letters"));

        let err = SearchError::EmptyDomain { name: "c2".to_string() };
        assert!(err.to_string().contains("c2"));
    }
}
