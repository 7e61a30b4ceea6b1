//! Error types for the board engine and the board parsers.

use std::fmt;

/// The error type for engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A tile was to be spawned, but every cell of the board is occupied.
    NoEmptyCell,
    /// A direction key or name that does not map to Up, Down, Left or Right.
    InvalidDirection(String),
}

impl std::error::Error for EngineError {}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::NoEmptyCell => write!(f, "Cannot spawn a tile: the board has no empty cell"),
            EngineError::InvalidDirection(input) => write!(
                f,
                "Invalid direction '{}'. Use w/a/s/d, h/j/k/l or up/down/left/right",
                input
            ),
        }
    }
}

/// The error type for reading a board back from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseBoardError {
    WrongRowCount { expected: usize, found: usize },
    WrongRowLength { row: usize, expected: usize, found: usize },
    InvalidCell { row: usize, col: usize, token: String },
}

impl std::error::Error for ParseBoardError {}

impl fmt::Display for ParseBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseBoardError::WrongRowCount { expected, found } => write!(
                f,
                "Invalid number of rows. Expected {}, found {}",
                expected, found
            ),
            ParseBoardError::WrongRowLength { row, expected, found } => write!(
                f,
                "Row {} has the wrong length. Expected {} cells, found {}",
                row, expected, found
            ),
            ParseBoardError::InvalidCell { row, col, token } => write!(
                f,
                "Unrecognized cell '{}' in row {} col {}",
                token, row, col
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_messages() {
        assert_eq!(
            EngineError::NoEmptyCell.to_string(),
            "Cannot spawn a tile: the board has no empty cell"
        );
        assert!(EngineError::InvalidDirection("x".to_string())
            .to_string()
            .starts_with("Invalid direction 'x'"));
    }

    #[test]
    fn test_parse_error_messages() {
        let err = ParseBoardError::InvalidCell {
            row: 1,
            col: 2,
            token: "?".to_string(),
        };
        assert_eq!(err.to_string(), "Unrecognized cell '?' in row 1 col 2");

        let err = ParseBoardError::WrongRowCount { expected: 4, found: 3 };
        assert!(err.to_string().contains("Expected 4, found 3"));
    }
}
