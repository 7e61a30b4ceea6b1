//! Parsing boards from text: the diagnostic dump written by `Board::serialize` and a
//! compact one-character-per-cell form that is handy in tests.
use crate::engine::Board;
use crate::error::ParseBoardError;

/// Parses an array of string slices into a `Board`, one character per cell.
///
/// Each string slice is a row, starting from row 0. Missing rows and the missing tail of a
/// short row are filled with empty cells.
///
/// Valid characters are:
/// - `.` or `-`: empty cell
/// - `0`-`9`: exponents 0 to 9 (`0` is empty as well)
/// - `a`-`z` (either case): exponents 10 to 35
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(ParseBoardError)` if there are more than `N` rows, a row is longer than `N`
///   characters, or a character is not recognized.
///
/// # Examples
/// ```
/// use tile_merge::engine::Board;
/// use tile_merge::utils::board_from_str_array;
///
/// let board: Board = board_from_str_array(&["11.2", "b"]).unwrap();
/// assert_eq!(board.get_tile(0, 0), 1);
/// assert_eq!(board.get_tile(0, 2), 0);
/// assert_eq!(board.get_tile(0, 3), 2);
/// assert_eq!(board.get_tile(1, 0), 11);
/// assert_eq!(board.get_tile(3, 3), 0);
///
/// assert!(board_from_str_array::<4>(&["1?"]).is_err());
/// ```
pub fn board_from_str_array<const N: usize>(s: &[&str]) -> Result<Board<N>, ParseBoardError> {
    if s.len() > N {
        return Err(ParseBoardError::WrongRowCount {
            expected: N,
            found: s.len(),
        });
    }

    let mut grid = [[0u8; N]; N];

    for (r, row_str) in s.iter().enumerate() {
        let found = row_str.chars().count();
        if found > N {
            return Err(ParseBoardError::WrongRowLength {
                row: r,
                expected: N,
                found,
            });
        }

        for (c, ch) in row_str.chars().enumerate() {
            grid[r][c] = match ch {
                '.' | '-' => 0,
                _ => match ch.to_digit(36) {
                    Some(exponent) => exponent as u8,
                    None => {
                        return Err(ParseBoardError::InvalidCell {
                            row: r,
                            col: c,
                            token: ch.to_string(),
                        })
                    }
                },
            };
        }
    }
    Ok(Board::from_grid(grid))
}

/// Reads a board back from the text written by `Board::serialize`.
///
/// Blank lines are skipped and the trailing comma of a row is optional. Every other line is
/// a row of exactly `N` comma separated cells, each a decimal exponent or `-` for empty.
///
/// # Examples
/// ```
/// use tile_merge::engine::Board;
/// use tile_merge::utils::board_from_dump;
///
/// let board = Board::from_grid([[1, 0], [0, 12]]);
/// let parsed: Board<2> = board_from_dump(&board.serialize()).unwrap();
/// assert_eq!(parsed, board);
/// ```
pub fn board_from_dump<const N: usize>(text: &str) -> Result<Board<N>, ParseBoardError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if rows.len() != N {
        return Err(ParseBoardError::WrongRowCount {
            expected: N,
            found: rows.len(),
        });
    }

    let mut grid = [[0u8; N]; N];
    for (r, row) in rows.into_iter().enumerate() {
        let row = row.strip_suffix(',').unwrap_or(row);
        let cells: Vec<&str> = row.split(',').map(str::trim).collect();
        if cells.len() != N {
            return Err(ParseBoardError::WrongRowLength {
                row: r,
                expected: N,
                found: cells.len(),
            });
        }

        for (c, token) in cells.iter().enumerate() {
            grid[r][c] = if *token == "-" {
                0
            } else {
                token
                    .parse::<u8>()
                    .map_err(|_| ParseBoardError::InvalidCell {
                        row: r,
                        col: c,
                        token: token.to_string(),
                    })?
            };
        }
    }
    Ok(Board::from_grid(grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BOARD_SIZE;

    #[test]
    fn test_board_from_str_array_valid() {
        let board: Board = board_from_str_array(&["1234", "....", "-a-B", "0009"]).unwrap();
        assert_eq!(board.grid()[0], [1, 2, 3, 4]);
        assert_eq!(board.grid()[1], [0, 0, 0, 0]);
        assert_eq!(board.grid()[2], [0, 10, 0, 11]);
        assert_eq!(board.grid()[3], [0, 0, 0, 9]);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let result = board_from_str_array::<BOARD_SIZE>(&["12X*"]);
        assert_eq!(
            result,
            Err(ParseBoardError::InvalidCell {
                row: 0,
                col: 3,
                token: "*".to_string()
            })
        );
    }

    #[test]
    fn test_board_from_str_array_with_spaces() {
        let result = board_from_str_array::<BOARD_SIZE>(&["1 2"]);
        assert!(result.unwrap_err().to_string().contains("Unrecognized cell ' '"));
    }

    #[test]
    fn test_board_from_str_array_row_too_long() {
        let too_long_row = "1".repeat(BOARD_SIZE + 1);
        let result = board_from_str_array::<BOARD_SIZE>(&[too_long_row.as_str()]);
        assert_eq!(
            result,
            Err(ParseBoardError::WrongRowLength {
                row: 0,
                expected: BOARD_SIZE,
                found: BOARD_SIZE + 1
            })
        );
    }

    #[test]
    fn test_board_from_str_array_too_many_rows() {
        let rows = vec!["1"; BOARD_SIZE + 1];
        let result = board_from_str_array::<BOARD_SIZE>(&rows);
        assert!(result.unwrap_err().to_string().contains("Invalid number of rows"));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let board: Board = board_from_str_array(&[]).unwrap();
        assert_eq!(board, Board::<BOARD_SIZE>::new_empty());
    }

    #[test]
    fn test_board_from_dump_reads_serialized_board() {
        let text = "1,-,-,-,\n-,2,-,-,\n-,-,10,-,\n-,-,-,17,\n\n";
        let board: Board = board_from_dump(text).unwrap();
        assert_eq!(board.serialize(), text);
        assert_eq!(board.get_tile(3, 3), 17);
    }

    #[test]
    fn test_board_from_dump_is_lenient_about_layout() {
        let text = "\n  1, 2, -, 3\n-,-,-,-\n\n4,-,-,-,\n-,-,-,5\n";
        let board: Board = board_from_dump(text).unwrap();
        assert_eq!(board.grid()[0], [1, 2, 0, 3]);
        assert_eq!(board.grid()[2], [4, 0, 0, 0]);
        assert_eq!(board.grid()[3], [0, 0, 0, 5]);
    }

    #[test]
    fn test_board_from_dump_errors() {
        assert_eq!(
            board_from_dump::<BOARD_SIZE>("1,-,-,-,\n"),
            Err(ParseBoardError::WrongRowCount {
                expected: BOARD_SIZE,
                found: 1
            })
        );
        assert_eq!(
            board_from_dump::<2>("1,-,-,\n-,-,\n"),
            Err(ParseBoardError::WrongRowLength {
                row: 0,
                expected: 2,
                found: 3
            })
        );
        assert_eq!(
            board_from_dump::<2>("1,x,\n-,-,\n"),
            Err(ParseBoardError::InvalidCell {
                row: 0,
                col: 1,
                token: "x".to_string()
            })
        );
        assert!(board_from_dump::<2>("1,300,\n-,-,\n").is_err());
    }
}
