//! Core game engine for the sliding tile puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Board`: the grid of tile exponents, with the axis transforms (shift and merge),
//!   the random tile spawner, the terminal-state check and scoring.
//! - `Direction` and `Axis`: the four moves and their (axis, orientation) decomposition.
//! - `Game`: a play session owning one board and the random number generator used for spawns.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::error::EngineError;

/// Default width and height of the board.
pub const BOARD_SIZE: usize = 4;

/// Base used for the exponents. A cell holding `v` displays `BASE^v`.
pub const BASE: u64 = 2;

/// Unsigned integer exponentiation, `base^exponent`.
///
/// Overflow wraps around like fixed-width unsigned arithmetic, so `pow_int(2, 64)` is 0.
///
/// # Examples
/// ```
/// use tile_merge::engine::pow_int;
/// assert_eq!(pow_int(2, 11), 2048);
/// assert_eq!(pow_int(3, 4), 81);
/// assert_eq!(pow_int(7, 0), 1);
/// ```
pub fn pow_int(base: u64, exponent: u32) -> u64 {
    if base == 2 {
        return 1u64.checked_shl(exponent).unwrap_or(0);
    }
    (0..exponent).fold(1u64, |acc, _| acc.wrapping_mul(base))
}

/// The axis a move compacts along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Row-wise, horizontal.
    X,
    /// Column-wise, vertical.
    Y,
}

/// One of the four moves a player can make.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Left | Direction::Right => Axis::X,
        }
    }

    /// Whether tiles are compacted toward index `N - 1` (down or right) rather than index 0.
    pub fn toward_high(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// Maps a single key to a direction.
    ///
    /// Accepts `w`/`a`/`s`/`d` and the vi keys `h`/`j`/`k`/`l`, in either case.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::Direction;
    /// assert_eq!(Direction::from_key('w').unwrap(), Direction::Up);
    /// assert_eq!(Direction::from_key('L').unwrap(), Direction::Right);
    /// assert!(Direction::from_key('x').is_err());
    /// ```
    pub fn from_key(key: char) -> Result<Self, EngineError> {
        match key.to_ascii_lowercase() {
            'w' | 'k' => Ok(Direction::Up),
            's' | 'j' => Ok(Direction::Down),
            'a' | 'h' => Ok(Direction::Left),
            'd' | 'l' => Ok(Direction::Right),
            _ => Err(EngineError::InvalidDirection(key.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "up" => return Ok(Direction::Up),
            "down" => return Ok(Direction::Down),
            "left" => return Ok(Direction::Left),
            "right" => return Ok(Direction::Right),
            _ => {}
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(key), None) => Direction::from_key(key),
            _ => Err(EngineError::InvalidDirection(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Represents the game board as an `N`x`N` grid of tile exponents.
///
/// A cell holding `0` is empty; any other value `v` is a tile worth `BASE^v`.
/// `N` defaults to `BOARD_SIZE`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board<const N: usize = BOARD_SIZE> {
    grid: [[u8; N]; N],
}

impl<const N: usize> Default for Board<N> {
    fn default() -> Self {
        Self::new_empty()
    }
}

/// Index of the `k`-th cell of a lane, counted from the end the lane is compacted toward.
fn lane_index(len: usize, toward_high: bool, k: usize) -> usize {
    if toward_high {
        len - 1 - k
    } else {
        k
    }
}

/// Compacts the non-zero cells of `lane` toward its start, keeping their order.
/// Returns whether any cell changed position.
fn shift_lane(lane: &mut [u8], toward_high: bool) -> bool {
    let len = lane.len();
    let mut moved = false;
    let mut write = 0;
    for read in 0..len {
        let src = lane_index(len, toward_high, read);
        if lane[src] != 0 {
            let dst = lane_index(len, toward_high, write);
            lane[dst] = lane[src];
            if dst != src {
                lane[src] = 0;
                moved = true;
            }
            write += 1;
        }
    }
    moved
}

/// Merges equal neighbours of `lane`, scanning from its start, and compacts what is left.
///
/// A merged pair becomes one cell of the next exponent and the scan skips the consumed
/// neighbour, so no tile takes part in two merges. Returns whether any pair merged.
fn merge_lane(lane: &mut [u8], toward_high: bool) -> bool {
    let len = lane.len();
    if len == 0 {
        return false;
    }
    let mut merged = false;
    let mut write = 0;
    for read in 0..len - 1 {
        let src = lane_index(len, toward_high, read);
        let value = lane[src];
        if value == 0 {
            continue;
        }
        let next = lane_index(len, toward_high, read + 1);
        let dst = lane_index(len, toward_high, write);
        if value == lane[next] {
            lane[dst] = value.saturating_add(1);
            lane[next] = 0;
            merged = true;
        } else {
            lane[dst] = value;
        }
        if dst != src {
            lane[src] = 0;
        }
        write += 1;
    }

    // The last cell has no neighbour to merge with; it only gets compacted.
    let last = lane_index(len, toward_high, len - 1);
    if lane[last] != 0 {
        let dst = lane_index(len, toward_high, write);
        lane[dst] = lane[last];
        if dst != last {
            lane[last] = 0;
        }
    }
    merged
}

impl<const N: usize> Board<N> {
    /// Creates a new board with every cell empty.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::Board;
    /// let board: Board = Board::new_empty();
    /// assert_eq!(board.get_tile(0, 0), 0);
    /// assert_eq!(board.score(), 0);
    /// ```
    pub fn new_empty() -> Self {
        Board { grid: [[0; N]; N] }
    }

    /// Creates a board from a predefined grid of exponents.
    pub fn from_grid(grid: [[u8; N]; N]) -> Self {
        Board { grid }
    }

    /// Width (and height) of the board.
    pub fn size(&self) -> usize {
        N
    }

    /// Returns the exponent at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> u8 {
        self.grid[r][c]
    }

    /// Sets the exponent at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn set_tile(&mut self, r: usize, c: usize, exponent: u8) {
        self.grid[r][c] = exponent;
    }

    pub fn grid(&self) -> &[[u8; N]; N] {
        &self.grid
    }

    /// Sets every cell to empty.
    pub fn clear(&mut self) {
        self.grid = [[0; N]; N];
    }

    /// Coordinates of all empty cells, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::new();
        for r in 0..N {
            for c in 0..N {
                if self.grid[r][c] == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Highest exponent on the board, 0 for an empty board.
    pub fn max_exponent(&self) -> u8 {
        self.grid.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of `BASE^v` over all non-empty cells.
    ///
    /// The sum wraps on overflow, like `pow_int`.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::Board;
    /// let board = Board::from_grid([[1, 0], [3, 0]]);
    /// assert_eq!(board.score(), 2 + 8);
    /// ```
    pub fn score(&self) -> u64 {
        self.grid
            .iter()
            .flatten()
            .filter(|&&v| v != 0)
            .fold(0u64, |acc, &v| acc.wrapping_add(pow_int(BASE, u32::from(v))))
    }

    /// Dumps the board as text for diagnostics.
    ///
    /// Every cell is written as its exponent followed by a comma, with `-` standing in for
    /// empty cells. Each row ends with a newline and the dump ends with one blank line.
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::Board;
    /// let board = Board::from_grid([[1, 0], [0, 12]]);
    /// assert_eq!(board.serialize(), "1,-,\n-,12,\n\n");
    /// ```
    pub fn serialize(&self) -> String {
        let mut output = String::new();
        for row in &self.grid {
            for &value in row {
                if value == 0 {
                    output.push_str("-,");
                } else {
                    output.push_str(&format!("{},", value));
                }
            }
            output.push('\n');
        }
        output.push('\n');
        output
    }

    fn column(&self, c: usize) -> [u8; N] {
        std::array::from_fn(|r| self.grid[r][c])
    }

    fn set_column(&mut self, c: usize, column: [u8; N]) {
        for (r, value) in column.into_iter().enumerate() {
            self.grid[r][c] = value;
        }
    }

    /// Compacts every row toward column 0, or toward column `N - 1` if `toward_high`.
    /// Returns whether any tile moved.
    pub fn shift_along_x(&mut self, toward_high: bool) -> bool {
        let mut moved = false;
        for row in self.grid.iter_mut() {
            moved |= shift_lane(row, toward_high);
        }
        moved
    }

    /// Merges equal neighbours in every row, scanning from column 0 (or `N - 1` if
    /// `toward_high`). Returns whether any pair merged.
    pub fn merge_along_x(&mut self, toward_high: bool) -> bool {
        let mut merged = false;
        for row in self.grid.iter_mut() {
            merged |= merge_lane(row, toward_high);
        }
        merged
    }

    /// Compacts every column toward row 0, or toward row `N - 1` if `toward_high`.
    /// Returns whether any tile moved.
    pub fn shift_along_y(&mut self, toward_high: bool) -> bool {
        let mut moved = false;
        for c in 0..N {
            let mut lane = self.column(c);
            moved |= shift_lane(&mut lane, toward_high);
            self.set_column(c, lane);
        }
        moved
    }

    /// Merges equal neighbours in every column, scanning from row 0 (or `N - 1` if
    /// `toward_high`). Returns whether any pair merged.
    pub fn merge_along_y(&mut self, toward_high: bool) -> bool {
        let mut merged = false;
        for c in 0..N {
            let mut lane = self.column(c);
            merged |= merge_lane(&mut lane, toward_high);
            self.set_column(c, lane);
        }
        merged
    }

    /// Places a tile of exponent 1 on an empty cell chosen uniformly at random.
    ///
    /// # Returns
    /// * `Ok((row, col))` of the new tile.
    /// * `Err(EngineError::NoEmptyCell)` if the board is full. The board is left untouched.
    pub fn spawn_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(usize, usize), EngineError> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return Err(EngineError::NoEmptyCell);
        }
        let (r, c) = empty[rng.gen_range(0..empty.len())];
        self.grid[r][c] = 1;
        debug!(row = r, col = c, "spawned tile");
        Ok((r, c))
    }

    /// Shifts then merges along the X axis, and spawns one tile if either changed the board.
    ///
    /// # Returns
    /// `Some((row, col))` of the spawned tile if the board changed, `None` otherwise.
    pub fn move_along_x<R: Rng + ?Sized>(
        &mut self,
        toward_high: bool,
        rng: &mut R,
    ) -> Result<Option<(usize, usize)>, EngineError> {
        // Both passes always run: the merge pass also closes the gaps it leaves behind.
        let shifted = self.shift_along_x(toward_high);
        let merged = self.merge_along_x(toward_high);
        self.finish_move(shifted, merged, rng)
    }

    /// Shifts then merges along the Y axis, and spawns one tile if either changed the board.
    ///
    /// # Returns
    /// `Some((row, col))` of the spawned tile if the board changed, `None` otherwise.
    pub fn move_along_y<R: Rng + ?Sized>(
        &mut self,
        toward_high: bool,
        rng: &mut R,
    ) -> Result<Option<(usize, usize)>, EngineError> {
        let shifted = self.shift_along_y(toward_high);
        let merged = self.merge_along_y(toward_high);
        self.finish_move(shifted, merged, rng)
    }

    /// Applies a move in `direction`.
    ///
    /// # Examples
    /// ```
    /// use rand::rngs::SmallRng;
    /// use rand::SeedableRng;
    /// use tile_merge::engine::{Board, Direction};
    ///
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let mut board = Board::from_grid([[1, 1, 2, 0], [0; 4], [0; 4], [0; 4]]);
    /// let spawned = board.apply_move(Direction::Left, &mut rng).unwrap();
    /// assert!(spawned.is_some());
    /// assert_eq!(board.grid()[0][..2], [2u8, 2]);
    /// ```
    pub fn apply_move<R: Rng + ?Sized>(
        &mut self,
        direction: Direction,
        rng: &mut R,
    ) -> Result<Option<(usize, usize)>, EngineError> {
        match direction.axis() {
            Axis::X => self.move_along_x(direction.toward_high(), rng),
            Axis::Y => self.move_along_y(direction.toward_high(), rng),
        }
    }

    fn finish_move<R: Rng + ?Sized>(
        &mut self,
        shifted: bool,
        merged: bool,
        rng: &mut R,
    ) -> Result<Option<(usize, usize)>, EngineError> {
        trace!(shifted, merged, "move applied");
        if shifted || merged {
            self.spawn_one(rng).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Checks whether no move in any direction can change the board.
    ///
    /// That is the case iff no cell is empty and every pair of horizontally or vertically
    /// adjacent cells differs.
    pub fn is_terminal(&self) -> bool {
        for r in 0..N {
            for c in 0..N {
                let value = self.grid[r][c];
                if value == 0 {
                    return false;
                }
                if c + 1 < N && self.grid[r][c + 1] == value {
                    return false;
                }
                if r + 1 < N && self.grid[r + 1][c] == value {
                    return false;
                }
            }
        }
        true
    }
}

impl<const N: usize> fmt::Display for Board<N> {
    /// Formats the board with `serialize`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Whether a session can still be played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    GameOver,
}

/// What happened when a move was played in a `Game`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The board changed and a new tile was spawned at `spawned`.
    Moved { spawned: (usize, usize) },
    /// Nothing could shift or merge in that direction.
    Unchanged,
    /// The board is terminal; nothing was played. Call `Game::new_game` to continue.
    GameOver,
}

/// Manages one play session: a board of `BOARD_SIZE`, the RNG used for spawns,
/// the session status and the number of moves that changed the board.
///
/// # Examples
/// ```
/// use tile_merge::engine::{Direction, Game, GameStatus};
///
/// let mut game = Game::with_seed(42).unwrap();
/// assert_eq!(game.score(), 2);
/// assert_eq!(game.status(), GameStatus::Active);
///
/// for direction in Direction::ALL {
///     game.play(direction).unwrap();
/// }
/// println!("Score: {}, moves: {}", game.score(), game.moves());
/// ```
#[derive(Clone, Debug)]
pub struct Game<R = SmallRng> {
    board: Board,
    rng: R,
    status: GameStatus,
    moves: u32,
}

impl Game<SmallRng> {
    /// Starts a session whose spawns are seeded from OS entropy.
    pub fn new() -> Result<Self, EngineError> {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Starts a reproducible session: the same seed and moves give the same boards.
    pub fn with_seed(seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Starts a session on an empty board with one spawned tile.
    pub fn with_rng(rng: R) -> Result<Self, EngineError> {
        let mut game = Game {
            board: Board::new_empty(),
            rng,
            status: GameStatus::Active,
            moves: 0,
        };
        game.new_game()?;
        Ok(game)
    }

    /// Resumes a session from an existing board. No tile is spawned.
    pub fn with_board(board: Board, rng: R) -> Self {
        let status = if board.is_terminal() {
            GameStatus::GameOver
        } else {
            GameStatus::Active
        };
        Game {
            board,
            rng,
            status,
            moves: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.board.score()
    }

    /// Number of moves that changed the board since the session (re)started.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    /// Plays one move.
    ///
    /// A terminal board is detected before moving; the session then switches to
    /// `GameStatus::GameOver` and the board stays as it is. After a move that changed the
    /// board the check runs again, so the caller can announce the end right away.
    pub fn play(&mut self, direction: Direction) -> Result<MoveOutcome, EngineError> {
        if self.status == GameStatus::GameOver || self.board.is_terminal() {
            self.end_game();
            return Ok(MoveOutcome::GameOver);
        }

        match self.board.apply_move(direction, &mut self.rng)? {
            Some(spawned) => {
                self.moves += 1;
                if self.board.is_terminal() {
                    self.end_game();
                }
                Ok(MoveOutcome::Moved { spawned })
            }
            None => {
                trace!(%direction, "move did not change the board");
                Ok(MoveOutcome::Unchanged)
            }
        }
    }

    /// Clears the board, spawns one tile and resets the move counter.
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.board.clear();
        self.board.spawn_one(&mut self.rng)?;
        self.status = GameStatus::Active;
        self.moves = 0;
        debug!("new game started");
        Ok(())
    }

    fn end_game(&mut self) {
        if self.status != GameStatus::GameOver {
            debug!(score = self.board.score(), moves = self.moves, "game over");
            self.status = GameStatus::GameOver;
        }
    }
}
