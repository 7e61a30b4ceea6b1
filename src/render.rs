//! Terminal presentation of a board.
//!
//! Colors are read from an immutable `Palette` handed to the `Renderer`; nothing here keeps
//! global state. Output uses 24-bit ANSI escape codes, or no escape codes at all with
//! `Renderer::plain()`.
use crate::engine::{pow_int, Board, BASE};

/// An RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    fn ansi_background(&self) -> String {
        format!("\x1b[48;2;{};{};{}m", self.r, self.g, self.b)
    }

    fn ansi_foreground(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

const RESET: &str = "\x1b[0m";

const TILE_COLORS: [Rgb; 17] = [
    Rgb::new(230, 227, 232),
    Rgb::new(255, 127, 89),
    Rgb::new(224, 74, 69),
    Rgb::new(237, 207, 114),
    Rgb::new(65, 216, 127),
    Rgb::new(54, 63, 135),
    Rgb::new(78, 89, 178),
    Rgb::new(109, 118, 191),
    Rgb::new(84, 47, 132),
    Rgb::new(125, 77, 188),
    Rgb::new(163, 77, 188),
    Rgb::new(176, 109, 196),
    Rgb::new(0, 102, 204),
    Rgb::new(0, 153, 255),
    Rgb::new(51, 153, 255),
    Rgb::new(153, 204, 255),
    Rgb::new(102, 255, 102),
];

/// Colors used to draw the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    /// Text drawn directly on the background (messages).
    pub foreground: Rgb,
    /// Text drawn on tiles, the score and the new game hint.
    pub tile_text: Rgb,
    pub score_background: Rgb,
    pub button_background: Rgb,
    /// Tile colors indexed by exponent. Exponents past the end use the last color.
    pub tiles: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: Rgb::new(211, 204, 201),
            foreground: Rgb::new(80, 80, 80),
            tile_text: Rgb::new(255, 255, 255),
            score_background: Rgb::new(143, 122, 102),
            button_background: Rgb::new(255, 153, 102),
            tiles: TILE_COLORS.to_vec(),
        }
    }
}

impl Palette {
    pub fn tile_color(&self, exponent: u8) -> Rgb {
        self.tiles
            .get(usize::from(exponent))
            .or_else(|| self.tiles.last())
            .copied()
            .unwrap_or(self.background)
    }
}

/// Width of one drawn cell, wide enough for `2^17`.
const CELL_WIDTH: usize = 8;

/// Draws boards and status lines as text.
#[derive(Clone, Debug)]
pub struct Renderer {
    palette: Option<Palette>,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Renderer {
            palette: Some(palette),
        }
    }

    /// A renderer that writes no escape codes, for pipes and dumb terminals.
    pub fn plain() -> Self {
        Renderer { palette: None }
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Draws the board, one text line per row, without a trailing newline.
    ///
    /// Tiles show their value `BASE^v`; empty cells are blank (or `.` when plain).
    ///
    /// # Examples
    /// ```
    /// use tile_merge::engine::Board;
    /// use tile_merge::render::Renderer;
    ///
    /// let board = Board::from_grid([[1, 0], [0, 11]]);
    /// let text = Renderer::plain().render_board(&board);
    /// assert_eq!(text, "       2       .\n       .    2048");
    /// ```
    pub fn render_board<const N: usize>(&self, board: &Board<N>) -> String {
        let mut output = String::new();
        for (r, row) in board.grid().iter().enumerate() {
            for &exponent in row {
                output.push_str(&self.render_cell(exponent));
            }
            if r + 1 < N {
                output.push('\n');
            }
        }
        output
    }

    fn render_cell(&self, exponent: u8) -> String {
        let value = if exponent == 0 {
            String::new()
        } else {
            pow_int(BASE, u32::from(exponent)).to_string()
        };
        match &self.palette {
            Some(palette) => format!(
                "{}{}{:^width$}{}",
                palette.tile_color(exponent).ansi_background(),
                palette.tile_text.ansi_foreground(),
                value,
                RESET,
                width = CELL_WIDTH
            ),
            None => {
                let label = if value.is_empty() { "." } else { value.as_str() };
                format!("{:>width$}", label, width = CELL_WIDTH)
            }
        }
    }

    /// Draws the score, the move count and the key that starts a new game.
    pub fn render_status(&self, score: u64, moves: u32) -> String {
        let score_text = format!(" Score: {} ", score);
        let hint_text = " n: New Game ";
        match &self.palette {
            Some(palette) => format!(
                "{}{}{}{}  Moves: {}  {}{}{}{}",
                palette.score_background.ansi_background(),
                palette.tile_text.ansi_foreground(),
                score_text,
                RESET,
                moves,
                palette.button_background.ansi_background(),
                palette.tile_text.ansi_foreground(),
                hint_text,
                RESET
            ),
            None => format!("{}  Moves: {}  {}", score_text.trim(), moves, hint_text.trim()),
        }
    }

    /// Draws a banner such as "Game Over".
    pub fn render_message(&self, text: &str) -> String {
        match &self.palette {
            Some(palette) => format!(
                "{}{} {} {}",
                palette.background.ansi_background(),
                palette.foreground.ansi_foreground(),
                text,
                RESET
            ),
            None => text.to_string(),
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_render_board() {
        let board = Board::from_grid([[1, 2, 0, 0], [0, 0, 0, 0], [0, 0, 17, 0], [3, 0, 0, 0]]);
        let text = Renderer::plain().render_board(&board);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "       2       4       .       .");
        assert_eq!(lines[2], "       .       .  131072       .");
        assert!(!text.ends_with('\n'));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_colored_render_uses_tile_colors() {
        let board = Board::from_grid([[1, 0], [0, 0]]);
        let text = Renderer::default().render_board(&board);
        assert!(text.starts_with("\x1b[48;2;255;127;89m"));
        assert!(text.contains("\x1b[48;2;230;227;232m"));
        assert!(text.contains("   2    "));
        assert!(text.ends_with(RESET));
    }

    #[test]
    fn test_tile_color_falls_back_to_last() {
        let palette = Palette::default();
        assert_eq!(palette.tiles.len(), 17);
        assert_eq!(palette.tile_color(0), Rgb::new(230, 227, 232));
        assert_eq!(palette.tile_color(16), Rgb::new(102, 255, 102));
        assert_eq!(palette.tile_color(30), Rgb::new(102, 255, 102));

        let empty = Palette {
            tiles: Vec::new(),
            ..Palette::default()
        };
        assert_eq!(empty.tile_color(3), empty.background);
    }

    #[test]
    fn test_render_status_and_message() {
        let plain = Renderer::plain();
        assert_eq!(plain.render_status(2048, 7), "Score: 2048  Moves: 7  n: New Game");
        assert_eq!(plain.render_message("Game Over"), "Game Over");

        let colored = Renderer::default();
        let status = colored.render_status(4, 1);
        assert!(status.contains("\x1b[48;2;143;122;102m"));
        assert!(status.contains(" Score: 4 "));
        assert!(colored.render_message("Game Over").contains("\x1b[38;2;80;80;80m"));
        assert!(colored.palette().is_some());
        assert!(plain.palette().is_none());
    }
}
