use quickcheck::{Arbitrary, Gen};

use crate::engine::{Board, Direction};

// Skewed toward empty cells and small exponents so that merges are common.
const EXPONENTS: [u8; 12] = [0, 0, 0, 0, 1, 1, 1, 2, 2, 3, 4, 7];
const TILE_EXPONENTS: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// A full board on which every pair of adjacent cells differs.
#[derive(Clone, Debug)]
pub struct TerminalBoard<const N: usize = 4>(pub Board<N>);

impl Arbitrary for Direction {
    fn arbitrary(g: &mut Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}

impl<const N: usize> Arbitrary for Board<N> {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut grid = [[0u8; N]; N];
        for row in grid.iter_mut() {
            for cell in row.iter_mut() {
                *cell = *g.choose(&EXPONENTS).unwrap();
            }
        }
        Board::from_grid(grid)
    }
}

impl<const N: usize> Arbitrary for TerminalBoard<N> {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut grid = [[0u8; N]; N];
        for r in 0..N {
            for c in 0..N {
                let left = if c > 0 { grid[r][c - 1] } else { 0 };
                let up = if r > 0 { grid[r - 1][c] } else { 0 };
                grid[r][c] = loop {
                    let value = *g.choose(&TILE_EXPONENTS).unwrap();
                    if value != left && value != up {
                        break value;
                    }
                };
            }
        }
        TerminalBoard(Board::from_grid(grid))
    }
}
