//! Board representation: stones, intersections, and the NxN grid.
//!
//! The grid is a flat vector indexed by `row * size + col`. Every public
//! accessor bounds-checks its intersection; only the resolver mutates cells,
//! and only on its own working copy.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{GLYPH_BLACK, GLYPH_EMPTY, GLYPH_WHITE};

/// A player's stone. Empty cells are `None` on the board, never a variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    /// The other player.
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Stone::Black => GLYPH_BLACK,
            Stone::White => GLYPH_WHITE,
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => write!(f, "black"),
            Stone::White => write!(f, "white"),
        }
    }
}

/// A 0-indexed `(row, col)` coordinate on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Intersection {
    pub row: usize,
    pub col: usize,
}

impl Intersection {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Failure to build a board from a text diagram.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("board diagram is empty")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unknown glyph {glyph:?} at row {row}, column {col}")]
    UnknownGlyph { glyph: char, row: usize, col: usize },
}

/// An NxN grid of intersections, each empty or holding one stone.
///
/// Serializes as its size plus row-major cells for presentation layers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Stone>>,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size >= 1, "board size must be at least 1");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a board from rows of `X` (Black), `O` (White) and `.` (empty).
    ///
    /// Rows are given top to bottom; whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, BoardParseError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardParseError::Empty);
        }
        let mut board = Board::new(size);
        for (row, line) in rows.iter().enumerate() {
            let glyphs: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if glyphs.len() != size {
                return Err(BoardParseError::RaggedRow {
                    row,
                    found: glyphs.len(),
                    expected: size,
                });
            }
            for (col, glyph) in glyphs.into_iter().enumerate() {
                let cell = match glyph {
                    GLYPH_BLACK => Some(Stone::Black),
                    GLYPH_WHITE => Some(Stone::White),
                    GLYPH_EMPTY => None,
                    _ => return Err(BoardParseError::UnknownGlyph { glyph, row, col }),
                };
                board.cells[row * size + col] = cell;
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `at` lies on the board.
    pub fn contains(&self, at: Intersection) -> bool {
        at.row < self.size && at.col < self.size
    }

    fn idx(&self, at: Intersection) -> usize {
        at.row * self.size + at.col
    }

    /// Stone at `at`, or `None` if empty or off the board.
    pub fn get(&self, at: Intersection) -> Option<Stone> {
        if !self.contains(at) {
            return None;
        }
        self.cells[self.idx(at)]
    }

    /// Whether `at` is on the board and unoccupied.
    pub fn is_empty_at(&self, at: Intersection) -> bool {
        self.contains(at) && self.cells[self.idx(at)].is_none()
    }

    /// Place a stone. Callers have already bounds-checked `at`.
    pub(crate) fn set(&mut self, at: Intersection, stone: Stone) {
        let i = self.idx(at);
        self.cells[i] = Some(stone);
    }

    pub(crate) fn clear(&mut self, at: Intersection) {
        let i = self.idx(at);
        self.cells[i] = None;
    }

    /// Dense index for `at`, used for visited grids sized `size * size`.
    pub(crate) fn index_of(&self, at: Intersection) -> usize {
        self.idx(at)
    }

    pub(crate) fn area(&self) -> usize {
        self.cells.len()
    }

    /// In-bounds orthogonal neighbors of `at`: up, down, left, right.
    pub fn neighbors(&self, at: Intersection) -> impl Iterator<Item = Intersection> + use<> {
        let s = self.size;
        let Intersection { row, col } = at;
        let up = (row > 0).then(|| Intersection::new(row - 1, col));
        let down = (row + 1 < s).then(|| Intersection::new(row + 1, col));
        let left = (col > 0).then(|| Intersection::new(row, col - 1));
        let right = (col + 1 < s).then(|| Intersection::new(row, col + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// Occupied intersections in row-major order.
    pub fn stones(&self) -> impl Iterator<Item = (Intersection, Stone)> + '_ {
        let s = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|stone| (Intersection::new(i / s, i % s), stone)))
    }

    /// All intersections in row-major order.
    pub fn intersections(&self) -> impl Iterator<Item = Intersection> + use<> {
        let s = self.size;
        (0..s * s).map(move |i| Intersection::new(i / s, i % s))
    }

    /// Number of stones of one color on the board.
    pub fn count(&self, stone: Stone) -> usize {
        self.cells.iter().filter(|c| **c == Some(stone)).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                let ch = match self.get(Intersection::new(row, col)) {
                    Some(stone) => stone.glyph(),
                    None => GLYPH_EMPTY,
                };
                if col > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
