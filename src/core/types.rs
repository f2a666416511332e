// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// A grid coordinate. Rows grow downward, columns grow to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring position one step in `direction`, or `None` when the
    /// step would leave a `height` x `width` grid.
    pub fn step(self, direction: Direction, height: usize, width: usize) -> Option<Position> {
        let (row, col) = match direction {
            Direction::Right => (Some(self.row), self.col.checked_add(1)),
            Direction::Down => (self.row.checked_add(1), Some(self.col)),
            Direction::Left => (Some(self.row), self.col.checked_sub(1)),
            Direction::Up => (self.row.checked_sub(1), Some(self.col)),
        };
        match (row, col) {
            (Some(row), Some(col)) if row < height && col < width => Some(Position { row, col }),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    /// One-based, the way clue numbers are read.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row + 1, self.col + 1)
    }
}

/// The four directions a word can run from its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Right, Direction::Down, Direction::Left, Direction::Up];

    pub fn arrow(self) -> char {
        match self {
            Direction::Right => '\u{2192}',
            Direction::Down => '\u{2193}',
            Direction::Left => '\u{2190}',
            Direction::Up => '\u{2191}',
        }
    }
}

/// State of a single grid cell. Cells only ever move away from `Empty`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    /// Clue cell for the word whose run starts next to it. Its metadata lives
    /// in the grid's placement map.
    Anchor,
    /// A letter belonging to one or more placed words.
    Letter(char),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A placed word, keyed in the grid by its anchor position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub direction: Direction,
    pub word: String,
    /// The meaning drawn for this word; shown as the clue.
    pub meaning: String,
}
