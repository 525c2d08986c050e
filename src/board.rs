//! 4x4 board representation.
//!
//! Cells hold `Option<Mark>`. Real moves go through [`Board::apply_move`];
//! hypothetical search moves go through [`Board::probe`], which returns a
//! guard that restores the cell when dropped.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::constants::{CELLS, N};

/// A player's mark. `X` is the human side, `O` the machine side.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The minimizing side in search.
    pub const HUMAN: Mark = Mark::X;
    /// The maximizing side in search.
    pub const MACHINE: Mark = Mark::O;

    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::X => "X",
            Mark::O => "O",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell coordinate, `(row, col)`.
pub type Point = (usize, usize);

/// Why a real move was rejected. The board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal move: cell ({0}, {1}) is occupied")]
    Occupied(usize, usize),
    #[error("illegal move: cell ({0}, {1}) is off the board")]
    OutOfBounds(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("expected {expected} cells, got {0}", expected = CELLS)]
    WrongLength(usize),
    #[error("invalid cell character: '{0}'")]
    InvalidChar(char),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; N]; N],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mark at `(row, col)`, or `None` for empty or off-board cells.
    pub fn get(&self, row: usize, col: usize) -> Option<Mark> {
        if !Self::in_bounds(row, col) {
            return None;
        }
        self.cells[row][col]
    }

    pub fn in_bounds(row: usize, col: usize) -> bool {
        row < N && col < N
    }

    #[cfg(test)]
    pub fn is_empty_at(&self, (row, col): Point) -> bool {
        Self::in_bounds(row, col) && self.cells[row][col].is_none()
    }

    /// Places `mark` at `point`.
    pub fn apply_move(&mut self, (row, col): Point, mark: Mark) -> Result<(), MoveError> {
        if !Self::in_bounds(row, col) {
            return Err(MoveError::OutOfBounds(row, col));
        }
        if self.cells[row][col].is_some() {
            return Err(MoveError::Occupied(row, col));
        }
        self.cells[row][col] = Some(mark);
        Ok(())
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [[None; N]; N];
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Point> + '_ {
        (0..N)
            .flat_map(|row| (0..N).map(move |col| (row, col)))
            .filter(|&(row, col)| self.cells[row][col].is_none())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    #[cfg(test)]
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Some(mark))
            .count()
    }

    /// Returns a copy with every `X` turned into `O` and vice versa.
    ///
    /// Lets the `X` side reuse the machine-polarity search.
    pub fn swapped(&self) -> Board {
        Board {
            cells: self.cells.map(|row| row.map(|cell| cell.map(Mark::opponent))),
        }
    }

    /// Temporarily places `mark` at `point`. Whatever the cell held before is
    /// put back when the returned guard goes out of scope, on every exit path.
    ///
    /// Panics if `point` is off the board.
    pub fn probe(&mut self, point: Point, mark: Mark) -> Probe<'_> {
        let (row, col) = point;
        let previous = self.cells[row][col].replace(mark);
        Probe {
            board: self,
            point,
            previous,
        }
    }
}

/// Scoped hypothetical move created by [`Board::probe`].
pub struct Probe<'a> {
    board: &'a mut Board,
    point: Point,
    previous: Option<Mark>,
}

impl Deref for Probe<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl DerefMut for Probe<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        let (row, col) = self.point;
        self.board.cells[row][col] = self.previous;
    }
}

fn cell_str(cell: Option<Mark>) -> &'static str {
    cell.map_or("", Mark::as_str)
}

/// Serializes as four rows of `"X"`, `"O"` or `""`.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.map(|row| row.map(cell_str)).serialize(serializer)
    }
}

/// Parses 16 cells of `X`, `O` or `.` in row-major order. Whitespace and `/`
/// separators are ignored, so `"XO../..../..../...."` is accepted.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/')
            .collect();
        if chars.len() != CELLS {
            return Err(BoardParseError::WrongLength(chars.len()));
        }
        let mut board = Board::new();
        for (i, ch) in chars.into_iter().enumerate() {
            board.cells[i / N][i % N] = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' => None,
                other => return Err(BoardParseError::InvalidChar(other)),
            };
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                let ch = match cell {
                    Some(Mark::X) => 'X',
                    Some(Mark::O) => 'O',
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
