//! Active falling piece logic

use crate::board::Board;
use crate::error::Fault;
use crate::tetromino::{occupied, Direction, RotationDirection, Shape, TetrominoKind};
use ratatui::style::Color;

/// A falling piece
///
/// The anchor is the board position of the top-left corner of the 4x4
/// pattern. Every operation either applies fully or leaves the piece as it
/// was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tetromino {
    kind: TetrominoKind,
    rotation: usize,
    row: i32,
    col: i32,
    color: Color,
}

impl Tetromino {
    /// Create a piece at an anchor (row, col)
    pub fn new(kind: TetrominoKind, rotation: usize, anchor: (i32, i32), color: Color) -> Self {
        Self {
            kind,
            rotation: rotation % kind.rotation_count(),
            row: anchor.0,
            col: anchor.1,
            color,
        }
    }

    pub fn kind(&self) -> TetrominoKind {
        self.kind
    }

    /// Index into the kind's rotation states
    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Anchor as (row, col)
    pub fn anchor(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Current occupancy pattern
    pub fn shape(&self) -> &'static Shape {
        self.kind.shape(self.rotation)
    }

    /// Absolute board positions of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + Clone + use<> {
        Self::cells_at(self.shape(), self.row, self.col)
    }

    fn cells_at(shape: &'static Shape, row: i32, col: i32) -> impl Iterator<Item = (i32, i32)> + Clone {
        occupied(shape).map(move |(dr, dc)| (row + dr, col + dc))
    }

    /// Shift one step, or report why not
    pub fn try_move(&mut self, direction: Direction, board: &Board) -> Result<(), Fault> {
        let (dr, dc) = direction.offset();
        board.check_placement(Self::cells_at(self.shape(), self.row + dr, self.col + dc))?;
        self.row += dr;
        self.col += dc;
        Ok(())
    }

    /// Move down until blocked and return the distance dropped
    pub fn move_all_the_way_down(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.try_move(Direction::Down, board).is_ok() {
            distance += 1;
        }
        distance
    }

    /// Switch to the neighbouring rotation state in place
    ///
    /// No wall kicks: the candidate shape is validated at the current anchor
    /// and rejected outright if it does not fit.
    pub fn rotate(&mut self, direction: RotationDirection, board: &Board) -> Result<(), Fault> {
        let candidate = direction.apply(self.rotation, self.kind.rotation_count());
        board.check_placement(Self::cells_at(self.kind.shape(candidate), self.row, self.col))?;
        self.rotation = candidate;
        Ok(())
    }

    /// Write this piece into the board
    ///
    /// A piece resting with its anchor on or above the top row means the stack
    /// has run out of room, so the board is left untouched and `GameOver` is
    /// returned.
    pub fn land(&self, board: &mut Board) -> Result<(), Fault> {
        if self.row <= 0 {
            return Err(Fault::GameOver);
        }
        if !self.cells().all(|(row, col)| board.in_bounds(row, col)) {
            return Err(Fault::OutOfBounds);
        }
        board.fill(self.cells(), self.color);
        Ok(())
    }
}
