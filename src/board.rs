//! Game board representation and collision detection

use crate::error::Fault;
use ratatui::style::Color;

/// Canonical board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 16;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Filled(color) => Some(*color),
        }
    }
}

/// The landed-cell matrix
///
/// Holds only landed cells; the falling piece is never written here until
/// it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    /// Grid stored as rows[row][col], row 0 is the top
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if !self.in_bounds(row, col) {
            return None;
        }
        Some(self.rows[row as usize][col as usize])
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.height() && (col as usize) < self.width
    }

    /// Validate a candidate placement
    ///
    /// Every cell is bounds-checked before any cell is collision-checked, so a
    /// placement that both leaves the board and overlaps reports `OutOfBounds`.
    pub fn check_placement<I>(&self, cells: I) -> Result<(), Fault>
    where
        I: IntoIterator<Item = (i32, i32)>,
        I::IntoIter: Clone,
    {
        let cells = cells.into_iter();
        if !cells.clone().all(|(row, col)| self.in_bounds(row, col)) {
            return Err(Fault::OutOfBounds);
        }
        if cells.into_iter().any(|(row, col)| self.rows[row as usize][col as usize].is_filled()) {
            return Err(Fault::Collision);
        }
        Ok(())
    }

    /// Mark cells as filled
    ///
    /// Callers validate bounds first; out-of-range cells are skipped.
    pub(crate) fn fill<I>(&mut self, cells: I, color: Color)
    where
        I: IntoIterator<Item = (i32, i32)>,
    {
        for (row, col) in cells {
            if self.in_bounds(row, col) {
                self.rows[row as usize][col as usize] = Cell::Filled(color);
            }
        }
    }

    /// Remove full rows and return the number cleared
    ///
    /// Remaining rows keep their relative order and an empty row is inserted
    /// at the top for each one removed.
    pub fn clear_rows(&mut self) -> usize {
        let full: Vec<usize> = (0..self.height()).filter(|&row| self.is_row_full(row)).collect();
        for &row in full.iter().rev() {
            self.rows.remove(row);
        }
        for _ in 0..full.len() {
            self.rows.insert(0, vec![Cell::Empty; self.width]);
        }
        full.len()
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(Cell::is_filled))
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(Cell::is_empty))
    }

    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: i32, except: Option<i32>) {
        let width = board.width() as i32;
        let cells: Vec<_> = (0..width)
            .filter(|col| Some(*col) != except)
            .map(|col| (row, col))
            .collect();
        board.fill(cells, Color::Cyan);
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(board.width(), 10);
        assert_eq!(board.height(), 16);
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::default();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(BOARD_HEIGHT as i32, 0), None);
        assert_eq!(board.get(0, BOARD_WIDTH as i32), None);
        assert_eq!(board.get(15, 9), Some(Cell::Empty));
    }

    #[test]
    fn test_bounds_reported_before_collision() {
        let mut board = Board::default();
        board.fill([(15, 0)], Color::Red);
        assert_eq!(
            board.check_placement([(15, 0), (15, -1)]),
            Err(Fault::OutOfBounds)
        );
        assert_eq!(board.check_placement([(15, 0), (14, 0)]), Err(Fault::Collision));
        assert_eq!(board.check_placement([(14, 0), (14, 1)]), Ok(()));
    }

    #[test]
    fn test_clear_single_line() {
        let mut board = Board::default();
        fill_row(&mut board, 15, None);
        board.fill([(14, 0)], Color::Red);

        assert_eq!(board.clear_rows(), 1);
        // The block from row 14 should now be on row 15
        assert_eq!(board.get(15, 0), Some(Cell::Filled(Color::Red)));
        assert!(board.get(15, 1).unwrap().is_empty());
        assert!(board.rows()[0].iter().all(Cell::is_empty));
        assert_eq!(board.height(), 16);
    }

    #[test]
    fn test_partial_row_survives() {
        let mut board = Board::default();
        fill_row(&mut board, 15, Some(4));
        let before = board.clone();

        assert_eq!(board.clear_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_keeps_row_order() {
        let mut board = Board::default();
        fill_row(&mut board, 15, None);
        board.fill([(14, 1)], Color::Red);
        fill_row(&mut board, 13, None);
        board.fill([(12, 2)], Color::Blue);
        fill_row(&mut board, 11, Some(0));

        assert_eq!(board.clear_rows(), 2);
        assert_eq!(board.get(15, 1), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.get(14, 2), Some(Cell::Filled(Color::Blue)));
        assert!(board.get(13, 0).unwrap().is_empty());
        assert!(board.get(13, 1).unwrap().is_filled());
        assert!(!board.is_row_full(13));
        assert_eq!(board.filled_count(), 11);
    }

    #[test]
    fn test_clear_four_stacked_rows() {
        let mut board = Board::default();
        for row in 12..16 {
            fill_row(&mut board, row, None);
        }
        board.fill([(11, 5)], Color::Green);
        assert!((12..16).all(|row| board.is_row_full(row)));

        assert_eq!(board.clear_rows(), 4);
        assert_eq!(board.get(15, 5), Some(Cell::Filled(Color::Green)));
        assert_eq!(board.filled_count(), 1);
        assert!(!board.is_row_full(15));
    }

    #[test]
    fn test_reset() {
        let mut board = Board::default();
        fill_row(&mut board, 3, None);
        board.reset();
        assert!(board.is_empty());
    }
}
