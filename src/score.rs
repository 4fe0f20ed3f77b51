//! Score tracking

use serde::Serialize;

/// Running totals for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total rows cleared
    pub lines: u32,
    /// Pieces landed
    pub pieces: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit cleared rows at a fixed reward per row
    pub fn add_rows(&mut self, rows: usize, points_per_row: u32) {
        self.lines += rows as u32;
        self.points += rows as u64 * points_per_row as u64;
    }

    pub fn add_piece(&mut self) {
        self.pieces += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_scale_points() {
        let mut score = Score::new();
        score.add_rows(3, 10);
        assert_eq!(score.points, 30);
        assert_eq!(score.lines, 3);
        score.add_rows(0, 10);
        assert_eq!(score.points, 30);
    }
}
