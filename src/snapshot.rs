//! Serializable view of a game for renderers and tooling

use crate::game::{Game, GameState};
use crate::piece::Tetromino;
use crate::tetromino::TetrominoKind;
use ratatui::style::Color;
use serde::Serialize;

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    /// Landed cells, top row first; the active piece is not included
    pub cells: Vec<Vec<Option<Color>>>,
    pub active: PieceView,
    pub next: PieceView,
    pub score: u64,
    pub lines: u32,
    pub pieces: u32,
    pub state: GameState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceView {
    pub kind: TetrominoKind,
    pub rotation: usize,
    pub row: i32,
    pub col: i32,
    pub color: Color,
    /// Absolute (row, col) of each occupied cell
    pub cells: Vec<(i32, i32)>,
}

impl From<&Tetromino> for PieceView {
    fn from(piece: &Tetromino) -> Self {
        let (row, col) = piece.anchor();
        Self {
            kind: piece.kind(),
            rotation: piece.rotation(),
            row,
            col,
            color: piece.color(),
            cells: piece.cells().collect(),
        }
    }
}

impl Snapshot {
    pub fn capture(game: &Game) -> Self {
        let board = game.board();
        let score = game.score();
        Self {
            width: board.width(),
            height: board.height(),
            cells: board
                .rows()
                .iter()
                .map(|row| row.iter().map(|cell| cell.color()).collect())
                .collect(),
            active: game.active().into(),
            next: game.next().into(),
            score: score.points,
            lines: score.lines,
            pieces: score.pieces,
            state: game.state(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bag::ScriptedSource;
    use crate::game::TickOutcome;
    use crate::settings::Settings;

    #[test]
    fn test_snapshot_reflects_game() {
        let mut game = Game::with_source(
            &Settings::default(),
            Box::new(ScriptedSource::new([TetrominoKind::O, TetrominoKind::Z])),
        )
        .unwrap();
        game.drop_all_the_way().unwrap();
        let outcome = loop {
            match game.tick().unwrap() {
                TickOutcome::Waiting => continue,
                outcome => break outcome,
            }
        };
        assert_eq!(outcome, TickOutcome::Landed { rows_cleared: 0 });

        let snapshot = game.snapshot();
        assert_eq!((snapshot.height, snapshot.width), (16, 10));
        assert_eq!(snapshot.cells[15][4], Some(Color::Blue));
        assert_eq!(snapshot.cells[15][3], None);
        assert_eq!(snapshot.active.kind, TetrominoKind::Z);
        assert_eq!(snapshot.active.cells, vec![(0, 3), (0, 4), (1, 4), (1, 5)]);
        assert_eq!(snapshot.next.kind, TetrominoKind::O);
        assert_eq!(snapshot.pieces, 1);
        assert_eq!(snapshot.state, GameState::Running);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let game = Game::with_seed(&Settings::default(), 1).unwrap();
        let json = game.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["width"], 10);
        assert_eq!(value["state"], "Running");
        assert_eq!(value["cells"].as_array().unwrap().len(), 16);
        assert_eq!(value["active"]["cells"].as_array().unwrap().len(), 4);
    }
}
