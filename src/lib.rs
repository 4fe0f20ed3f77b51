//! A display-agnostic falling-block engine
//!
//! The [`Game`] owns a [`Board`] of landed cells, the falling [`Tetromino`]
//! and the queued one, a fall counter and the score. A front-end drives it by
//! calling [`Game::tick`] on a fixed period and forwarding player commands;
//! it reads the board, pieces and score back to draw them.
//!
//! Commands return `Result<_, Fault>`. `OutOfBounds` and `Collision` mean the
//! command was refused and nothing changed; `GameOver` out of a tick means
//! the game has ended and only [`Game::restart`] continues it.

pub mod bag;
pub mod board;
pub mod error;
pub mod game;
pub mod piece;
pub mod score;
pub mod settings;
pub mod snapshot;
pub mod tetromino;

pub use bag::{BagSource, PieceSource, ScriptedSource, UniformSource};
pub use board::{Board, Cell};
pub use error::Fault;
pub use game::{Action, Game, GameState, TickOutcome};
pub use piece::Tetromino;
pub use score::Score;
pub use settings::{Palette, Randomizer, Settings, SettingsError};
pub use snapshot::Snapshot;
pub use tetromino::{Direction, RotationDirection, Shape, TetrominoKind};
