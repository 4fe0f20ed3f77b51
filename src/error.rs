//! Faults reported by piece and game operations

use thiserror::Error;

/// Why a move, rotation, landing or tick was refused
///
/// All of these are expected outcomes. Nothing is mutated when one is
/// returned, except that `GameOver` out of a tick ends the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    /// Some occupied cell would leave the board
    #[error("placement would leave the board")]
    OutOfBounds,
    /// Some occupied cell would overlap a landed cell
    #[error("placement would overlap a landed cell")]
    Collision,
    /// A piece came to rest touching the top row
    #[error("the stack reached the top of the board")]
    GameOver,
    /// Command issued while the game is paused
    #[error("the game is paused")]
    Paused,
}

impl Fault {
    /// Faults an input layer should drop silently
    pub fn is_rejected_input(&self) -> bool {
        matches!(self, Fault::OutOfBounds | Fault::Collision)
    }
}
