//! Core game state and logic

use crate::bag::PieceSource;
use crate::board::Board;
use crate::error::Fault;
use crate::piece::Tetromino;
use crate::score::Score;
use crate::settings::{GameplaySettings, Palette, Settings, SettingsError};
use crate::snapshot::Snapshot;
use crate::tetromino::{Direction, RotationDirection};
use serde::Serialize;
use std::mem;
use tracing::{debug, info};

/// Game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameState {
    Running,
    Paused,
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveDown,
    Drop,
    RotateLeft,
    RotateRight,
    /// Pause when running, resume when paused
    Pause,
    Restart,
}

/// What a successful tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Counter advanced, threshold not reached
    Waiting,
    /// Active piece descended one row
    Fell,
    /// Active piece landed and the next one took its place
    Landed { rows_cleared: usize },
}

/// The main game struct
pub struct Game {
    gameplay: GameplaySettings,
    palette: Palette,
    source: Box<dyn PieceSource>,
    board: Board,
    active: Tetromino,
    next: Tetromino,
    /// Ticks since the last automatic descent
    fall_counter: u32,
    score: Score,
    state: GameState,
}

impl Game {
    /// Create a new game, seeding the randomizer from settings or entropy
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        let seed = settings.gameplay.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    /// Create a new game with a fixed randomizer seed
    pub fn with_seed(settings: &Settings, seed: u64) -> Result<Self, SettingsError> {
        let source = settings
            .randomizer
            .build(seed, settings.gameplay.random_spawn_rotation);
        Self::with_source(settings, source)
    }

    /// Create a new game drawing pieces from `source`
    pub fn with_source(
        settings: &Settings,
        mut source: Box<dyn PieceSource>,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let gameplay = settings.gameplay.clone();
        let palette = settings.palette;
        let active = spawn(source.as_mut(), &gameplay, &palette);
        let next = spawn(source.as_mut(), &gameplay, &palette);
        debug!(
            "new {}x{} game, first pieces {} then {}",
            gameplay.height,
            gameplay.width,
            active.kind().letter(),
            next.kind().letter()
        );

        Ok(Self {
            board: Board::new(gameplay.width, gameplay.height),
            gameplay,
            palette,
            source,
            active,
            next,
            fall_counter: 0,
            score: Score::new(),
            state: GameState::Running,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The falling piece
    pub fn active(&self) -> &Tetromino {
        &self.active
    }

    /// The queued piece, for previews
    pub fn next(&self) -> &Tetromino {
        &self.next
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn points(&self) -> u64 {
        self.score.points
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    pub fn fall_counter(&self) -> u32 {
        self.fall_counter
    }

    pub fn gameplay(&self) -> &GameplaySettings {
        &self.gameplay
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) -> Result<(), Fault> {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::MoveDown => self.move_down(),
            Action::Drop => self.drop_all_the_way().map(|_| ()),
            Action::RotateLeft => self.rotate_left(),
            Action::RotateRight => self.rotate_right(),
            Action::Pause => self.toggle_pause(),
            Action::Restart => {
                self.restart();
                Ok(())
            }
        }
    }

    pub fn move_left(&mut self) -> Result<(), Fault> {
        self.shift(Direction::Left)
    }

    pub fn move_right(&mut self) -> Result<(), Fault> {
        self.shift(Direction::Right)
    }

    pub fn move_down(&mut self) -> Result<(), Fault> {
        self.shift(Direction::Down)
    }

    /// Drop the active piece as far as it goes and return the rows descended
    ///
    /// The piece lands on the following fall tick, not here.
    pub fn drop_all_the_way(&mut self) -> Result<u32, Fault> {
        self.ensure_running()?;
        Ok(self.active.move_all_the_way_down(&self.board))
    }

    pub fn rotate_left(&mut self) -> Result<(), Fault> {
        self.turn(RotationDirection::Left)
    }

    pub fn rotate_right(&mut self) -> Result<(), Fault> {
        self.turn(RotationDirection::Right)
    }

    fn shift(&mut self, direction: Direction) -> Result<(), Fault> {
        self.ensure_running()?;
        self.active.try_move(direction, &self.board)
    }

    fn turn(&mut self, direction: RotationDirection) -> Result<(), Fault> {
        self.ensure_running()?;
        self.active.rotate(direction, &self.board)?;
        debug!(
            "rotated {} to state {}",
            self.active.kind().letter(),
            self.active.rotation()
        );
        Ok(())
    }

    fn ensure_running(&self) -> Result<(), Fault> {
        match self.state {
            GameState::Running => Ok(()),
            GameState::Paused => Err(Fault::Paused),
            GameState::GameOver => Err(Fault::GameOver),
        }
    }

    /// Advance the fall timer by one tick
    ///
    /// Every `tick_threshold` ticks the active piece tries to descend. When it
    /// cannot, it lands, full rows are cleared and the queued piece becomes
    /// active. A landing at the top row, or a new piece that overlaps the
    /// stack at spawn, ends the game and returns `GameOver`.
    pub fn tick(&mut self) -> Result<TickOutcome, Fault> {
        self.ensure_running()?;
        self.fall_counter += 1;
        if self.fall_counter < self.gameplay.tick_threshold {
            return Ok(TickOutcome::Waiting);
        }
        self.fall_counter = 0;

        match self.active.try_move(Direction::Down, &self.board) {
            Ok(()) => Ok(TickOutcome::Fell),
            Err(fault) => {
                debug!(
                    "{} blocked at {:?} ({}), landing",
                    self.active.kind().letter(),
                    self.active.anchor(),
                    fault
                );
                self.land_active()
            }
        }
    }

    fn land_active(&mut self) -> Result<TickOutcome, Fault> {
        if let Err(fault) = self.active.land(&mut self.board) {
            if fault == Fault::GameOver {
                self.end_game();
            }
            return Err(fault);
        }
        self.score.add_piece();
        let rows_cleared = self.clear_rows();

        let fresh = spawn(self.source.as_mut(), &self.gameplay, &self.palette);
        self.active = mem::replace(&mut self.next, fresh);
        debug!(
            "spawned {}, next {}",
            self.active.kind().letter(),
            self.next.kind().letter()
        );

        // Topped out: the new piece has no room at the spawn anchor
        if let Err(fault) = self.board.check_placement(self.active.cells()) {
            debug!(
                "{} blocked at spawn ({}), topping out",
                self.active.kind().letter(),
                fault
            );
            self.end_game();
            return Err(Fault::GameOver);
        }
        Ok(TickOutcome::Landed { rows_cleared })
    }

    fn end_game(&mut self) {
        self.state = GameState::GameOver;
        info!(
            "game over: score={} lines={} pieces={}",
            self.score.points, self.score.lines, self.score.pieces
        );
    }

    /// Remove full rows and credit the score; returns the rows removed
    pub fn clear_rows(&mut self) -> usize {
        let rows = self.board.clear_rows();
        if rows > 0 {
            self.score.add_rows(rows, self.gameplay.points_per_row());
            debug!("cleared {} rows, score {}", rows, self.score.points);
        }
        rows
    }

    pub fn pause(&mut self) -> Result<(), Fault> {
        match self.state {
            GameState::GameOver => Err(Fault::GameOver),
            GameState::Paused => Ok(()),
            GameState::Running => {
                self.state = GameState::Paused;
                info!("paused");
                Ok(())
            }
        }
    }

    pub fn resume(&mut self) -> Result<(), Fault> {
        match self.state {
            GameState::GameOver => Err(Fault::GameOver),
            GameState::Running => Ok(()),
            GameState::Paused => {
                self.state = GameState::Running;
                info!("resumed");
                Ok(())
            }
        }
    }

    pub fn toggle_pause(&mut self) -> Result<(), Fault> {
        if self.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Start over with an empty board, fresh pieces and zero score
    pub fn restart(&mut self) {
        self.board.reset();
        self.active = spawn(self.source.as_mut(), &self.gameplay, &self.palette);
        self.next = spawn(self.source.as_mut(), &self.gameplay, &self.palette);
        self.fall_counter = 0;
        self.score = Score::new();
        self.state = GameState::Running;
        info!("restarted");
    }
}

/// A new piece at the spawn anchor: top row, centered
fn spawn(source: &mut dyn PieceSource, gameplay: &GameplaySettings, palette: &Palette) -> Tetromino {
    let kind = source.next_kind();
    let rotation = source.initial_rotation(kind);
    Tetromino::new(
        kind,
        rotation,
        (0, gameplay.spawn_column()),
        palette.color(kind),
    )
}
