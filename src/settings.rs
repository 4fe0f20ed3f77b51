//! Settings persistence using TOML
//!
//! Stores settings in ~/.config/tetris-engine/settings.toml (or platform
//! equivalent). Every section falls back to its defaults when absent.

use crate::bag::{BagSource, PieceSource, UniformSource};
use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::tetromino::{TetrominoKind, SHAPE_SIZE};
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Default number of ticks between automatic one-row descents
pub const TICK_THRESHOLD: u32 = 5;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Piece randomizer
    pub randomizer: Randomizer,
    /// Board and timing settings
    pub gameplay: GameplaySettings,
    /// Color identity per kind
    pub palette: Palette,
}

/// How new pieces are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Randomizer {
    #[default]
    Uniform,
    Bag,
}

impl Randomizer {
    pub fn build(&self, seed: u64, random_rotation: bool) -> Box<dyn PieceSource> {
        match self {
            Randomizer::Uniform => Box::new(UniformSource::with_seed(seed, random_rotation)),
            Randomizer::Bag => Box::new(BagSource::with_seed(seed, random_rotation)),
        }
    }
}

/// Gameplay settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    pub width: usize,
    pub height: usize,
    /// Ticks between automatic descents
    pub tick_threshold: u32,
    /// Reward per cleared row; the board width when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_per_row: Option<u32>,
    /// Anchor column of new pieces; centered when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spawn_column: Option<i32>,
    /// Start new pieces in a random rotation state instead of state 0
    pub random_spawn_rotation: bool,
    /// Randomizer seed; drawn from entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            tick_threshold: TICK_THRESHOLD,
            points_per_row: None,
            spawn_column: None,
            random_spawn_rotation: true,
            seed: None,
        }
    }
}

impl GameplaySettings {
    pub fn points_per_row(&self) -> u32 {
        self.points_per_row.unwrap_or(self.width as u32)
    }

    pub fn spawn_column(&self) -> i32 {
        self.spawn_column
            .unwrap_or((self.width.saturating_sub(SHAPE_SIZE) / 2) as i32)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.width < SHAPE_SIZE || self.height < SHAPE_SIZE {
            return Err(SettingsError::Invalid(format!(
                "board must be at least {SHAPE_SIZE}x{SHAPE_SIZE}, got {}x{}",
                self.height, self.width
            )));
        }
        if self.tick_threshold == 0 {
            return Err(SettingsError::Invalid(
                "tick_threshold must be at least 1".to_string(),
            ));
        }
        let column = self.spawn_column();
        if column < 0 || column as usize + SHAPE_SIZE > self.width {
            return Err(SettingsError::Invalid(format!(
                "spawn_column {column} leaves no room for a {SHAPE_SIZE}-wide piece"
            )));
        }
        Ok(())
    }
}

/// Color per tetromino kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub i: Color,
    pub o: Color,
    pub t: Color,
    pub l: Color,
    pub j: Color,
    pub s: Color,
    pub z: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            i: Color::Yellow,
            o: Color::Blue,
            t: Color::Green,
            l: Color::Red,
            j: Color::Magenta,
            s: Color::Cyan,
            z: Color::White,
        }
    }
}

impl Palette {
    pub fn color(&self, kind: TetrominoKind) -> Color {
        match kind {
            TetrominoKind::I => self.i,
            TetrominoKind::O => self.o,
            TetrominoKind::T => self.t,
            TetrominoKind::L => self.l,
            TetrominoKind::J => self.j,
            TetrominoKind::S => self.s,
            TetrominoKind::Z => self.z,
        }
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetris-engine", "tetris-engine")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from the default path, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load and validate settings from a file
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String, SettingsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.gameplay.validate()
    }

    /// Save settings to the default path
    pub fn save(&self) -> Result<(), SettingsError> {
        let path = Self::settings_path().ok_or(SettingsError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save settings to a file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let io_error = |source: io::Error| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(io_error)?;
        }
        let contents = self.to_toml_string()?;
        fs::write(path, contents).map_err(io_error)?;
        Ok(())
    }
}
