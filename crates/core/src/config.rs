//! Session configuration and its validation.
//!
//! A configuration that cannot produce well-defined geometry (a board too
//! small for the spawn shapes, a gravity floor above the base interval, ...)
//! is rejected up front so a session never starts with it.

use std::fmt;

use crate::piece::Piece;
use crate::types::{
    PieceKind, BASE_GRAVITY_MS, BOARD_HEIGHT, BOARD_WIDTH, GAME_OVER_DELAY_MS, MAX_BOARD_DIM,
    MIN_BOARD_HEIGHT, MIN_BOARD_WIDTH, MIN_GRAVITY_MS, RESUME_COUNTDOWN_MS,
};

/// Everything a session needs to know up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Gravity interval at level 1.
    pub base_gravity_ms: u32,
    /// Floor for the halving ratchet.
    pub min_gravity_ms: u32,
    /// Busy countdown after start and after resuming from pause.
    pub resume_countdown_ms: u32,
    /// Busy delay between losing and finalizing the session.
    pub game_over_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            base_gravity_ms: BASE_GRAVITY_MS,
            min_gravity_ms: MIN_GRAVITY_MS,
            resume_countdown_ms: RESUME_COUNTDOWN_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Standard board with both busy delays disabled.
    pub fn without_delays() -> Self {
        Self {
            resume_countdown_ms: 0,
            game_over_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Check that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, value, min) in [
            (Axis::Width, self.width, MIN_BOARD_WIDTH),
            (Axis::Height, self.height, MIN_BOARD_HEIGHT),
        ] {
            if value < min || value > MAX_BOARD_DIM {
                return Err(ConfigError::BoardDimension {
                    axis,
                    value,
                    min,
                    max: MAX_BOARD_DIM,
                });
            }
        }

        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            let fits = piece.cells().iter().all(|&(x, y)| {
                x >= 0 && y >= 0 && (x as u8) < self.width && (y as u8) < self.height
            });
            if !fits {
                return Err(ConfigError::SpawnOutOfBounds {
                    kind,
                    width: self.width,
                    height: self.height,
                });
            }
        }

        if self.min_gravity_ms == 0 || self.min_gravity_ms > self.base_gravity_ms {
            return Err(ConfigError::Gravity {
                base_ms: self.base_gravity_ms,
                min_ms: self.min_gravity_ms,
            });
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Fatal configuration problems; a session refuses to start with any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    BoardDimension {
        axis: Axis,
        value: u8,
        min: u8,
        max: u8,
    },
    SpawnOutOfBounds {
        kind: PieceKind,
        width: u8,
        height: u8,
    },
    Gravity {
        base_ms: u32,
        min_ms: u32,
    },
    BoardMismatch {
        expected: (u8, u8),
        actual: (u8, u8),
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoardDimension {
                axis,
                value,
                min,
                max,
            } => write!(f, "board {axis} {value} is outside {min}..={max}"),
            Self::SpawnOutOfBounds {
                kind,
                width,
                height,
            } => write!(
                f,
                "spawn shape of piece {} does not fit a {width}x{height} board",
                kind.as_str()
            ),
            Self::Gravity { base_ms, min_ms } => write!(
                f,
                "gravity floor {min_ms}ms must be non-zero and not above the base interval {base_ms}ms"
            ),
            Self::BoardMismatch { expected, actual } => write!(
                f,
                "board is {}x{} but the session expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
