//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! from the gameplay core, the terminal front-end, and the settings layer alike.
//!
//! # Board Dimensions
//!
//! The standard playfield is 10 columns by 20 rows. Rows are indexed from the
//! top (`y = 0`) to the bottom (`y = height - 1`); columns from the left.
//!
//! # Timing Constants
//!
//! All durations are integer milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal runner (~60 FPS) |
//! | `BASE_GRAVITY_MS` | 1000 | Gravity interval at level 1 |
//! | `MIN_GRAVITY_MS` | 100 | Floor for the halving ratchet |
//! | `RESUME_COUNTDOWN_MS` | 3000 | "Ready" countdown after start/resume |
//! | `GAME_OVER_DELAY_MS` | 3000 | Delay before a lost session is finalized |
//!
//! # Examples
//!
//! ```
//! use block_stack_types::{ColorTag, Direction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), ColorTag::Purple);
//!
//! assert_eq!(Direction::Left.offset(), (-1, 0));
//! assert_eq!(Direction::Down.offset(), (0, 1));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Standard board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Standard board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Smallest board width that still fits every spawn shape
pub const MIN_BOARD_WIDTH: u8 = 7;

/// Smallest board height that still fits every spawn shape
pub const MIN_BOARD_HEIGHT: u8 = 4;

/// Largest supported board dimension (coordinates are `i8`)
pub const MAX_BOARD_DIM: u8 = 64;

/// Frame interval used by the terminal runner (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (one row per second)
pub const BASE_GRAVITY_MS: u32 = 1000;

/// Gravity never gets faster than this
pub const MIN_GRAVITY_MS: u32 = 100;

/// "Ready" countdown before play starts or resumes
pub const RESUME_COUNTDOWN_MS: u32 = 3000;

/// Delay between losing and finalizing the session
pub const GAME_OVER_DELAY_MS: u32 = 3000;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// A board coordinate `(x, y)`; `y` grows downward.
pub type Coord = (i8, i8);

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    L,
    J,
    T,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_stack_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::T => "t",
        }
    }

    /// Display color tag of the kind.
    pub fn color(&self) -> ColorTag {
        match self {
            PieceKind::I => ColorTag::Cyan,
            PieceKind::O => ColorTag::Yellow,
            PieceKind::S => ColorTag::Red,
            PieceKind::Z => ColorTag::Green,
            PieceKind::L => ColorTag::Orange,
            PieceKind::J => ColorTag::Pink,
            PieceKind::T => ColorTag::Purple,
        }
    }

    /// Whether the kind turns at all (the O square does not).
    pub fn rotates(&self) -> bool {
        !matches!(self, PieceKind::O)
    }
}

/// Color tag carried by pieces and locked cells.
///
/// The core never resolves these to real colors; that is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Cyan,
    Yellow,
    Red,
    Green,
    Orange,
    Pink,
    Purple,
}

impl ColorTag {
    /// Compact non-zero code used by snapshots (`0` is reserved for empty).
    pub fn code(&self) -> u8 {
        match self {
            ColorTag::Cyan => 1,
            ColorTag::Yellow => 2,
            ColorTag::Red => 3,
            ColorTag::Green => 4,
            ColorTag::Orange => 5,
            ColorTag::Pink => 6,
            ColorTag::Purple => 7,
        }
    }

    /// Inverse of [`ColorTag::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ColorTag::Cyan),
            2 => Some(ColorTag::Yellow),
            3 => Some(ColorTag::Red),
            4 => Some(ColorTag::Green),
            5 => Some(ColorTag::Orange),
            6 => Some(ColorTag::Pink),
            7 => Some(ColorTag::Purple),
            _ => None,
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(ColorTag)`: locked, tagged with the color of the piece that filled it
pub type Cell = Option<ColorTag>;

/// Translation directions a piece can be moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset `(dx, dy)` of a single step.
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Quarter-turn counter of a piece.
///
/// Purely informational: four clockwise turns return a piece to its original
/// cells regardless of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationStep {
    #[default]
    Step0,
    Step90,
    Step180,
    Step270,
}

impl RotationStep {
    /// Advance one quarter turn (mod 4).
    pub fn next(&self) -> Self {
        match self {
            RotationStep::Step0 => RotationStep::Step90,
            RotationStep::Step90 => RotationStep::Step180,
            RotationStep::Step180 => RotationStep::Step270,
            RotationStep::Step270 => RotationStep::Step0,
        }
    }
}

/// Logical input intents consumed by the game loop
///
/// Intents are edge-triggered: the input layer emits one per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (+1 point)
    SoftDrop,
    /// Quarter-turn around the pivot cell
    Rotate,
    /// Drop to the lowest legal position and lock immediately
    HardDrop,
    /// Toggle between playing and paused
    TogglePause,
    /// Start a session, or play again after a finished one
    Start,
}

/// Lifecycle of a game session.
///
/// `NotStarted -> Playing <-> Paused`, `Playing -> GameOver -> NotStarted` (reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    NotStarted,
    Playing,
    Paused,
    GameOver,
}

/// Timed sub-state during which every intent is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusyPhase {
    /// "Ready" countdown after start or resume.
    Countdown,
    /// Lose delay before the session is finalized.
    Finalizing,
}

/// Notifications emitted by the game loop for sound/UI layers.
///
/// Queued by the core and drained by whoever cares; nothing in the core
/// depends on them being consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    PieceSpawned { kind: PieceKind },
    PieceMoved { direction: Direction },
    PieceRotated { step: RotationStep },
    PieceLocked { kind: PieceKind },
    LinesCleared { count: u32, points: u32 },
    LevelUp { level: u32, gravity_ms: u32 },
    Paused,
    Resumed,
    GameOver { score: u32 },
    SessionFinished { score: u32, best_score: u32 },
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing_constants() {
        assert_eq!(BASE_GRAVITY_MS, 1000);
        assert_eq!(MIN_GRAVITY_MS, 100);
        assert_eq!(RESUME_COUNTDOWN_MS, 3000);
        assert_eq!(GAME_OVER_DELAY_MS, 3000);
        assert_eq!(LINES_PER_LEVEL, 10);
    }

    #[test]
    fn color_codes_roundtrip_and_skip_zero() {
        for kind in PieceKind::ALL {
            let color = kind.color();
            assert_ne!(color.code(), 0);
            assert_eq!(ColorTag::from_code(color.code()), Some(color));
        }
        assert_eq!(ColorTag::from_code(0), None);
    }

    #[test]
    fn rotation_step_wraps_after_four() {
        let mut step = RotationStep::default();
        for _ in 0..4 {
            step = step.next();
        }
        assert_eq!(step, RotationStep::Step0);
    }

    #[test]
    fn only_o_does_not_rotate() {
        for kind in PieceKind::ALL {
            assert_eq!(kind.rotates(), kind != PieceKind::O);
        }
    }
}
