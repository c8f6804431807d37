//! Core game logic - pure, deterministic, and testable
//!
//! All gameplay rules live here: the piece catalog and its pivot rotation,
//! the board of locked cells, move/turn legality, line clearing, scoring and
//! levels, and the session state machine that ties them together. Nothing in
//! this crate touches a terminal, a file, or a clock; time arrives as
//! `elapsed_ms` through [`GameState::tick`].
//!
//! # Module Structure
//!
//! - [`piece`]: shape table, spawn, translate, rotate + bounds clamp
//! - [`board`]: `width x height` grid of locked cells
//! - [`collision`]: `can_move` / `can_rotate` predicates
//! - [`line_clear`]: detect, clear, and compact full rows
//! - [`rng`]: uniform piece randomizer
//! - [`scoring`]: clear/drop points, levels, gravity ratchet
//! - [`config`]: session configuration and its validation
//! - [`game_state`]: the session state machine
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use block_stack_core::{GameConfig, GameState};
//! use block_stack_types::{GameAction, SessionState};
//!
//! let mut game = GameState::new(GameConfig::without_delays(), 12345).unwrap();
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.state(), SessionState::Playing);
//! assert!(game.score() > 0); // Hard drop awards a point per row
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod line_clear;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use block_stack_types as types;

pub use board::Board;
pub use collision::{can_move, can_rotate};
pub use config::{Axis, ConfigError, GameConfig};
pub use game_state::GameState;
pub use line_clear::{clear_rows, detect_complete_lines, shift_down};
pub use piece::Piece;
pub use rng::{Randomizer, SequenceRandomizer, SimpleRng, UniformRandomizer};
pub use scoring::{level_for_lines, line_clear_points};
pub use snapshot::GameSnapshot;
