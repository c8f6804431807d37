//! Terminal front-end for the block-stacking game.
//!
//! Rendering goes snapshot -> [`GameView`] -> [`FrameBuffer`] ->
//! [`TerminalRenderer`]. Everything up to the framebuffer is pure and
//! unit-tested; only the renderer touches the terminal.
//!
//! Board cells are drawn 2 columns wide to offset the usual glyph aspect
//! ratio.

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use block_stack_core as core;
pub use block_stack_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use palette::Palette;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
