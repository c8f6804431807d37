//! Block Stack (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests, and benches can write `block_stack::{core, input, settings, term,
//! types}`.

pub use block_stack_core as core;
pub use block_stack_input as input;
pub use block_stack_settings as settings;
pub use block_stack_term as term;
pub use block_stack_types as types;
