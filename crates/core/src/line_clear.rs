//! Line clearing - detect full rows, empty them, and compact the stack
//!
//! Each surviving row `y` moves to `y + n`, where `n` is the number of cleared
//! rows strictly below it. Non-adjacent clears therefore keep the relative
//! order of the rows in between.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::MAX_BOARD_DIM;

/// Row indices, ascending.
pub type ClearedRows = ArrayVec<u8, { MAX_BOARD_DIM as usize }>;

/// Indices of all full rows, top to bottom.
pub fn detect_complete_lines(board: &Board) -> ClearedRows {
    (0..board.height())
        .filter(|&y| board.is_row_full(y as usize))
        .collect()
}

/// Empty every row in `rows`.
pub fn clear_rows(board: &mut Board, rows: &[u8]) {
    for &y in rows {
        board.empty_row(y as usize);
    }
}

/// Move every surviving row down by the count of cleared rows below it.
///
/// Expects `rows` to be empty already (see [`clear_rows`]).
pub fn shift_down(board: &mut Board, rows: &[u8]) {
    if rows.is_empty() {
        return;
    }
    // Bottom-up so a destination is always vacated before it is written.
    for y in (0..board.height()).rev() {
        if rows.contains(&y) {
            continue;
        }
        let below = rows.iter().filter(|&&r| r > y).count() as u8;
        if below > 0 {
            board.move_row(y as usize, (y + below) as usize);
        }
    }
}

/// Detect, clear and compact in one pass. Returns the cleared row indices.
pub fn resolve(board: &mut Board) -> ClearedRows {
    let rows = detect_complete_lines(board);
    if !rows.is_empty() {
        clear_rows(board, &rows);
        shift_down(board, &rows);
    }
    rows
}
