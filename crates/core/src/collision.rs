//! Collision module - legality predicates for moves and turns
//!
//! Both checks are pure: they inspect a candidate position and never touch
//! the piece or the board.

use crate::board::Board;
use crate::piece::Piece;
use crate::types::Direction;

/// True if every cell of the piece, moved one step in `direction`, lands
/// inside the board on an empty cell.
pub fn can_move(board: &Board, piece: &Piece, direction: Direction) -> bool {
    piece
        .translated(direction)
        .iter()
        .all(|&(x, y)| board.is_valid(x, y))
}

/// True if the quarter turn may be committed.
///
/// The raw turn must not hit a locked cell that lies inside the board, and
/// the position after the bounds clamp must be fully inside and empty. O is
/// always legal since it never changes.
pub fn can_rotate(board: &Board, piece: &Piece) -> bool {
    if piece.pivot().is_none() {
        return true;
    }

    let raw_clear = piece
        .rotated()
        .iter()
        .all(|&(x, y)| !board.is_occupied(x, y));
    if !raw_clear {
        return false;
    }

    piece
        .rotated_clamped(board.width(), board.height())
        .iter()
        .all(|&(x, y)| board.is_valid(x, y))
}

/// True if the piece's current cells are inside the board and empty.
pub fn fits(board: &Board, piece: &Piece) -> bool {
    piece.cells().iter().all(|&(x, y)| board.is_valid(x, y))
}

/// How many rows the piece can fall before resting.
pub fn drop_distance(board: &Board, piece: &Piece) -> u8 {
    let mut distance = 0u8;
    let mut probe = piece.clone();
    while can_move(board, &probe, Direction::Down) {
        probe.translate(Direction::Down);
        distance = distance.saturating_add(1);
    }
    distance
}
