//! Board tests

use block_stack::core::{Board, Piece};
use block_stack::types::{ColorTag, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::standard();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "Cell ({}, {}) should be valid", x, y);
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::standard();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);
    assert!(!board.is_occupied(-1, 0));
    assert!(!board.is_valid(0, BOARD_HEIGHT as i8));
}

#[test]
fn test_board_set_and_occupancy() {
    let mut board = Board::standard();
    assert!(board.set(5, 10, Some(ColorTag::Orange)));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_valid(5, 10));

    assert!(board.set(5, 10, None));
    assert!(board.is_valid(5, 10));

    assert!(!board.set(10, 10, Some(ColorTag::Orange)));
}

#[test]
fn test_lock_uses_piece_color_and_deactivates() {
    let mut board = Board::standard();
    let mut piece = Piece::spawn_at(PieceKind::T, (4, 18));
    assert!(board.lock(&mut piece));

    assert!(!piece.is_active());
    for &(x, y) in piece.cells() {
        assert_eq!(board.get(x, y), Some(Some(ColorTag::Purple)));
    }
}

#[test]
fn test_lock_refuses_overlap() {
    let mut board = Board::standard();
    let mut first = Piece::spawn_at(PieceKind::O, (0, 18));
    let mut second = Piece::spawn_at(PieceKind::O, (1, 18));
    assert!(board.lock(&mut first));
    assert!(!board.lock(&mut second));
    assert!(second.is_active());
    assert_eq!(board.locked_count(), 4);
}

#[test]
fn test_row_full_detection() {
    let mut board = Board::standard();
    for x in 0..BOARD_WIDTH as i8 {
        board.set(x, 19, Some(ColorTag::Cyan));
    }
    assert!(board.is_row_full(19));
    assert!(!board.is_row_full(18));

    board.set(3, 19, None);
    assert!(!board.is_row_full(19));
    assert!(board.row_has_locked(19));
}

#[test]
fn test_ascii_round_trip_of_shape() {
    let rows = ["..#.......", "#########."];
    let board = Board::from_ascii(10, 20, &rows);
    let ascii = board.to_ascii();
    assert_eq!(ascii.len(), 20);
    assert_eq!(ascii[18], rows[0]);
    assert_eq!(ascii[19], rows[1]);
    assert_eq!(ascii[0], "..........");
}

#[test]
fn test_clear_empties_everything() {
    let mut board = Board::from_ascii(10, 20, &["##########", "#.#.#.#.#."]);
    board.clear();
    assert_eq!(board.locked_count(), 0);
}
