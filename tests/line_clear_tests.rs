//! Line clear tests

use block_stack::core::line_clear::{clear_rows, detect_complete_lines, resolve, shift_down};
use block_stack::core::Board;
use block_stack::types::ColorTag;

fn fill_row(board: &mut Board, y: i8) {
    for x in 0..board.width() as i8 {
        board.set(x, y, Some(ColorTag::Cyan));
    }
}

#[test]
fn test_detects_multiple_rows() {
    let mut board = Board::standard();
    fill_row(&mut board, 4);
    fill_row(&mut board, 19);
    board.set(0, 10, Some(ColorTag::Red));
    assert_eq!(detect_complete_lines(&board).as_slice(), &[4, 19]);
}

#[test]
fn test_each_cell_drops_by_cleared_rows_below_it() {
    let mut board = Board::standard();
    let cleared = [5u8, 12, 19];
    for &y in &cleared {
        fill_row(&mut board, y as i8);
    }

    // One marker per row that is not cleared, each with a distinct column.
    let markers: Vec<(i8, i8)> = (0..20i8)
        .filter(|y| !cleared.contains(&(*y as u8)))
        .map(|y| ((y % 10), y))
        .collect();
    for &(x, y) in &markers {
        board.set(x, y, Some(ColorTag::Pink));
    }

    let rows = detect_complete_lines(&board);
    assert_eq!(rows.as_slice(), &cleared);
    clear_rows(&mut board, &rows);
    shift_down(&mut board, &rows);

    for &(x, y) in &markers {
        let below = cleared.iter().filter(|&&r| r as i8 > y).count() as i8;
        assert_eq!(
            board.get(x, y + below),
            Some(Some(ColorTag::Pink)),
            "marker from row {} should land on row {}",
            y,
            y + below
        );
    }
    assert_eq!(board.locked_count(), markers.len());
    for y in 0..20 {
        assert!(!board.is_row_full(y));
    }
}

#[test]
fn test_rows_above_top_clear_shift_uniformly() {
    let mut board = Board::from_ascii(
        10,
        20,
        &[
            "o.........", // 16
            ".t........", // 17
            "##########", // 18
            "##########", // 19
        ],
    );
    assert_eq!(resolve(&mut board).len(), 2);
    assert_eq!(board.get(0, 18), Some(Some(ColorTag::Yellow)));
    assert_eq!(board.get(1, 19), Some(Some(ColorTag::Purple)));
    assert_eq!(board.locked_count(), 2);
}

#[test]
fn test_row_order_in_list_does_not_matter() {
    let build = || {
        let mut board = Board::standard();
        fill_row(&mut board, 10);
        fill_row(&mut board, 15);
        board.set(2, 3, Some(ColorTag::Green));
        board.set(7, 12, Some(ColorTag::Green));
        board
    };

    let mut a = build();
    clear_rows(&mut a, &[10, 15]);
    shift_down(&mut a, &[10, 15]);

    let mut b = build();
    clear_rows(&mut b, &[15, 10]);
    shift_down(&mut b, &[15, 10]);

    assert_eq!(a, b);
    assert!(a.is_occupied(2, 5));
    assert!(a.is_occupied(7, 13));
}

#[test]
fn test_empty_board_is_untouched() {
    let mut board = Board::standard();
    assert!(resolve(&mut board).is_empty());
    assert_eq!(board, Board::standard());
}
