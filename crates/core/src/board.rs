//! Board module - the playfield of locked cells
//!
//! The board is a `width x height` grid where each cell is either empty or
//! locked with a color tag. The falling piece is never stored here; it only
//! becomes part of the board when [`Board::lock`] is called.
//!
//! Uses a flat row-major vector, allocated once per session.
//! Coordinates: `(x, y)` with `x` in `0..width` (left to right) and `y` in
//! `0..height` (top to bottom).

use crate::piece::Piece;
use crate::types::{Cell, ColorTag, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board using flat storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board of the given size
    pub fn new(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Create an empty 10x20 board
    pub fn standard() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Build a board from text rows aligned to the bottom edge.
    ///
    /// `.` is empty, a piece letter locks a cell with that kind's color, `#`
    /// locks a cyan cell. Anything else is treated as empty. Rows longer than
    /// the board are truncated.
    pub fn from_ascii(width: u8, height: u8, rows: &[&str]) -> Self {
        let mut board = Self::new(width, height);
        for (i, row) in rows.iter().rev().take(height as usize).enumerate() {
            let y = (height as usize - 1 - i) as i8;
            for (x, ch) in row.chars().take(width as usize).enumerate() {
                let cell = match ch {
                    '#' => Some(ColorTag::Cyan),
                    '.' => None,
                    other => PieceKind::from_str(&other.to_string()).map(|k| k.color()),
                };
                board.set(x as i8, y, cell);
            }
        }
        board
    }

    /// Render as text rows (`#` locked, `.` empty), top row first.
    pub fn to_ascii(&self) -> Vec<String> {
        (0..self.height as usize)
            .map(|y| {
                self.row(y)
                    .iter()
                    .map(|c| if c.is_some() { '#' } else { '.' })
                    .collect()
            })
            .collect()
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Within bounds and locked
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Cells of row `y`; empty slice when out of range.
    pub fn row(&self, y: usize) -> &[Cell] {
        if y >= self.height as usize {
            return &[];
        }
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Every cell of the row is locked
    pub fn is_row_full(&self, y: usize) -> bool {
        y < self.height as usize && self.row(y).iter().all(|cell| cell.is_some())
    }

    /// At least one cell of the row is locked
    pub fn row_has_locked(&self, y: usize) -> bool {
        self.row(y).iter().any(|cell| cell.is_some())
    }

    /// Empty every cell of row `y` without moving anything else.
    pub fn empty_row(&mut self, y: usize) {
        if y >= self.height as usize {
            return;
        }
        let start = y * self.width as usize;
        self.cells[start..start + self.width as usize].fill(None);
    }

    /// Move row `src` onto row `dst`, leaving `src` empty.
    pub fn move_row(&mut self, src: usize, dst: usize) {
        let h = self.height as usize;
        if src == dst || src >= h || dst >= h {
            return;
        }
        let width = self.width as usize;
        let src_start = src * width;
        self.cells
            .copy_within(src_start..src_start + width, dst * width);
        self.empty_row(src);
    }

    /// Lock a piece's cells with its color and mark the piece inactive.
    ///
    /// Returns false, touching nothing, if any cell is out of bounds or
    /// already locked.
    pub fn lock(&mut self, piece: &mut Piece) -> bool {
        if !piece.cells().iter().all(|&(x, y)| self.is_valid(x, y)) {
            return false;
        }

        let color = piece.color();
        for &(x, y) in piece.cells() {
            self.set(x, y, Some(color));
        }
        piece.deactivate();
        true
    }

    /// Number of locked cells
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate locked cells as `((x, y), color)`
    pub fn locked_cells(&self) -> impl Iterator<Item = ((i8, i8), ColorTag)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|color| (((i % width) as i8, (i / width) as i8), color))
        })
    }

    /// Flat row-major cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Empty the whole board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::standard();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_non_standard_dimensions() {
        let mut board = Board::new(8, 12);
        assert_eq!(board.cells().len(), 96);
        assert!(board.set(7, 11, Some(ColorTag::Red)));
        assert!(!board.set(8, 11, Some(ColorTag::Red)));
        assert!(board.is_row_full(11) == false);
    }

    #[test]
    fn test_from_ascii_bottom_aligned() {
        let board = Board::from_ascii(10, 20, &["#.........", "IIIIIIIII."]);
        assert!(board.is_occupied(0, 18));
        assert!(!board.is_occupied(1, 18));
        assert_eq!(board.get(0, 19), Some(Some(ColorTag::Cyan)));
        assert!(board.is_valid(9, 19));
        assert_eq!(board.locked_count(), 10);
    }

    #[test]
    fn test_lock_marks_piece_inactive() {
        let mut board = Board::standard();
        let mut piece = Piece::spawn(PieceKind::O);

        assert!(board.lock(&mut piece));
        assert!(!piece.is_active());
        assert_eq!(board.get(4, 0), Some(Some(ColorTag::Yellow)));
        assert_eq!(board.locked_count(), 4);
    }

    #[test]
    fn test_lock_rejects_overlap_without_mutation() {
        let mut board = Board::standard();
        board.set(5, 1, Some(ColorTag::Red));
        let mut piece = Piece::spawn(PieceKind::O);

        assert!(!board.lock(&mut piece));
        assert!(piece.is_active());
        assert_eq!(board.locked_count(), 1);
    }

    #[test]
    fn test_move_row_leaves_source_empty() {
        let mut board = Board::from_ascii(10, 20, &["##........"]);
        board.move_row(19, 10);
        assert!(!board.row_has_locked(19));
        assert!(board.is_occupied(0, 10));
        assert!(board.is_occupied(1, 10));
    }

    #[test]
    fn test_locked_cells_iterator() {
        let mut board = Board::standard();
        board.set(3, 7, Some(ColorTag::Pink));
        let cells: Vec<_> = board.locked_cells().collect();
        assert_eq!(cells, vec![((3, 7), ColorTag::Pink)]);
    }
}
