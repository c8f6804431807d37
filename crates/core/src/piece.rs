//! Piece module - shape catalog, pivot rotation, and translation
//!
//! A piece is an ordered list of board cells plus the index of its pivot cell.
//! Every kind except O turns with the same formula: each cell is expressed
//! relative to the pivot `(dx, dy)`, mapped to `(dy, -dx)`, and translated
//! back. Because the pivot maps to itself, four turns restore the original
//! cells exactly.
//!
//! After a turn the whole piece is shifted back inside the board if it poked
//! out of any edge (the "bounds clamp"). The clamp never looks at locked
//! cells; legality against the board is checked by [`crate::collision`]
//! before a turn is committed.

use arrayvec::ArrayVec;

use crate::types::{ColorTag, Coord, Direction, PieceKind, RotationStep};

/// Cells of a piece. Usually 4; fewer only after [`Piece::remove_block`].
pub type PieceCells = ArrayVec<Coord, 4>;

/// Spawn anchor for each kind.
pub fn spawn_anchor(kind: PieceKind) -> Coord {
    match kind {
        PieceKind::I => (3, 0),
        PieceKind::O => (4, 0),
        PieceKind::S => (3, 1),
        PieceKind::Z => (3, 0),
        PieceKind::L => (3, 1),
        PieceKind::J => (3, 0),
        PieceKind::T => (4, 0),
    }
}

/// Cell offsets from the anchor, in list order.
pub fn shape_offsets(kind: PieceKind) -> [Coord; 4] {
    match kind {
        // Horizontal bar
        PieceKind::I => [(0, 0), (1, 0), (2, 0), (3, 0)],
        // 2x2 square
        PieceKind::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceKind::S => [(0, 0), (1, 0), (1, -1), (2, -1)],
        PieceKind::Z => [(0, 0), (1, 0), (1, 1), (2, 1)],
        PieceKind::L => [(0, 0), (1, 0), (2, 0), (2, -1)],
        PieceKind::J => [(0, 0), (0, 1), (1, 1), (2, 1)],
        PieceKind::T => [(0, 0), (-1, 1), (0, 1), (1, 1)],
    }
}

/// Index of the pivot cell in the shape list; `None` for kinds that never turn.
pub fn pivot_index(kind: PieceKind) -> Option<usize> {
    match kind {
        PieceKind::O => None,
        PieceKind::S | PieceKind::L => Some(1),
        PieceKind::I | PieceKind::Z | PieceKind::J | PieceKind::T => Some(2),
    }
}

/// Turn `cells` a quarter around `pivot`: `(dx, dy) -> (dy, -dx)`.
pub fn rotate_about(cells: &mut [Coord], pivot: Coord) {
    let (px, py) = pivot;
    for cell in cells.iter_mut() {
        let dx = cell.0 - px;
        let dy = cell.1 - py;
        *cell = (px + dy, py - dx);
    }
}

/// Shift `cells` as a unit so every cell lies inside `width x height`.
///
/// Left/top overhang is corrected first, then right/bottom, each by the
/// minimal amount.
pub fn clamp_to_bounds(cells: &mut [Coord], width: u8, height: u8) {
    if cells.is_empty() {
        return;
    }

    let min_x = cells.iter().map(|c| c.0).min().unwrap_or(0);
    let min_y = cells.iter().map(|c| c.1).min().unwrap_or(0);
    let shift_x = if min_x < 0 { -min_x } else { 0 };
    let shift_y = if min_y < 0 { -min_y } else { 0 };
    for cell in cells.iter_mut() {
        cell.0 += shift_x;
        cell.1 += shift_y;
    }

    let max_x = cells.iter().map(|c| c.0).max().unwrap_or(0);
    let max_y = cells.iter().map(|c| c.1).max().unwrap_or(0);
    let over_x = max_x - width as i8 + 1;
    let over_y = max_y - height as i8 + 1;
    for cell in cells.iter_mut() {
        if over_x > 0 {
            cell.0 -= over_x;
        }
        if over_y > 0 {
            cell.1 -= over_y;
        }
    }
}

/// A tetromino instance on (or about to enter) the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    cells: PieceCells,
    pivot_index: Option<usize>,
    pivot: Option<Coord>,
    step: RotationStep,
    active: bool,
}

impl Piece {
    /// Create a piece at its kind's spawn anchor.
    pub fn spawn(kind: PieceKind) -> Self {
        Self::spawn_at(kind, spawn_anchor(kind))
    }

    /// Create a piece with its shape anchored at `anchor`.
    pub fn spawn_at(kind: PieceKind, anchor: Coord) -> Self {
        let (ax, ay) = anchor;
        let cells: PieceCells = shape_offsets(kind)
            .iter()
            .map(|&(dx, dy)| (ax + dx, ay + dy))
            .collect();
        let pivot_index = pivot_index(kind);
        let pivot = pivot_index.map(|i| cells[i]);

        Self {
            kind,
            cells,
            pivot_index,
            pivot,
            step: RotationStep::Step0,
            active: true,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn color(&self) -> ColorTag {
        self.kind.color()
    }

    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn pivot(&self) -> Option<Coord> {
        self.pivot
    }

    pub fn pivot_index(&self) -> Option<usize> {
        self.pivot_index
    }

    pub fn step(&self) -> RotationStep {
        self.step
    }

    /// True while falling and controllable.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Cells after one step in `direction`, without moving the piece.
    pub fn translated(&self, direction: Direction) -> PieceCells {
        let (dx, dy) = direction.offset();
        self.cells.iter().map(|&(x, y)| (x + dx, y + dy)).collect()
    }

    /// Cells after a quarter turn about the pivot, before any bounds clamp.
    ///
    /// Kinds without a pivot return their current cells.
    pub fn rotated(&self) -> PieceCells {
        let mut cells = self.cells.clone();
        if let Some(pivot) = self.pivot {
            rotate_about(&mut cells, pivot);
        }
        cells
    }

    /// Cells after a quarter turn and the bounds clamp: exactly what
    /// [`Piece::rotate`] would commit.
    pub fn rotated_clamped(&self, width: u8, height: u8) -> PieceCells {
        let mut cells = self.rotated();
        if self.pivot.is_some() {
            clamp_to_bounds(&mut cells, width, height);
        }
        cells
    }

    /// Translate one step in `direction`. No bounds or collision checks.
    pub fn translate(&mut self, direction: Direction) {
        self.cells = self.translated(direction);
        self.refresh_pivot(direction.offset());
    }

    /// Quarter turn about the pivot followed by the bounds clamp.
    ///
    /// O is a no-op. I uses the same formula as every other kind; there is no
    /// per-step special case.
    pub fn rotate(&mut self, width: u8, height: u8) {
        if self.pivot.is_none() {
            return;
        }
        let raw = self.rotated();
        self.cells = self.rotated_clamped(width, height);
        // The clamp shifts every cell by the same amount.
        let shift = match (raw.first(), self.cells.first()) {
            (Some(&(rx, ry)), Some(&(cx, cy))) => (cx - rx, cy - ry),
            _ => (0, 0),
        };
        self.refresh_pivot(shift);
        self.step = self.step.next();
    }

    /// Delete one cell from the piece. Returns false if the piece has no such cell.
    ///
    /// The pivot stays on the same block. If the pivot block itself is
    /// removed, its coordinate is kept and moves with the piece.
    pub fn remove_block(&mut self, cell: Coord) -> bool {
        let Some(i) = self.cells.iter().position(|&c| c == cell) else {
            return false;
        };
        self.cells.remove(i);
        self.pivot_index = match self.pivot_index {
            Some(p) if i < p => Some(p - 1),
            Some(p) if i == p => None,
            other => other,
        };
        true
    }

    /// Mark the piece as locked. Its pivot is frozen from here on.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
    }

    /// Follow the pivot block after the cells moved by `shift`.
    fn refresh_pivot(&mut self, shift: Coord) {
        if !self.active {
            return;
        }
        match self.pivot_index {
            Some(i) => self.pivot = self.cells.get(i).copied(),
            None => {
                if let Some((px, py)) = self.pivot {
                    self.pivot = Some((px + shift.0, py + shift.1));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_i_horizontal() {
        let piece = Piece::spawn(PieceKind::I);
        assert_eq!(piece.cells(), &[(3, 0), (4, 0), (5, 0), (6, 0)]);
        assert_eq!(piece.pivot(), Some((5, 0)));
        assert_eq!(piece.color(), ColorTag::Cyan);
        assert!(piece.is_active());
    }

    #[test]
    fn test_spawn_o_has_no_pivot() {
        let piece = Piece::spawn(PieceKind::O);
        assert_eq!(piece.cells(), &[(4, 0), (5, 0), (4, 1), (5, 1)]);
        assert_eq!(piece.pivot(), None);
        assert_eq!(piece.pivot_index(), None);
    }

    #[test]
    fn test_rotate_about_pivot() {
        // T away from walls: pivot is the stem cell (index 2).
        let mut piece = Piece::spawn_at(PieceKind::T, (4, 8));
        assert_eq!(piece.cells(), &[(4, 8), (3, 9), (4, 9), (5, 9)]);

        piece.rotate(10, 20);
        assert_eq!(piece.cells(), &[(3, 9), (4, 10), (4, 9), (4, 8)]);
        assert_eq!(piece.pivot(), Some((4, 9)));
        assert_eq!(piece.step(), RotationStep::Step90);
    }

    #[test]
    fn test_i_spawn_rotation_is_clamped_into_board() {
        let mut piece = Piece::spawn(PieceKind::I);
        piece.rotate(10, 20);

        // Unclamped result would reach y = -1; the clamp shifts it down by one.
        assert_eq!(piece.cells(), &[(5, 3), (5, 2), (5, 1), (5, 0)]);
        assert_eq!(piece.pivot(), Some((5, 1)));
    }

    #[test]
    fn test_clamp_right_and_bottom_edges() {
        let mut cells = [(9, 19), (10, 19), (11, 20), (10, 18)];
        clamp_to_bounds(&mut cells, 10, 20);
        assert_eq!(cells, [(7, 18), (8, 18), (9, 19), (8, 17)]);
    }

    #[test]
    fn test_clamp_left_and_top_edges() {
        let mut cells = [(-2, 0), (-1, -1), (0, 0), (1, 0)];
        clamp_to_bounds(&mut cells, 10, 20);
        assert_eq!(cells, [(0, 1), (1, 0), (2, 1), (3, 1)]);
    }

    #[test]
    fn test_translate_updates_pivot() {
        let mut piece = Piece::spawn(PieceKind::Z);
        piece.translate(Direction::Down);
        piece.translate(Direction::Right);
        assert_eq!(piece.cells(), &[(4, 1), (5, 1), (5, 2), (6, 2)]);
        assert_eq!(piece.pivot(), Some((5, 2)));

        piece.translate(Direction::Left);
        assert_eq!(piece.pivot(), Some((4, 2)));
    }

    #[test]
    fn test_o_rotation_is_noop() {
        let mut piece = Piece::spawn(PieceKind::O);
        let before = piece.clone();
        piece.rotate(10, 20);
        assert_eq!(piece, before);
        assert_eq!(piece.step(), RotationStep::Step0);
    }

    #[test]
    fn test_remove_block() {
        let mut piece = Piece::spawn(PieceKind::L);
        assert!(piece.remove_block((4, 1)));
        assert_eq!(piece.cells().len(), 3);
        assert!(!piece.remove_block((4, 1)));
    }

    #[test]
    fn test_remove_block_before_pivot_keeps_pivot_block() {
        let mut piece = Piece::spawn(PieceKind::Z);
        assert_eq!(piece.pivot(), Some((4, 1)));

        assert!(piece.remove_block((3, 0)));
        assert_eq!(piece.pivot_index(), Some(1));

        piece.translate(Direction::Down);
        assert_eq!(piece.cells(), &[(4, 1), (4, 2), (5, 2)]);
        assert_eq!(piece.pivot(), Some((4, 2)));

        piece.rotate(10, 20);
        assert_eq!(piece.cells(), &[(3, 2), (4, 2), (4, 1)]);
        assert_eq!(piece.pivot(), Some((4, 2)));
    }

    #[test]
    fn test_remove_block_after_pivot_leaves_index() {
        let mut piece = Piece::spawn(PieceKind::Z);
        assert!(piece.remove_block((5, 1)));
        assert_eq!(piece.pivot_index(), Some(2));
        piece.translate(Direction::Right);
        assert_eq!(piece.pivot(), Some((5, 1)));
    }

    #[test]
    fn test_removed_pivot_block_still_turns_about_its_coordinate() {
        let mut piece = Piece::spawn_at(PieceKind::Z, (4, 8));
        assert_eq!(piece.pivot(), Some((5, 9)));

        assert!(piece.remove_block((5, 9)));
        assert_eq!(piece.pivot_index(), None);

        piece.translate(Direction::Down);
        assert_eq!(piece.cells(), &[(4, 9), (5, 9), (6, 10)]);
        assert_eq!(piece.pivot(), Some((5, 10)));

        piece.rotate(10, 20);
        assert_eq!(piece.cells(), &[(4, 11), (4, 10), (5, 9)]);
        assert_eq!(piece.pivot(), Some((5, 10)));
    }

    #[test]
    fn test_removed_pivot_follows_rotation_clamp() {
        // Pivot block gone, then a turn that pokes out of the left wall.
        let mut piece = Piece::spawn_at(PieceKind::T, (0, 8));
        assert_eq!(piece.pivot(), Some((0, 9)));
        assert!(piece.remove_block((0, 9)));

        // Raw turn is (-1,9) (0,10) (0,8); the clamp shifts it right by one.
        piece.rotate(10, 20);
        assert_eq!(piece.cells(), &[(0, 9), (1, 10), (1, 8)]);
        assert_eq!(piece.pivot(), Some((1, 9)));
    }

    #[test]
    fn test_locked_piece_keeps_pivot() {
        let mut piece = Piece::spawn(PieceKind::J);
        let pivot = piece.pivot();
        piece.deactivate();
        piece.translate(Direction::Down);
        assert_eq!(piece.pivot(), pivot);
    }
}
