//! Read-only view of a session for renderers and observers.

use arrayvec::ArrayVec;

use crate::types::{BusyPhase, ColorTag, Coord, PieceKind, SessionState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major color codes, `0` for empty (see [`ColorTag::code`]).
    pub board: Vec<u8>,
    pub active: ArrayVec<Coord, 4>,
    pub active_color: Option<ColorTag>,
    /// Where the active piece would land after a hard drop.
    pub ghost: ArrayVec<Coord, 4>,
    pub next: Option<PieceKind>,
    /// Next piece cells normalized so the top-left of its bounding box is `(0, 0)`.
    pub next_cells: ArrayVec<Coord, 4>,
    pub score: u32,
    pub best_score: u32,
    pub lines: u32,
    pub level: u32,
    pub gravity_ms: u32,
    pub state: SessionState,
    pub busy: Option<BusyPhase>,
    pub busy_remaining_ms: u32,
}

impl GameSnapshot {
    /// Locked cell color at (x, y); `None` for empty or out of range.
    pub fn cell(&self, x: i8, y: i8) -> Option<ColorTag> {
        if x < 0 || y < 0 || x as u8 >= self.width || y as u8 >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.board.get(idx).copied().and_then(ColorTag::from_code)
    }

    pub fn is_active_cell(&self, x: i8, y: i8) -> bool {
        self.active.contains(&(x, y))
    }

    /// Countdown seconds left, rounded up; `None` when no countdown is running.
    pub fn countdown_secs(&self) -> Option<u32> {
        match self.busy {
            Some(BusyPhase::Countdown) => Some(self.busy_remaining_ms.div_ceil(1000)),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.board.clear();
        self.active.clear();
        self.active_color = None;
        self.ghost.clear();
        self.next = None;
        self.next_cells.clear();
        self.score = 0;
        self.best_score = 0;
        self.lines = 0;
        self.level = 1;
        self.gravity_ms = 0;
        self.state = SessionState::NotStarted;
        self.busy = None;
        self.busy_remaining_ms = 0;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            board: Vec::new(),
            active: ArrayVec::new(),
            active_color: None,
            ghost: ArrayVec::new(),
            next: None,
            next_cells: ArrayVec::new(),
            score: 0,
            best_score: 0,
            lines: 0,
            level: 1,
            gravity_ms: 0,
            state: SessionState::NotStarted,
            busy: None,
            busy_remaining_ms: 0,
        }
    }
}
