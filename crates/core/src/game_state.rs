//! Game state module - the session state machine
//!
//! Drives spawn -> fall -> lock -> clear -> spawn, owns scoring, levels,
//! pause/resume, and game over. Everything runs synchronously inside
//! [`GameState::tick`] and [`GameState::apply_action`]; there is no
//! background work.
//!
//! Two timed busy phases gate input: a "ready" countdown after start and
//! after resume, and a finalizing delay after game over. Both are advanced by
//! `tick` like gravity is.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::collision::{can_move, can_rotate, drop_distance, fits};
use crate::config::{ConfigError, GameConfig};
use crate::line_clear;
use crate::piece::Piece;
use crate::rng::{Randomizer, UniformRandomizer};
use crate::scoring::{drop_points, gravity_after_levels, level_for_lines, line_clear_points};
use crate::snapshot::GameSnapshot;
use crate::types::{BusyPhase, Direction, GameAction, GameEvent, PieceKind, SessionState};

/// Events kept before the oldest are dropped.
pub const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct GameState<R: Randomizer = UniformRandomizer> {
    config: GameConfig,
    board: Board,
    randomizer: R,
    active: Option<Piece>,
    next: Option<PieceKind>,
    state: SessionState,
    busy: Option<BusyPhase>,
    busy_remaining_ms: u32,
    /// Set once the game-over delay has elapsed.
    finalized: bool,
    fall_timer_ms: u32,
    gravity_ms: u32,
    score: u32,
    best_score: u32,
    lines: u32,
    level: u32,
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a session with a seeded uniform randomizer.
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        Self::with_randomizer(config, UniformRandomizer::new(seed))
    }
}

impl<R: Randomizer> GameState<R> {
    /// Create a session drawing pieces from `randomizer`.
    pub fn with_randomizer(config: GameConfig, randomizer: R) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            warn!(%err, "rejected game configuration");
            return Err(err);
        }

        Ok(Self {
            config,
            board: Board::new(config.width, config.height),
            randomizer,
            active: None,
            next: None,
            state: SessionState::NotStarted,
            busy: None,
            busy_remaining_ms: 0,
            finalized: false,
            fall_timer_ms: 0,
            gravity_ms: config.base_gravity_ms,
            score: 0,
            best_score: 0,
            lines: 0,
            level: 1,
            events: VecDeque::with_capacity(EVENT_QUEUE_CAPACITY),
        })
    }

    /// Replace the empty board with a prepared one before starting.
    pub fn with_board(mut self, board: Board) -> Result<Self, ConfigError> {
        let expected = (self.config.width, self.config.height);
        let actual = (board.width(), board.height());
        if expected != actual {
            let err = ConfigError::BoardMismatch { expected, actual };
            warn!(%err, "rejected prepared board");
            return Err(err);
        }
        self.board = board;
        Ok(self)
    }

    /// Seed the best score from persisted settings.
    pub fn with_best_score(mut self, best_score: u32) -> Self {
        self.best_score = best_score.max(self.score);
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn busy_phase(&self) -> Option<BusyPhase> {
        self.busy
    }

    pub fn busy_remaining_ms(&self) -> u32 {
        self.busy_remaining_ms
    }

    /// Game over and the finalizing delay has elapsed.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn gravity_ms(&self) -> u32 {
        self.gravity_ms
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Begin play from NotStarted. Returns false from any other state.
    pub fn start(&mut self) -> bool {
        if self.state != SessionState::NotStarted {
            return false;
        }

        self.state = SessionState::Playing;
        self.fall_timer_ms = 0;
        self.next = Some(self.randomizer.next_kind());
        info!(
            width = self.config.width,
            height = self.config.height,
            "session started"
        );
        self.push_event(GameEvent::Started);
        self.begin_busy(BusyPhase::Countdown, self.config.resume_countdown_ms);
        self.spawn_next();
        true
    }

    /// Return a finished (or never started) session to NotStarted.
    ///
    /// The best score survives; everything else starts over.
    pub fn reset(&mut self) -> bool {
        let allowed = match self.state {
            SessionState::NotStarted => true,
            SessionState::GameOver => self.finalized,
            SessionState::Playing | SessionState::Paused => false,
        };
        if !allowed {
            return false;
        }

        self.board.clear();
        self.active = None;
        self.next = None;
        self.state = SessionState::NotStarted;
        self.busy = None;
        self.busy_remaining_ms = 0;
        self.finalized = false;
        self.fall_timer_ms = 0;
        self.gravity_ms = self.config.base_gravity_ms;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        debug!("session reset");
        self.push_event(GameEvent::Reset);
        true
    }

    /// Playing -> Paused, or Paused -> Playing behind a countdown.
    pub fn toggle_pause(&mut self) -> bool {
        if self.busy.is_some() {
            return false;
        }
        match self.state {
            SessionState::Playing => {
                self.state = SessionState::Paused;
                debug!("paused");
                self.push_event(GameEvent::Paused);
                true
            }
            SessionState::Paused => {
                self.state = SessionState::Playing;
                debug!("resumed");
                self.push_event(GameEvent::Resumed);
                self.begin_busy(BusyPhase::Countdown, self.config.resume_countdown_ms);
                true
            }
            SessionState::NotStarted | SessionState::GameOver => false,
        }
    }

    /// Advance timers by `elapsed_ms`. Returns true if anything changed.
    ///
    /// A busy phase absorbs the whole tick. Otherwise, while Playing, gravity
    /// moves the piece down one row (or locks it) once the fall timer reaches
    /// the gravity interval.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if let Some(phase) = self.busy {
            self.busy_remaining_ms = self.busy_remaining_ms.saturating_sub(elapsed_ms);
            if self.busy_remaining_ms > 0 {
                return false;
            }
            self.busy = None;
            if phase == BusyPhase::Finalizing {
                self.finish_session();
            }
            return true;
        }

        if self.state != SessionState::Playing || self.active.is_none() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.gravity_ms {
            return false;
        }
        self.fall_timer_ms = 0;

        if !self.try_move(Direction::Down) {
            self.lock_active();
        }
        true
    }

    /// Apply one player intent. Returns true if it changed the session.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if action == GameAction::Start {
            return match self.state {
                SessionState::NotStarted => self.start(),
                SessionState::GameOver if self.finalized => self.reset() && self.start(),
                _ => false,
            };
        }

        if self.busy.is_some() {
            return false;
        }
        if action == GameAction::TogglePause {
            return self.toggle_pause();
        }
        if self.state != SessionState::Playing {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_move(Direction::Left),
            GameAction::MoveRight => self.try_move(Direction::Right),
            GameAction::SoftDrop => {
                let moved = self.try_move(Direction::Down);
                if moved {
                    self.fall_timer_ms = 0;
                    self.add_score(drop_points(1));
                }
                moved
            }
            GameAction::Rotate => self.try_rotate(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::TogglePause | GameAction::Start => false,
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Fill `out`, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        out.board.clear();
        out.board.extend(
            self.board
                .cells()
                .iter()
                .map(|cell| cell.map_or(0, |color| color.code())),
        );

        out.active.clear();
        out.ghost.clear();
        out.active_color = None;
        if let Some(piece) = &self.active {
            out.active.extend(piece.cells().iter().copied());
            out.active_color = Some(piece.color());
            let distance = drop_distance(&self.board, piece) as i8;
            out.ghost
                .extend(piece.cells().iter().map(|&(x, y)| (x, y + distance)));
        }

        out.next = self.next;
        out.next_cells.clear();
        if let Some(kind) = self.next {
            let preview = Piece::spawn(kind);
            let min_x = preview.cells().iter().map(|c| c.0).min().unwrap_or(0);
            let min_y = preview.cells().iter().map(|c| c.1).min().unwrap_or(0);
            out.next_cells
                .extend(preview.cells().iter().map(|&(x, y)| (x - min_x, y - min_y)));
        }

        out.score = self.score;
        out.best_score = self.best_score;
        out.lines = self.lines;
        out.level = self.level;
        out.gravity_ms = self.gravity_ms;
        out.state = self.state;
        out.busy = self.busy;
        out.busy_remaining_ms = self.busy_remaining_ms;
    }

    fn try_move(&mut self, direction: Direction) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !can_move(&self.board, piece, direction) {
            return false;
        }
        piece.translate(direction);
        self.push_event(GameEvent::PieceMoved { direction });
        true
    }

    fn try_rotate(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        if !piece.kind().rotates() || !can_rotate(&self.board, piece) {
            return false;
        }
        piece.rotate(self.board.width(), self.board.height());
        let step = piece.step();
        self.push_event(GameEvent::PieceRotated { step });
        true
    }

    fn hard_drop(&mut self) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        let mut dropped = 0u32;
        while can_move(&self.board, piece, Direction::Down) {
            piece.translate(Direction::Down);
            dropped += 1;
        }
        self.add_score(drop_points(dropped));
        self.lock_active();
        true
    }

    /// Lock the active piece, resolve lines, then spawn or end the game.
    fn lock_active(&mut self) {
        let Some(mut piece) = self.active.take() else {
            return;
        };
        let kind = piece.kind();
        if !self.board.lock(&mut piece) {
            warn!(kind = kind.as_str(), "active piece overlaps the stack");
            self.enter_game_over();
            return;
        }
        debug!(kind = kind.as_str(), "piece locked");
        self.push_event(GameEvent::PieceLocked { kind });

        let cleared = line_clear::resolve(&mut self.board).len() as u32;
        if cleared > 0 {
            self.award_lines(cleared);
        }

        if self.board.row_has_locked(0) {
            self.enter_game_over();
        } else {
            self.spawn_next();
        }
    }

    fn award_lines(&mut self, count: u32) {
        let points = line_clear_points(count);
        self.add_score(points);
        self.lines += count;
        debug!(count, points, total = self.lines, "lines cleared");
        self.push_event(GameEvent::LinesCleared { count, points });

        let level = level_for_lines(self.lines);
        if level > self.level {
            self.gravity_ms = gravity_after_levels(
                self.gravity_ms,
                self.config.min_gravity_ms,
                level - self.level,
            );
            self.level = level;
            info!(level, gravity_ms = self.gravity_ms, "level up");
            self.push_event(GameEvent::LevelUp {
                level,
                gravity_ms: self.gravity_ms,
            });
        }
    }

    fn spawn_next(&mut self) {
        let kind = match self.next.take() {
            Some(kind) => kind,
            None => self.randomizer.next_kind(),
        };
        self.next = Some(self.randomizer.next_kind());

        let piece = Piece::spawn(kind);
        if !fits(&self.board, &piece) {
            debug!(kind = kind.as_str(), "spawn blocked");
            self.enter_game_over();
            return;
        }
        debug!(kind = kind.as_str(), "piece spawned");
        self.active = Some(piece);
        self.fall_timer_ms = 0;
        self.push_event(GameEvent::PieceSpawned { kind });
    }

    fn enter_game_over(&mut self) {
        self.state = SessionState::GameOver;
        self.active = None;
        self.next = None;
        self.busy = None;
        info!(score = self.score, best = self.best_score, "game over");
        self.push_event(GameEvent::GameOver { score: self.score });
        if self.config.game_over_delay_ms == 0 {
            self.finish_session();
        } else {
            self.begin_busy(BusyPhase::Finalizing, self.config.game_over_delay_ms);
        }
    }

    fn finish_session(&mut self) {
        self.finalized = true;
        self.push_event(GameEvent::SessionFinished {
            score: self.score,
            best_score: self.best_score,
        });
    }

    fn begin_busy(&mut self, phase: BusyPhase, duration_ms: u32) {
        if duration_ms == 0 {
            return;
        }
        self.busy = Some(phase);
        self.busy_remaining_ms = duration_ms;
    }

    fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_QUEUE_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}
