//! Game state module - the simulation state machine
//!
//! This module ties together the field, the piece catalog, the RNG and scoring.
//! A driver raises intents and calls [`GameState::tick`] at a steady rate; every
//! cadence (input repeat, soft drop, gravity) is a divisor of the tick counter.

use log::{debug, trace};

use crate::board::{Board, ClearRuns};
use crate::pieces::{cells_at, Catalog, Piece, PieceShape, CATALOG};
use crate::rng::{random_piece, SimpleRng};
use crate::scoring::{drop_interval, line_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::*;

/// A piece identity: which shape and which rotation slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceState {
    pub kind: PieceKind,
    pub rotation: Rotation,
}

impl PieceState {
    pub fn new(kind: PieceKind, rotation: Rotation) -> Self {
        Self { kind, rotation }
    }

    /// Draw an independent uniform piece
    pub fn random(rng: &mut SimpleRng) -> Self {
        let (kind, rotation) = random_piece(rng);
        Self { kind, rotation }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pieces: &'static Catalog,
    board: Board,
    current: PieceState,
    next: PieceState,
    /// Pivot of the falling piece
    pos: Position,
    intents: Intents,
    interval_count: u64,
    level: u32,
    lines: u32,
    score: u32,
    points: [u32; 4],
    rng: SimpleRng,
    /// RNG state the game was created from
    seed: u32,
    game_over: bool,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create and initialize a game with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rng(SimpleRng::new(seed))
    }

    /// Create and initialize a game seeded from entropy
    pub fn from_entropy() -> Self {
        Self::with_rng(SimpleRng::from_entropy())
    }

    fn with_rng(rng: SimpleRng) -> Self {
        let seed = rng.state();
        let placeholder = PieceState::new(PieceKind::O, Rotation::North);
        let mut state = Self {
            pieces: &CATALOG,
            board: Board::new(),
            current: placeholder,
            next: placeholder,
            pos: SPAWN_POSITION,
            intents: Intents::default(),
            interval_count: 0,
            level: 0,
            lines: 0,
            score: 0,
            points: LINE_SCORES,
            rng,
            seed,
            game_over: false,
            last_event: None,
        };
        state.initialize();
        state
    }

    /// Reset to a fresh game
    ///
    /// Empties the field, lowers every intent, zeroes level, lines, score and the
    /// tick counter, and draws a new current and next piece at the spawn position.
    /// The RNG carries on from where it was.
    pub fn initialize(&mut self) {
        self.board.clear();
        self.intents = Intents::default();
        self.interval_count = 0;
        self.level = 0;
        self.lines = 0;
        self.score = 0;
        self.points = LINE_SCORES;
        self.pieces = &CATALOG;
        self.current = PieceState::random(&mut self.rng);
        self.next = PieceState::random(&mut self.rng);
        self.pos = SPAWN_POSITION;
        self.game_over = false;
        self.last_event = None;
        trace!(
            "initialized: current {:?}, next {:?}",
            self.current.kind,
            self.next.kind
        );
    }

    /// Seed this game was created with; `GameState::new(seed)` replays it
    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Set the level. The core never changes it on its own.
    pub fn set_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn interval_count(&self) -> u64 {
        self.interval_count
    }

    pub fn points_table(&self) -> &[u32; 4] {
        &self.points
    }

    pub fn current(&self) -> PieceState {
        self.current
    }

    pub fn next(&self) -> PieceState {
        self.next
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable field access for staging positions
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Put a specific piece in play at `pos`, bypassing collision checks
    pub fn place(&mut self, piece: PieceState, pos: Position) {
        self.current = piece;
        self.pos = pos;
    }

    pub fn intents(&self) -> Intents {
        self.intents
    }

    /// Raise or lower a control intent
    pub fn set_intent(&mut self, intent: Intent, raised: bool) {
        self.intents.set(intent, raised);
    }

    /// Catalog entry of the falling piece
    fn current_piece(&self) -> &'static Piece {
        &self.pieces[self.current.kind.index()]
    }

    /// Block offsets of the falling piece
    pub fn active_shape(&self) -> PieceShape {
        *self.current_piece().shape(self.current.rotation)
    }

    /// Absolute cells of the falling piece
    pub fn active_cells(&self) -> [Position; 4] {
        cells_at(&self.active_shape(), self.pos)
    }

    /// Check if the falling piece would collide at `pos` in `rotation`
    pub fn collides_at(&self, rotation: Rotation, pos: Position) -> bool {
        self.board
            .shape_collides(self.current_piece().shape(rotation), pos)
    }

    /// Try to move the falling piece one cell
    ///
    /// Returns false and leaves the position untouched if the target collides.
    pub fn try_move(&mut self, direction: Direction) -> bool {
        let (dx, dy) = direction.offset();
        let candidate = self.pos.offset(dx, dy);
        if self.collides_at(self.current.rotation, candidate) {
            return false;
        }
        self.pos = candidate;
        true
    }

    /// Try to rotate the falling piece in place
    ///
    /// The next slot wraps within the shape's distinct rotation count. No kicks:
    /// if the rotated piece collides at the current position nothing changes.
    pub fn try_rotate(&mut self, spin: Spin) -> bool {
        let count = self.current_piece().rotations;
        let candidate = self.current.rotation.rotate(spin, count);
        if self.collides_at(candidate, self.pos) {
            return false;
        }
        self.current.rotation = candidate;
        true
    }

    /// Move the falling piece down one row, locking it if it has landed
    ///
    /// Returns true if the piece moved, false if it locked (or the game is over).
    pub fn step_down(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        if self.try_move(Direction::Down) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Merge the falling piece into the field, clear lines and bring in the next piece
    fn lock_piece(&mut self) {
        let kind = self.current.kind;
        let shape = self.active_shape();
        let inside = self.board.lock_piece(&shape, self.pos, kind);

        let score_before = self.score;
        let runs = self.clear_lines();
        let lines_cleared: u32 = runs.iter().map(|&r| r as u32).sum();
        let score_awarded = self.score - score_before;

        self.current = self.next;
        self.next = PieceState::random(&mut self.rng);
        self.pos = SPAWN_POSITION;
        trace!(
            "spawned {:?} rotation {}, next {:?}",
            self.current.kind,
            self.current.rotation.index(),
            self.next.kind
        );

        let blocked = self.collides_at(self.current.rotation, self.pos);
        let topped_out = !inside || blocked;
        if topped_out {
            self.game_over = true;
            debug!(
                "game over: lock above top = {}, spawn blocked = {}, score {}",
                !inside, blocked, self.score
            );
        }

        debug!(
            "locked {:?}: {} line(s) in {} run(s), +{} points",
            kind,
            lines_cleared,
            runs.len(),
            score_awarded
        );
        self.last_event = Some(LockEvent {
            kind,
            lines_cleared,
            runs: runs.len() as u32,
            score_awarded,
            topped_out,
        });
    }

    /// Remove full rows and score each run separately
    pub fn clear_lines(&mut self) -> ClearRuns {
        let runs = self.board.clear_full_rows();
        for &run in &runs {
            self.award(run as u32);
        }
        runs
    }

    /// Credit one clear run of `lines` rows
    pub fn award(&mut self, lines: u32) {
        self.lines = self.lines.saturating_add(lines);
        let points = line_score(&self.points, lines, self.level);
        self.score = self.score.saturating_add(points);
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Advance the simulation by one tick
    ///
    /// 1. Honor and lower the rotate intents (clockwise first).
    /// 2. Every `MOVE_INTERVAL` ticks, shift by a held move intent, left before right.
    /// 3. Every `SOFT_DROP_INTERVAL` ticks with soft drop held, step down; otherwise
    ///    step down on the gravity interval for the current level.
    /// 4. Count the tick.
    ///
    /// Returns true if a piece locked during this tick. Does nothing once the game is over.
    pub fn tick(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        if self.intents.rotate_cw {
            self.try_rotate(Spin::Clockwise);
            self.intents.rotate_cw = false;
        }
        if self.intents.rotate_ccw {
            self.try_rotate(Spin::CounterClockwise);
            self.intents.rotate_ccw = false;
        }

        if self.interval_count % MOVE_INTERVAL == 0 {
            if self.intents.move_left {
                self.try_move(Direction::Left);
            } else if self.intents.move_right {
                self.try_move(Direction::Right);
            }
        }

        let mut locked = false;
        if self.interval_count % SOFT_DROP_INTERVAL == 0 && self.intents.soft_drop {
            locked = !self.step_down();
        } else if self.interval_count % drop_interval(self.level) == 0 {
            locked = !self.step_down();
        }

        self.interval_count = self.interval_count.wrapping_add(1);
        locked
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);
        out.set_active(self.current.kind, self.current.rotation, self.pos);
        out.next = PieceSnapshot::new(self.next.kind, self.next.rotation);
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.interval_count = self.interval_count;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
