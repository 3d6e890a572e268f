//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the simulation.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, a headless driver, a renderer).
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (5, 1), horizontal center one row below the top
//!
//! # Tick Intervals
//!
//! The simulation has no notion of wall-clock time. A driver calls `tick` at a
//! steady rate and every cadence is a divisor of the tick counter:
//!
//! | Constant | Ticks | Description |
//! |----------|-------|-------------|
//! | `MOVE_INTERVAL` | 6 | Held left/right repeat |
//! | `SOFT_DROP_INTERVAL` | 3 | Held soft drop descent |
//! | `DROP_INTERVAL` | 48 | Gravity at level 0 |
//!
//! Gravity speeds up with level following [`DROP_INTERVALS`].
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind, Rotation, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let piece = PieceKind::from_index(5);
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.cell_value(), 6);
//! assert_eq!(piece.as_str(), "t");
//!
//! assert_eq!(Rotation::from_index(3), Rotation::from_index(7));
//!
//! assert_eq!(Intent::from_str("rotateCw"), Some(Intent::RotateCw));
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: u8 = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: u8 = 20;

/// Total number of cells in the field
pub const FIELD_SIZE: usize = FIELD_WIDTH as usize * FIELD_HEIGHT as usize;

/// Number of shapes in the piece catalog
pub const PIECE_COUNT: usize = 7;

/// Number of rotation slots stored per shape
pub const ROTATION_COUNT: usize = 4;

/// Ticks between repeated left/right moves while a move intent is held
pub const MOVE_INTERVAL: u64 = 6;

/// Ticks between descents while the soft-drop intent is held
pub const SOFT_DROP_INTERVAL: u64 = 3;

/// Ticks between automatic descents at level 0
pub const DROP_INTERVAL: u64 = 48;

/// Automatic-drop interval by level (ticks per row)
///
/// Index 0 = Level 0, the last entry applies to every level past the table.
pub const DROP_INTERVALS: [u64; 10] = [48, 43, 38, 33, 28, 23, 18, 13, 8, 6];

/// Base points for clearing 1, 2, 3 or 4 lines in one run (classic scoring)
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];


/// The seven piece shapes, in catalog order
///
/// The discriminant is the catalog index; a locked cell stores `index + 1`.
/// - **O**: 2x2 square
/// - **I**: straight bar
/// - **J**: J-shaped
/// - **L**: L-shaped (mirror of J)
/// - **S**: S-shaped
/// - **T**: T-shaped
/// - **Z**: Z-shaped (mirror of S)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    O,
    I,
    J,
    L,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, in catalog order
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Catalog index of this kind (0..7)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kind at a catalog index. Indices past the catalog wrap around.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % PIECE_COUNT]
    }

    /// Value written into a field cell when this kind locks (1..=7)
    #[inline]
    pub fn cell_value(self) -> u8 {
        self as u8 + 1
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Rotation slot of a piece (index 0..4)
///
/// Slots are named after the compass, North being slot 0. Which slots are
/// geometrically distinct depends on the shape: see the catalog's rotation count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Slot index (0..4)
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Rotation at a slot index, wrapping modulo 4
    pub fn from_index(index: usize) -> Self {
        match index % ROTATION_COUNT {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Next slot clockwise among `count` distinct slots
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::West.rotate_cw(4), Rotation::North);
    /// assert_eq!(Rotation::East.rotate_cw(2), Rotation::North);
    /// assert_eq!(Rotation::North.rotate_cw(1), Rotation::North);
    /// ```
    pub fn rotate_cw(self, count: u8) -> Self {
        let count = count.max(1) as usize;
        Self::from_index((self.index() + 1) % count)
    }

    /// Next slot counter-clockwise among `count` distinct slots
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(4), Rotation::West);
    /// assert_eq!(Rotation::North.rotate_ccw(2), Rotation::East);
    /// ```
    pub fn rotate_ccw(self, count: u8) -> Self {
        let count = count.max(1) as usize;
        Self::from_index((self.index() + count - 1) % count)
    }

    /// Rotate one step in the given direction among `count` distinct slots
    pub fn rotate(self, spin: Spin, count: u8) -> Self {
        match spin {
            Spin::Clockwise => self.rotate_cw(count),
            Spin::CounterClockwise => self.rotate_ccw(count),
        }
    }
}

/// Unit translation requested of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Down,
    Left,
    Right,
}

impl Direction {
    /// Cell offset `(dx, dy)` for one step in this direction
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Spin {
    Clockwise,
    CounterClockwise,
}

/// Control intents a driver raises between ticks
///
/// Rotations are one-shot: the tick that honors them clears them.
/// Moves and soft drop are held: they stay raised until the driver lowers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Shift one cell left every `MOVE_INTERVAL` ticks
    MoveLeft,
    /// Shift one cell right every `MOVE_INTERVAL` ticks
    MoveRight,
    /// Descend every `SOFT_DROP_INTERVAL` ticks instead of on gravity
    SoftDrop,
    /// Rotate clockwise once
    RotateCw,
    /// Rotate counter-clockwise once
    RotateCcw,
}

impl Intent {
    /// Parse intent from string (case-insensitive, `_` and `-` ignored)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("softdrop"), Some(Intent::SoftDrop));
    /// assert_eq!(Intent::from_str("rotate_cw"), Some(Intent::RotateCw));
    /// assert_eq!(Intent::from_str("hardDrop"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
        }
    }

    /// Whether the simulation lowers this intent once it has been honored
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Intent::RotateCw | Intent::RotateCcw)
    }
}

/// The five intent flags as stored on the game state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub rotate_cw: bool,
    pub rotate_ccw: bool,
}

impl Intents {
    /// Raise or lower one intent
    pub fn set(&mut self, intent: Intent, raised: bool) {
        match intent {
            Intent::MoveLeft => self.move_left = raised,
            Intent::MoveRight => self.move_right = raised,
            Intent::SoftDrop => self.soft_drop = raised,
            Intent::RotateCw => self.rotate_cw = raised,
            Intent::RotateCcw => self.rotate_ccw = raised,
        }
    }

    /// Whether an intent is raised
    pub fn get(&self, intent: Intent) -> bool {
        match intent {
            Intent::MoveLeft => self.move_left,
            Intent::MoveRight => self.move_right,
            Intent::SoftDrop => self.soft_drop,
            Intent::RotateCw => self.rotate_cw,
            Intent::RotateCcw => self.rotate_ccw,
        }
    }
}

/// Grid coordinate of a cell or of a piece pivot
///
/// `y` grows downward. Negative `y` is above the visible field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// This position shifted by `(dx, dy)`
    #[inline]
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
        }
    }
}

/// Pivot where every new piece appears: horizontal center, row 1
pub const SPAWN_POSITION: Position = Position::new((FIELD_WIDTH / 2) as i8, 1);

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Record of one piece lock, emitted for observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    /// Shape that locked
    pub kind: PieceKind,
    /// Total rows cleared by the lock
    pub lines_cleared: u32,
    /// Number of separate clear runs (each scored on its own)
    pub runs: u32,
    /// Points added to the score by the lock
    pub score_awarded: u32,
    /// The lock ended the game
    pub topped_out: bool,
}
