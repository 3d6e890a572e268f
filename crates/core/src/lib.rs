//! Core simulation module - pure, deterministic, and testable
//!
//! This crate owns the playing field, the falling and queued pieces, collision,
//! locking, line clearing and score bookkeeping. It has **no dependencies** on
//! rendering, input devices or timing, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Total**: Every operation produces a defined result; rejected moves just return `false`
//! - **Fast**: Fixed-size, allocation-free state and tick processing
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 field with collision detection and run-grouped line clearing
//! - [`game_state`]: Game state with intents, tick cadence, locking and scoring
//! - [`pieces`]: The static catalog of 7 shapes x 4 rotation slots
//! - [`rng`]: Seeded generator with unbiased bounded draws
//! - [`scoring`]: Classic line-clear points and level gravity intervals
//! - [`snapshot`]: Serializable view for drivers
//!
//! # Game Rules
//!
//! - **Uniform pieces**: shape and rotation slot are each drawn uniformly and independently
//! - **No kicks**: a rotation that collides is dropped; the piece never shifts to make room
//! - **Immediate lock**: a piece locks the moment a gravity or soft-drop step is blocked
//! - **Runs**: contiguous full rows clear and score together; separated rows score apart
//! - **Scoring**: 40/100/300/1200 per run, times `level + 1`
//! - **Level**: set by the driver; the core never raises it
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::Intent;
//!
//! let mut game = GameState::new(12345);
//!
//! game.set_intent(Intent::MoveLeft, true);
//! game.set_intent(Intent::RotateCw, true);
//! game.tick();
//!
//! // Rotation intents are consumed by the tick, moves stay held
//! assert!(!game.intents().rotate_cw);
//! assert!(game.intents().move_left);
//! assert_eq!(game.score(), 0);
//! ```
//!
//! # Timing
//!
//! The core counts ticks, not milliseconds. Call [`GameState::tick`](game_state::GameState::tick)
//! at a fixed rate; movement repeat, soft drop and gravity fire on multiples of
//! `MOVE_INTERVAL`, `SOFT_DROP_INTERVAL` and the level's drop interval.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearRuns};
pub use game_state::{GameState, PieceState};
pub use pieces::{get_shape, rotation_count, Piece, PieceShape, CATALOG};
pub use rng::SimpleRng;
pub use scoring::{calculate_line_score, drop_interval};
pub use snapshot::{GameSnapshot, PieceSnapshot};
