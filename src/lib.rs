//! Blockfall (workspace facade crate).
//!
//! Re-exports the simulation core and its shared types under one name so drivers and
//! integration tests can use `blockfall::{core,types}` while the implementation lives
//! in dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_types as types;
