//! tile2048 (workspace facade crate).
//!
//! This package exposes `tile2048::{core, engine, types}` while the
//! implementation lives in dedicated crates under `crates/`, plus the
//! headless [`runner`] used by the `tile2048` binary.

pub use tile2048_core as core;
pub use tile2048_engine as engine;
pub use tile2048_types as types;

pub mod runner;
