//! Engine-facing session handle.
//!
//! A presentation layer holds a [`Session`] instead of a bare
//! [`GameState`](tile2048_core::GameState). The session serialises moves with a
//! `busy` flag, so a move requested while another is still being processed
//! (for example from inside an observer callback) is dropped rather than
//! queued, and it notifies observers synchronously before each call returns.

pub mod session;

pub use tile2048_core as core;
pub use tile2048_types as types;

pub use session::{Session, WeakSession};
