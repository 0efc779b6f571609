//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board rules, state management, and spawning logic
//! of the 4x4 sliding-tile merge puzzle. It has **no dependencies** on UI,
//! input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed and same moves produce identical games
//! - **Testable**: Board positions can be built directly with [`Board::from_cells`]
//! - **Portable**: Runs headless, under a terminal front end, or in a test harness
//! - **Allocation-free**: Moves, spawns and game-over checks work on a fixed array
//!
//! # Module Structure
//!
//! - [`board`]: 4x4 grid with slide/merge, adjacency and empty-cell queries
//! - [`game_state`]: Board + score + status lifecycle (reset, move, spawn, game over)
//! - [`rng`]: Seeded spawner placing 2s (90%) and 4s (10%) on empty cells
//! - [`config`]: Seed, spawn policy and spawn probability
//! - [`snapshot`]: Serialisable read-only view for presentation layers
//!
//! # Game Rules
//!
//! - **Slide**: Every tile travels as far as it can toward the chosen edge
//! - **Merge**: Two equal tiles combine into their sum; the sum is added to the score
//! - **Merge once**: A tile produced by a merge does not merge again in the same move
//! - **Spawn**: After a move, one new tile appears on a random empty cell
//! - **Game over**: No empty cell and no orthogonally adjacent equal pair
//!
//! # Example
//!
//! ```
//! use tile2048_core::{GameConfig, GameState};
//! use tile2048_types::{Direction, GameStatus, SpawnPolicy};
//!
//! let config = GameConfig::default()
//!     .with_seed(12345)
//!     .with_spawn_policy(SpawnPolicy::OnChange);
//! let mut game = GameState::new(config);
//!
//! game.apply_move(Direction::Left);
//! game.apply_move(Direction::Up);
//!
//! assert_eq!(game.status(), GameStatus::Active);
//! assert_eq!(game.cells().len(), 16);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod rng;
pub mod snapshot;

pub use tile2048_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, BoardError, SlideResult};
pub use config::GameConfig;
pub use game_state::GameState;
pub use rng::TileSpawner;
pub use snapshot::{board_hash, GameSnapshot};
