//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no game logic attached, making them usable
//! in any context (core engine, session handle, autoplay runner, a UI layer).
//!
//! # Board Dimensions
//!
//! The playfield is a fixed 4x4 grid stored as a flat row-major array:
//!
//! - **Columns**: `x` in `0..4` (left to right)
//! - **Rows**: `y` in `0..4` (top to bottom)
//! - **Index**: `x + y * GRID_SIZE`
//!
//! ```text
//!  0  1  2  3
//!  4  5  6  7
//!  8  9 10 11
//! 12 13 14 15
//! ```
//!
//! # Spawn Rule
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `INITIAL_TILES` | 2 | Tiles spawned by a reset |
//! | `SPAWN_LOW_VALUE` | 2 | Common spawn value |
//! | `SPAWN_HIGH_VALUE` | 4 | Rare spawn value |
//! | `SPAWN_HIGH_PROBABILITY` | 0.1 | Chance a spawn is `SPAWN_HIGH_VALUE` |
//!
//! # Examples
//!
//! ```
//! use tile2048_types::{Direction, GameStatus, CELL_COUNT, GRID_SIZE};
//!
//! // Parse a direction (case-insensitive)
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir, Direction::Left);
//! assert_eq!(dir.opposite(), Direction::Right);
//!
//! assert_eq!(GameStatus::Active.as_str(), "active");
//! assert_eq!(GRID_SIZE * GRID_SIZE, CELL_COUNT);
//! ```

use serde::{Deserialize, Serialize};

/// Side length of the square grid (4 cells)
pub const GRID_SIZE: usize = 4;

/// Total number of cells on the board (16)
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Number of tiles placed on an empty board by a reset
pub const INITIAL_TILES: usize = 2;

/// Value of the common spawn tile
pub const SPAWN_LOW_VALUE: Tile = 2;

/// Value of the rare spawn tile
pub const SPAWN_HIGH_VALUE: Tile = 4;

/// Probability that a spawned tile is [`SPAWN_HIGH_VALUE`]
pub const SPAWN_HIGH_PROBABILITY: f64 = 0.1;

/// A cell value on the board
///
/// - `0`: empty cell
/// - `2, 4, 8, ...`: a tile (always a power of two)
///
/// The engine enforces no upper bound.
pub type Tile = u32;

/// Marker for an empty cell
pub const EMPTY: Tile = 0;

/// Returns true for values that may legally occupy a cell (0 or a power of two >= 2).
///
/// # Examples
///
/// ```
/// use tile2048_types::is_valid_tile;
///
/// assert!(is_valid_tile(0));
/// assert!(is_valid_tile(2));
/// assert!(is_valid_tile(4096));
/// assert!(!is_valid_tile(1));
/// assert!(!is_valid_tile(6));
/// ```
pub fn is_valid_tile(value: Tile) -> bool {
    value == EMPTY || (value >= 2 && value.is_power_of_two())
}

/// The four directions tiles can be pushed
///
/// Left and Up scan cells in ascending index order; Right and Down scan in
/// descending order. The scan order decides which tiles pair up when three or
/// more equal tiles share a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order `Left, Right, Up, Down`
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Parse direction from string
    ///
    /// Accepts full names or single letters (case-insensitive):
    /// "left" | "l", "right" | "r", "up" | "u", "down" | "d"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" | "l" => Some(Direction::Left),
            "right" | "r" => Some(Direction::Right),
            "up" | "u" => Some(Direction::Up),
            "down" | "d" => Some(Direction::Down),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Unit step `(dx, dy)` toward the target edge
    pub fn delta(&self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// True when cells are scanned in ascending index order for this direction
    pub fn scans_ascending(&self) -> bool {
        matches!(self, Direction::Left | Direction::Up)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Whether the game still accepts moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Active,
    /// Board full and no orthogonal pair can merge; only a reset leaves this state
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::GameOver => "game_over",
        }
    }
}

/// When a new tile appears after a move
///
/// - **Always**: after every accepted move, even one that shifted nothing
/// - **OnChange**: only after a move that slid or merged at least one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnPolicy {
    #[default]
    Always,
    OnChange,
}

impl SpawnPolicy {
    /// Parse policy from string ("always", "on-change" / "on_change" / "onchange")
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "always" => Some(SpawnPolicy::Always),
            "on-change" | "on_change" | "onchange" => Some(SpawnPolicy::OnChange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Always => "always",
            SpawnPolicy::OnChange => "on-change",
        }
    }
}

/// Result of a move request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// At least one tile slid or merged
    Moved,
    /// Accepted, but no tile could shift in that direction
    Unchanged,
    /// Rejected: the game is already over
    GameOver,
    /// Rejected: another move is still being processed
    Busy,
}

impl MoveOutcome {
    /// True if the move was processed (spawn and game-over check ran)
    pub fn accepted(&self) -> bool {
        matches!(self, MoveOutcome::Moved | MoveOutcome::Unchanged)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MoveOutcome::Moved => "moved",
            MoveOutcome::Unchanged => "unchanged",
            MoveOutcome::GameOver => "game_over",
            MoveOutcome::Busy => "busy",
        }
    }
}

/// A tile placed by the spawn step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpawnedTile {
    /// Flat cell index (`x + y * GRID_SIZE`)
    pub index: usize,
    pub value: Tile,
}

/// Core-side record of the last accepted move.
///
/// Emitted by the engine after the spawn and game-over steps; observers take it
/// once via `take_last_event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    pub direction: Direction,
    /// Whether any tile slid or merged
    pub changed: bool,
    /// Number of pairwise merges performed
    pub merges: u32,
    /// Sum of merged tile values added to the score
    pub score_gained: u32,
    pub spawned: Option<SpawnedTile>,
    /// True if this move ended the game
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_rule_defaults() {
        assert_eq!(INITIAL_TILES, 2);
        assert_eq!(SPAWN_LOW_VALUE, 2);
        assert_eq!(SPAWN_HIGH_VALUE, 4);
        assert!((SPAWN_HIGH_PROBABILITY - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn direction_roundtrips_through_str() {
        for dir in Direction::ALL {
            assert_eq!(Direction::from_str(dir.as_str()), Some(dir));
        }
        assert_eq!(Direction::from_str("L"), Some(Direction::Left));
        assert_eq!(Direction::from_str("sideways"), None);
    }

    #[test]
    fn direction_serializes_lowercase() {
        let json = serde_json::to_string(&Direction::Down).unwrap();
        assert_eq!(json, "\"down\"");
        let back: Direction = serde_json::from_str("\"up\"").unwrap();
        assert_eq!(back, Direction::Up);
    }

    #[test]
    fn spawn_policy_parse() {
        assert_eq!(SpawnPolicy::from_str("always"), Some(SpawnPolicy::Always));
        assert_eq!(SpawnPolicy::from_str("on-change"), Some(SpawnPolicy::OnChange));
        assert_eq!(SpawnPolicy::from_str("on_change"), Some(SpawnPolicy::OnChange));
        assert_eq!(SpawnPolicy::default(), SpawnPolicy::Always);
    }

    #[test]
    fn outcome_acceptance() {
        assert!(MoveOutcome::Moved.accepted());
        assert!(MoveOutcome::Unchanged.accepted());
        assert!(!MoveOutcome::GameOver.accepted());
        assert!(!MoveOutcome::Busy.accepted());
    }
}
