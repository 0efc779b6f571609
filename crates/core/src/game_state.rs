//! Game state module - manages the complete game state
//!
//! This module ties together the board, the tile spawner and the score. It
//! owns the reset → move → spawn → game-over lifecycle and the read-only
//! queries a presentation layer draws from.

use log::{debug, info};

use crate::board::Board;
use crate::config::GameConfig;
use crate::rng::TileSpawner;
use crate::snapshot::{board_hash, GameSnapshot};
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    score: u32,
    status: GameStatus,
    config: GameConfig,
    spawner: TileSpawner,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Accepted moves in the current episode.
    moves: u32,
    /// Last accepted move (consumed by observers).
    last_event: Option<MoveEvent>,
}

impl GameState {
    /// Create a new game, already seeded with its two starting tiles
    pub fn new(config: GameConfig) -> Self {
        let mut state = Self::blank(Board::new(), config);
        state.spawn_initial_tiles();
        state
    }

    /// Create a new game with default settings and the given seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(GameConfig::default().with_seed(seed))
    }

    /// Resume from an existing position
    ///
    /// The board is taken as-is (no tiles are spawned) and the status is
    /// evaluated immediately, so a locked board starts out as `GameOver`.
    pub fn from_board(board: Board, score: u32, config: GameConfig) -> Self {
        let mut state = Self::blank(board, config);
        state.score = score;
        state.check_game_over();
        state
    }

    fn blank(board: Board, config: GameConfig) -> Self {
        let spawner = TileSpawner::new(config.seed, config.four_probability_or_default());
        Self {
            board,
            score: 0,
            status: GameStatus::Active,
            config,
            spawner,
            episode_id: 0,
            moves: 0,
            last_event: None,
        }
    }

    fn spawn_initial_tiles(&mut self) {
        self.board.clear();
        self.score = 0;
        self.status = GameStatus::Active;
        self.moves = 0;
        self.last_event = None;
        for _ in 0..INITIAL_TILES {
            self.spawn_tile();
        }
    }

    /// Start a fresh episode: empty board, zero score, two new tiles
    ///
    /// The spawner is not reseeded; the new episode continues its stream.
    pub fn reset(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.spawn_initial_tiles();
        info!(
            "episode {} started (seed {}, spawn policy {})",
            self.episode_id,
            self.spawner.seed(),
            self.config.spawn_policy.as_str()
        );
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Row-major copy of the 16 cells
    pub fn cells(&self) -> [Tile; CELL_COUNT] {
        *self.board.cells()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.spawner.seed()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn highest_tile(&self) -> Tile {
        self.board.highest_tile()
    }

    /// Take and clear the last move event.
    pub fn take_last_event(&mut self) -> Option<MoveEvent> {
        self.last_event.take()
    }

    /// Apply one directional move
    ///
    /// Slides and merges, then spawns a tile (subject to the spawn policy),
    /// then re-evaluates game over. Rejected without touching state when the
    /// game is already over.
    ///
    /// ```
    /// use tile2048_core::GameState;
    /// use tile2048_types::{Direction, GameStatus};
    ///
    /// let mut game = GameState::with_seed(42);
    /// let outcome = game.apply_move(Direction::Left);
    /// assert!(outcome.accepted());
    /// assert_eq!(game.status(), GameStatus::Active);
    /// ```
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.status == GameStatus::GameOver {
            debug!("move {} rejected: game already over", direction.as_str());
            return MoveOutcome::GameOver;
        }

        let slide = self.board.slide(direction);
        self.score = self.score.saturating_add(slide.score);

        let spawned = match self.config.spawn_policy {
            SpawnPolicy::Always => self.spawn_tile(),
            SpawnPolicy::OnChange if slide.changed => self.spawn_tile(),
            SpawnPolicy::OnChange => None,
        };

        let status = self.check_game_over();
        self.moves = self.moves.wrapping_add(1);

        debug!(
            "move {} #{}: changed={} merges={} gained={} spawned={:?}",
            direction.as_str(),
            self.moves,
            slide.changed,
            slide.merges,
            slide.score,
            spawned
        );

        self.last_event = Some(MoveEvent {
            direction,
            changed: slide.changed,
            merges: slide.merges,
            score_gained: slide.score,
            spawned,
            game_over: status == GameStatus::GameOver,
        });

        if slide.changed {
            MoveOutcome::Moved
        } else {
            MoveOutcome::Unchanged
        }
    }

    /// Place one random tile on an empty cell
    ///
    /// 2 with probability 0.9, 4 with probability 0.1 (by default). A no-op
    /// returning `None` when the board is full.
    pub fn spawn_tile(&mut self) -> Option<SpawnedTile> {
        self.spawner.spawn(&mut self.board)
    }

    /// Re-evaluate the terminal condition
    ///
    /// Switches to `GameOver` when no cell is empty and no orthogonal pair is
    /// equal. `GameOver` is sticky: only `reset` returns to `Active`.
    pub fn check_game_over(&mut self) -> GameStatus {
        if self.status == GameStatus::Active && self.board.is_locked() {
            self.status = GameStatus::GameOver;
            info!(
                "episode {} over after {} moves: score {}, highest tile {}",
                self.episode_id,
                self.moves,
                self.score,
                self.board.highest_tile()
            );
        }
        self.status
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.board = *self.board.cells();
        out.board_hash = board_hash(self.board.cells());
        out.score = self.score;
        out.status = self.status;
        out.episode_id = self.episode_id;
        out.moves = self.moves;
        out.highest_tile = self.board.highest_tile();
        out.empty_cells = self.board.count_empty() as u8;
        out.seed = self.spawner.seed();
        out.spawn_policy = self.config.spawn_policy;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked_board() -> Board {
        Board::from_cells(&[
            2, 4, 2, 4, //
            4, 2, 4, 2, //
            2, 4, 2, 4, //
            4, 2, 4, 2,
        ])
        .unwrap()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::with_seed(12345);

        assert_eq!(state.score, 0);
        assert_eq!(state.status, GameStatus::Active);
        assert_eq!(state.episode_id, 0);
        assert_eq!(state.moves, 0);
        assert!(state.last_event.is_none());
        assert_eq!(state.board.count_occupied(), 2);
    }

    #[test]
    fn test_reset_increments_episode_id() {
        let mut state = GameState::with_seed(12345);
        state.apply_move(Direction::Left);
        assert_eq!(state.episode_id, 0);

        state.reset();
        assert_eq!(state.episode_id, 1);
        assert_eq!(state.moves, 0);
        assert!(state.last_event.is_none());
    }

    #[test]
    fn test_move_records_event() {
        let board = Board::from_cells(&[
            2, 2, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0, //
            0, 0, 0, 0,
        ])
        .unwrap();
        let mut state = GameState::from_board(board, 0, GameConfig::default());

        assert_eq!(state.apply_move(Direction::Left), MoveOutcome::Moved);
        let event = state.take_last_event().unwrap();
        assert_eq!(event.direction, Direction::Left);
        assert!(event.changed);
        assert_eq!(event.merges, 1);
        assert_eq!(event.score_gained, 4);
        assert!(event.spawned.is_some());
        assert!(!event.game_over);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_from_board_detects_locked_position() {
        let state = GameState::from_board(locked_board(), 100, GameConfig::default());
        assert_eq!(state.status(), GameStatus::GameOver);
        assert_eq!(state.score(), 100);
    }

    #[test]
    fn test_game_over_rejects_moves() {
        let mut state = GameState::from_board(locked_board(), 0, GameConfig::default());
        let before = state.cells();

        for dir in Direction::ALL {
            assert_eq!(state.apply_move(dir), MoveOutcome::GameOver);
        }
        assert_eq!(state.cells(), before);
        assert_eq!(state.moves(), 0);
        assert!(state.take_last_event().is_none());
    }

    #[test]
    fn test_game_over_is_sticky_until_reset() {
        let mut state = GameState::from_board(locked_board(), 0, GameConfig::default());
        assert_eq!(state.check_game_over(), GameStatus::GameOver);

        state.reset();
        assert_eq!(state.status(), GameStatus::Active);
        assert_eq!(state.board().count_occupied(), 2);
    }
}
