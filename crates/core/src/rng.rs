//! RNG module - random tile spawning
//!
//! Picks a uniformly random empty cell and fills it with a 2 (90%) or a 4
//! (10%). The generator is a seeded `StdRng`, so the same seed always yields
//! the same sequence of spawns for the same sequence of boards.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::types::{SpawnedTile, Tile, SPAWN_HIGH_PROBABILITY, SPAWN_HIGH_VALUE, SPAWN_LOW_VALUE};

/// Seeded source of new tiles
#[derive(Debug, Clone)]
pub struct TileSpawner {
    rng: StdRng,
    seed: u64,
    /// Probability of spawning `SPAWN_HIGH_VALUE`, within [0, 1]
    high_probability: f64,
}

impl TileSpawner {
    /// Create a new spawner with the given seed and 4-tile probability
    ///
    /// The probability is clamped to [0, 1]; NaN falls back to the default.
    pub fn new(seed: u64, high_probability: f64) -> Self {
        let high_probability = if high_probability.is_nan() {
            SPAWN_HIGH_PROBABILITY
        } else {
            high_probability.clamp(0.0, 1.0)
        };
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
            high_probability,
        }
    }

    /// The seed this spawner was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn high_probability(&self) -> f64 {
        self.high_probability
    }

    /// Draw the value of the next tile
    pub fn next_value(&mut self) -> Tile {
        if self.rng.gen_bool(self.high_probability) {
            SPAWN_HIGH_VALUE
        } else {
            SPAWN_LOW_VALUE
        }
    }

    /// Place one new tile on a uniformly chosen empty cell
    ///
    /// Returns `None` and leaves the board untouched when it is full.
    pub fn spawn(&mut self, board: &mut Board) -> Option<SpawnedTile> {
        let empty = board.empty_indices();
        if empty.is_empty() {
            debug!("spawn skipped: board is full");
            return None;
        }

        let index = empty[self.rng.gen_range(0..empty.len())];
        let value = self.next_value();
        board.set_index(index, value);
        Some(SpawnedTile { index, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CELL_COUNT;

    #[test]
    fn test_spawner_deterministic() {
        let mut a = TileSpawner::new(12345, SPAWN_HIGH_PROBABILITY);
        let mut b = TileSpawner::new(12345, SPAWN_HIGH_PROBABILITY);
        let mut board_a = Board::new();
        let mut board_b = Board::new();

        for _ in 0..CELL_COUNT {
            assert_eq!(a.spawn(&mut board_a), b.spawn(&mut board_b));
        }
        assert_eq!(board_a, board_b);
    }

    #[test]
    fn test_spawn_fills_only_empty_cells() {
        let mut spawner = TileSpawner::new(7, SPAWN_HIGH_PROBABILITY);
        let mut board = Board::new();

        for filled in 1..=CELL_COUNT {
            let tile = spawner.spawn(&mut board).unwrap();
            assert!(tile.value == 2 || tile.value == 4);
            assert_eq!(board.cells()[tile.index], tile.value);
            assert_eq!(board.count_occupied(), filled);
        }

        let before = board;
        assert_eq!(spawner.spawn(&mut board), None);
        assert_eq!(board, before);
    }

    #[test]
    fn test_spawn_single_empty_cell() {
        let mut cells = [2; CELL_COUNT];
        cells[9] = 0;
        let mut board = Board::from_cells(&cells).unwrap();
        let mut spawner = TileSpawner::new(99, SPAWN_HIGH_PROBABILITY);

        let tile = spawner.spawn(&mut board).unwrap();
        assert_eq!(tile.index, 9);
        assert!(board.is_full());
    }

    #[test]
    fn test_probability_extremes() {
        let mut never = TileSpawner::new(3, 0.0);
        let mut always = TileSpawner::new(3, 1.0);
        for _ in 0..200 {
            assert_eq!(never.next_value(), 2);
            assert_eq!(always.next_value(), 4);
        }
    }
}
