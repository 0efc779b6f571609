use serde::{Deserialize, Serialize};

use crate::types::{GameStatus, SpawnPolicy, Tile, CELL_COUNT};

/// FNV-1a 64-bit hash of the board cells (little-endian bytes of each cell)
pub fn board_hash(cells: &[Tile]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for cell in cells {
        for b in cell.to_le_bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x00000100000001B3);
        }
    }
    h
}

/// Read-only view of a game handed to a presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Row-major cells, `index = x + y * 4`
    pub board: [Tile; CELL_COUNT],
    pub board_hash: u64,
    pub score: u32,
    pub status: GameStatus,
    pub episode_id: u32,
    pub moves: u32,
    pub highest_tile: Tile,
    pub empty_cells: u8,
    pub seed: u64,
    pub spawn_policy: SpawnPolicy,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [0; CELL_COUNT];
        self.board_hash = board_hash(&self.board);
        self.score = 0;
        self.status = GameStatus::Active;
        self.episode_id = 0;
        self.moves = 0;
        self.highest_tile = 0;
        self.empty_cells = CELL_COUNT as u8;
        self.seed = 0;
        self.spawn_policy = SpawnPolicy::Always;
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Active
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            board: [0; CELL_COUNT],
            board_hash: 0,
            score: 0,
            status: GameStatus::Active,
            episode_id: 0,
            moves: 0,
            highest_tile: 0,
            empty_cells: 0,
            seed: 0,
            spawn_policy: SpawnPolicy::Always,
        };
        s.clear();
        s
    }
}
