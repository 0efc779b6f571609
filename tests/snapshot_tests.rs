//! Snapshot tests - board hash and JSON shape

use tile2048::core::{board_hash, Board, GameConfig, GameSnapshot, GameState};
use tile2048::types::{Direction, GameStatus, SpawnPolicy, Tile, CELL_COUNT};

fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x00000100000001B3);
    }
    h
}

#[test]
fn test_board_hash_matches_fnv1a_of_le_cells() {
    let mut state = GameState::with_seed(99);
    state.apply_move(Direction::Left);
    state.apply_move(Direction::Up);
    let snap = state.snapshot();

    let mut bytes = Vec::with_capacity(CELL_COUNT * 4);
    for cell in snap.board {
        bytes.extend_from_slice(&cell.to_le_bytes());
    }
    assert_eq!(snap.board_hash, fnv1a_64(&bytes));
    assert_eq!(snap.board_hash, board_hash(&snap.board));
}

#[test]
fn test_board_hash_changes_with_board() {
    let empty = [0 as Tile; CELL_COUNT];
    let mut one = empty;
    one[0] = 2;
    let mut moved = empty;
    moved[1] = 2;

    assert_ne!(board_hash(&empty), board_hash(&one));
    assert_ne!(board_hash(&one), board_hash(&moved));
}

#[test]
fn test_snapshot_fields_follow_state() {
    let board = Board::from_cells(&[
        2, 2, 0, 0, //
        0, 0, 0, 0, //
        0, 0, 0, 0, //
        0, 0, 0, 128,
    ])
    .unwrap();
    let state = GameState::from_board(board, 40, GameConfig::default().with_seed(6));
    let snap = state.snapshot();

    assert_eq!(snap.board, state.cells());
    assert_eq!(snap.score, 40);
    assert_eq!(snap.highest_tile, 128);
    assert_eq!(snap.empty_cells, 13);
    assert_eq!(snap.seed, 6);
    assert_eq!(snap.moves, 0);
    assert!(snap.playable());
}

#[test]
fn test_default_snapshot_is_cleared() {
    let snap = GameSnapshot::default();
    assert_eq!(snap.board, [0; CELL_COUNT]);
    assert_eq!(snap.board_hash, board_hash(&[0; CELL_COUNT]));
    assert_eq!(snap.empty_cells, CELL_COUNT as u8);
    assert_eq!(snap.status, GameStatus::Active);
}

#[test]
fn test_snapshot_json_round_trip() {
    let board = Board::from_cells(&[
        2, 4, 8, 16, //
        16, 8, 4, 2, //
        2, 4, 8, 16, //
        16, 8, 4, 2,
    ])
    .unwrap();
    let config = GameConfig::default().with_spawn_policy(SpawnPolicy::OnChange);
    let snap = GameState::from_board(board, 512, config).snapshot();

    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"status\":\"game_over\""));
    assert!(json.contains("\"spawn_policy\":\"on-change\""));
    assert!(json.contains("\"score\":512"));

    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}
