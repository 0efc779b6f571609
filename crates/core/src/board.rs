//! Board module - the 4x4 tile grid
//!
//! The board is a flat array of 16 cell values in row-major order
//! (`x + y * GRID_SIZE`). A value of 0 is an empty cell, anything else is a
//! power-of-two tile. The slide/merge pass, adjacency checks and empty-cell
//! queries all work in place on this array with no allocation.

use std::fmt;

use arrayvec::ArrayVec;

use crate::types::{is_valid_tile, Direction, Tile, CELL_COUNT, EMPTY, GRID_SIZE};

/// Summary of one slide/merge pass over the board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideResult {
    /// Whether any tile changed position or merged
    pub changed: bool,
    /// Number of pairwise merges
    pub merges: u32,
    /// Sum of the merged values (the score gained by this pass)
    pub score: u32,
}

/// Reasons a cell list cannot become a board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    WrongLength { len: usize },
    InvalidTile { index: usize, value: Tile },
}

impl BoardError {
    pub fn code(self) -> &'static str {
        match self {
            BoardError::WrongLength { .. } => "wrong_length",
            BoardError::InvalidTile { .. } => "invalid_tile",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            BoardError::WrongLength { .. } => "board must have exactly 16 cells",
            BoardError::InvalidTile { .. } => "cell values must be 0 or a power of two",
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BoardError::WrongLength { len } => write!(f, "{} (got {})", self.message(), len),
            BoardError::InvalidTile { index, value } => {
                write!(f, "{} (cell {} holds {})", self.message(), index, value)
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// The game board - 4 columns x 4 rows using flat array storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * GRID_SIZE + x)
    cells: [Tile; CELL_COUNT],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; CELL_COUNT],
        }
    }

    /// Build a board from 16 row-major cell values
    ///
    /// ```
    /// use tile2048_core::Board;
    ///
    /// let board = Board::from_cells(&[
    ///     2, 0, 0, 0,
    ///     0, 4, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 2048,
    /// ]).unwrap();
    /// assert_eq!(board.get(1, 1), Some(4));
    /// assert!(Board::from_cells(&[3; 16]).is_err());
    /// ```
    pub fn from_cells(values: &[Tile]) -> Result<Self, BoardError> {
        if values.len() != CELL_COUNT {
            return Err(BoardError::WrongLength { len: values.len() });
        }

        let mut cells = [EMPTY; CELL_COUNT];
        for (index, (&value, cell)) in values.iter().zip(cells.iter_mut()).enumerate() {
            if !is_valid_tile(value) {
                return Err(BoardError::InvalidTile { index, value });
            }
            *cell = value;
        }
        Ok(Self { cells })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    pub fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_SIZE as i8 || y < 0 || y >= GRID_SIZE as i8 {
            return None;
        }
        Some((y as usize) * GRID_SIZE + (x as usize))
    }

    /// Column and row of a flat index
    #[inline(always)]
    pub fn coords(index: usize) -> (i8, i8) {
        ((index % GRID_SIZE) as i8, (index / GRID_SIZE) as i8)
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Tile> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, value: Tile) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = value;
                true
            }
            None => false,
        }
    }

    /// Set cell by flat index
    /// Returns false if out of bounds
    pub fn set_index(&mut self, index: usize, value: Tile) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Tile; CELL_COUNT] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells = [EMPTY; CELL_COUNT];
    }

    /// Flat indices of all empty cells, ascending
    pub fn empty_indices(&self) -> ArrayVec<usize, CELL_COUNT> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == EMPTY)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == EMPTY).count()
    }

    pub fn count_occupied(&self) -> usize {
        CELL_COUNT - self.count_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != EMPTY)
    }

    /// Highest tile on the board (0 for an empty board)
    pub fn highest_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }

    /// Sum of all tile values
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }

    /// Check whether any two orthogonally adjacent tiles hold the same value
    ///
    /// Out-of-bounds neighbours never match. Looking right and down from every
    /// cell covers each pair exactly once.
    pub fn has_adjacent_pair(&self) -> bool {
        (0..CELL_COUNT).any(|i| {
            let value = self.cells[i];
            if value == EMPTY {
                return false;
            }
            let (x, y) = Self::coords(i);
            self.get(x + 1, y) == Some(value) || self.get(x, y + 1) == Some(value)
        })
    }

    /// Terminal position: no empty cell and nothing can merge
    pub fn is_locked(&self) -> bool {
        self.is_full() && !self.has_adjacent_pair()
    }

    /// Push every tile toward the `direction` edge, merging equal neighbours
    ///
    /// Cells are scanned in ascending index order for Left/Up and descending
    /// order for Right/Down. Each tile advances one cell at a time: into an
    /// empty cell it keeps going, into an equal tile it merges and stops,
    /// against anything else (or the edge) it stops. A cell that was produced
    /// by a merge during this pass blocks further merges into it.
    ///
    /// ```
    /// use tile2048_core::Board;
    /// use tile2048_types::Direction;
    ///
    /// let mut board = Board::from_cells(&[
    ///     2, 2, 2, 2,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    /// ]).unwrap();
    /// let result = board.slide(Direction::Left);
    /// assert_eq!(&board.cells()[..4], &[4, 4, 0, 0]);
    /// assert_eq!(result.score, 8);
    /// assert_eq!(result.merges, 2);
    /// ```
    pub fn slide(&mut self, direction: Direction) -> SlideResult {
        let (dx, dy) = direction.delta();
        let mut merged = [false; CELL_COUNT];
        let mut result = SlideResult::default();

        for step in 0..CELL_COUNT {
            let start = if direction.scans_ascending() {
                step
            } else {
                CELL_COUNT - 1 - step
            };

            let value = self.cells[start];
            if value == EMPTY {
                continue;
            }

            let mut here = start;
            loop {
                let (x, y) = Self::coords(here);
                let Some(next) = Self::index(x + dx, y + dy) else {
                    break;
                };

                let target = self.cells[next];
                if target == EMPTY {
                    self.cells[next] = value;
                    self.cells[here] = EMPTY;
                    here = next;
                    result.changed = true;
                    continue;
                }

                if target == value && !merged[next] {
                    // A doubled value that no longer fits in a Tile is treated as blocked.
                    if let Some(sum) = value.checked_mul(2) {
                        self.cells[next] = sum;
                        self.cells[here] = EMPTY;
                        merged[next] = true;
                        result.changed = true;
                        result.merges += 1;
                        result.score = result.score.saturating_add(sum);
                    }
                }
                break;
            }
        }

        result
    }

    /// Whether sliding in `direction` would change the board
    pub fn can_slide(&self, direction: Direction) -> bool {
        let mut probe = *self;
        probe.slide(direction).changed
    }

    /// Directions whose slide would change the board, in `Direction::ALL` order
    pub fn legal_moves(&self) -> ArrayVec<Direction, 4> {
        Direction::ALL
            .into_iter()
            .filter(|&dir| self.can_slide(dir))
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(GRID_SIZE).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for (x, &value) in row.iter().enumerate() {
                if x > 0 {
                    write!(f, " ")?;
                }
                if value == EMPTY {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", value)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: [Tile; 4]) -> Board {
        let mut cells = [0; CELL_COUNT];
        cells[..4].copy_from_slice(&values);
        Board::from_cells(&cells).unwrap()
    }

    fn first_row(board: &Board) -> [Tile; 4] {
        let mut out = [0; 4];
        out.copy_from_slice(&board.cells()[..4]);
        out
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(3, 0), Some(3));
        assert_eq!(Board::index(0, 1), Some(4));
        assert_eq!(Board::index(3, 3), Some(15));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(4, 0), None);
        assert_eq!(Board::index(0, 4), None);
        assert_eq!(Board::coords(6), (2, 1));
    }

    #[test]
    fn test_slide_left_packs_and_merges() {
        let mut board = row([0, 2, 0, 2]);
        let result = board.slide(Direction::Left);
        assert_eq!(first_row(&board), [4, 0, 0, 0]);
        assert_eq!(result.merges, 1);
        assert_eq!(result.score, 4);
    }

    #[test]
    fn test_slide_right_mirrors_left() {
        let mut board = row([0, 2, 0, 2]);
        board.slide(Direction::Right);
        assert_eq!(first_row(&board), [0, 0, 0, 4]);
    }

    #[test]
    fn test_merged_tile_is_not_merged_again() {
        let mut board = row([2, 2, 4, 0]);
        let result = board.slide(Direction::Left);
        assert_eq!(first_row(&board), [4, 4, 0, 0]);
        assert_eq!(result.score, 4);

        let mut board = row([4, 4, 8, 8]);
        let result = board.slide(Direction::Right);
        assert_eq!(first_row(&board), [0, 0, 8, 16]);
        assert_eq!(result.score, 24);
    }

    #[test]
    fn test_blocked_by_unequal_neighbour() {
        let mut board = row([2, 4, 8, 16]);
        let result = board.slide(Direction::Left);
        assert!(!result.changed);
        assert_eq!(first_row(&board), [2, 4, 8, 16]);
    }

    #[test]
    fn test_overflowing_merge_is_blocked() {
        let top = 1u32 << 31;
        let mut board = row([top, top, 0, 0]);
        let result = board.slide(Direction::Left);
        assert!(!result.changed);
        assert_eq!(first_row(&board), [top, top, 0, 0]);
    }

    #[test]
    fn test_display_marks_empty_cells() {
        let board = row([2, 0, 0, 2048]);
        let text = board.to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "    2     .     .  2048");
        assert_eq!(text.lines().count(), 4);
    }
}
