use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;
use crate::types::BOARD_SHAPE;

/// Snapshot of the 3x9 tile grid.
///
/// Boards are never edited after construction: moves produce a successor board through
/// [`Board::with_shut`], so any board handed out stays valid as a record of that moment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    statuses: Array2<TileStatus>,
}

impl Board {
    /// Fresh board with every tile open.
    pub fn new() -> Self {
        Self {
            statuses: Array2::default(BOARD_SHAPE),
        }
    }

    /// Board with the given positions shut and everything else open.
    pub fn from_shut_positions(positions: &[TilePos]) -> Result<Self> {
        let mut statuses: Array2<TileStatus> = Array2::default(BOARD_SHAPE);

        for &pos in positions {
            let pos = Self::validate_pos(pos)?;
            statuses[pos.to_nd_index()] = TileStatus::Shut;
        }

        Ok(Self { statuses })
    }

    pub const fn validate_pos(pos: TilePos) -> Result<TilePos> {
        if pos.0 < ROWS && pos.1 < COLS {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Checks the grid shape, needed for boards that came through deserialization.
    pub fn validate(&self) -> Result<()> {
        if self.statuses.dim() == (BOARD_SHAPE[0], BOARD_SHAPE[1]) {
            Ok(())
        } else {
            Err(GameError::InvalidBoardShape)
        }
    }

    pub fn tile_at(&self, pos: TilePos) -> Tile {
        Tile::new(pos, self[pos])
    }

    pub fn tiles(&self) -> impl Iterator<Item = Tile> {
        positions().map(move |pos| self.tile_at(pos))
    }

    pub fn tiles_by_row(&self, row: Row) -> impl Iterator<Item = Tile> {
        (0..COLS).map(move |col| self.tile_at((row, col)))
    }

    /// Tiles of one column, front to back.
    pub fn tiles_by_column(&self, col: Col) -> impl Iterator<Item = Tile> {
        (0..ROWS).map(move |row| self.tile_at((row, col)))
    }

    pub fn open_tiles(&self) -> impl Iterator<Item = Tile> {
        self.tiles().filter(|tile| tile.is_open())
    }

    pub fn open_count(&self) -> usize {
        self.statuses.iter().filter(|status| status.is_open()).count()
    }

    pub fn is_fully_shut(&self) -> bool {
        self.statuses.iter().all(|status| status.is_shut())
    }

    pub fn is_row_shut(&self, row: Row) -> bool {
        self.tiles_by_row(row).all(Tile::is_shut)
    }

    pub fn max_open_value(&self) -> Option<TileValue> {
        self.open_tiles().map(|tile| tile.value).max()
    }

    /// Position of the tile directly in front of `pos`, none for the front row.
    pub const fn front_of((row, col): TilePos) -> Option<TilePos> {
        match row.checked_sub(1) {
            Some(front) => Some((front, col)),
            None => None,
        }
    }

    /// Successor board with every selected tile shut.
    pub fn with_shut(&self, selection: &Selection) -> Self {
        let mut statuses = self.statuses.clone();
        for pos in selection.iter() {
            statuses[pos.to_nd_index()] = TileStatus::Shut;
        }
        Self { statuses }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<TilePos> for Board {
    type Output = TileStatus;

    fn index(&self, pos: TilePos) -> &Self::Output {
        &self.statuses[pos.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_has_expected_layout() {
        let board = Board::new();

        assert_eq!(board.tiles().count(), TILE_COUNT);
        assert_eq!(board.open_count(), TILE_COUNT);
        assert!(!board.is_fully_shut());

        let front: alloc::vec::Vec<_> = board.tiles_by_row(FRONT_ROW).map(|t| t.value).collect();
        let middle: alloc::vec::Vec<_> = board.tiles_by_row(MIDDLE_ROW).map(|t| t.value).collect();
        assert_eq!(front, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(middle, [9, 8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn column_runs_front_to_back() {
        let board = Board::new();
        let column: alloc::vec::Vec<_> = board.tiles_by_column(2).map(|t| t.pos()).collect();

        assert_eq!(column, [(0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn with_shut_leaves_original_untouched() {
        let board = Board::new();
        let selection: Selection = [(0, 0), (1, 0)].into_iter().collect();

        let next = board.with_shut(&selection);

        assert!(board.tile_at((0, 0)).is_open());
        assert!(next.tile_at((0, 0)).is_shut());
        assert!(next.tile_at((1, 0)).is_shut());
        assert_eq!(next.open_count(), TILE_COUNT - 2);
    }

    #[test]
    fn fully_shut_board_is_detected() {
        let all: alloc::vec::Vec<_> = positions().collect();
        let board = Board::from_shut_positions(&all).unwrap();

        assert!(board.is_fully_shut());
        assert_eq!(board.max_open_value(), None);
    }

    #[test]
    fn from_shut_positions_rejects_out_of_range() {
        assert_eq!(
            Board::from_shut_positions(&[(3, 0)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            Board::from_shut_positions(&[(0, 9)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn front_neighbor_lookup() {
        assert_eq!(Board::front_of((0, 4)), None);
        assert_eq!(Board::front_of((2, 4)), Some((1, 4)));
    }

    #[test]
    fn deserialized_board_shape_is_checked() {
        let board: Board = serde_json::from_str(
            r#"{"statuses":{"v":1,"dim":[1,2],"data":["Open","Shut"]}}"#,
        )
        .unwrap();

        assert_eq!(board.validate(), Err(GameError::InvalidBoardShape));
        assert_eq!(Board::new().validate(), Ok(()));
    }
}
