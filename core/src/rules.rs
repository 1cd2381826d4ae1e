use serde::{Deserialize, Serialize};

use crate::*;

/// Pairs an availability rule with the feasibility check that agrees with it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleSet {
    /// Selecting a tile unblocks the tile behind it in the same turn; losses are detected with
    /// the column-chain solver.
    Chain,
    /// Only shut tiles unblock the tile behind them; losses are detected with plain subset-sum.
    Legacy,
}

impl RuleSet {
    pub fn is_available(self, tile: Tile, board: &Board, selection: &Selection) -> bool {
        match self {
            Self::Chain => is_available(tile, board, selection),
            Self::Legacy => is_available_legacy(tile, board),
        }
    }

    pub fn can_make_sum(self, target: Sum, board: &Board) -> bool {
        match self {
            Self::Chain => can_make_sum(target, board),
            Self::Legacy => can_make_subset_sum(target, board),
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::Chain
    }
}

/// Whether `tile` may be added to `selection`.
///
/// Front-row tiles are available while open. Any other open tile needs the tile in front of it
/// to be shut or already part of the selection.
pub fn is_available(tile: Tile, board: &Board, selection: &Selection) -> bool {
    if tile.is_shut() {
        return false;
    }

    match Board::front_of(tile.pos()) {
        None => true,
        Some(front) => board[front].is_shut() || selection.contains(front),
    }
}

/// Availability that ignores the selection: the tile in front must already be shut.
pub fn is_available_legacy(tile: Tile, board: &Board) -> bool {
    if tile.is_shut() {
        return false;
    }

    Board::front_of(tile.pos()).is_none_or(|front| board[front].is_shut())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boards() -> [Board; 3] {
        [
            Board::new(),
            Board::from_shut_positions(&[(0, 0), (0, 4), (1, 4), (2, 8)]).unwrap(),
            Board::from_shut_positions(&[(1, 2), (0, 7), (1, 7)]).unwrap(),
        ]
    }

    #[test]
    fn open_front_tiles_are_always_available() {
        let selection: Selection = [(0, 1), (1, 1)].into_iter().collect();
        for board in boards() {
            for tile in board.tiles_by_row(FRONT_ROW).filter(|t| t.is_open()) {
                assert!(is_available(tile, &board, &Selection::new()));
                assert!(is_available(tile, &board, &selection));
            }
        }
    }

    #[test]
    fn shut_tiles_are_never_available() {
        for board in boards() {
            let everything: Selection = positions().collect();
            for tile in board.tiles().filter(|t| t.is_shut()) {
                assert!(!is_available(tile, &board, &everything));
                assert!(!is_available_legacy(tile, &board));
            }
        }
    }

    #[test]
    fn back_tiles_follow_front_neighbor() {
        for board in boards() {
            for tile in board.open_tiles().filter(|t| t.row > FRONT_ROW) {
                let front = Board::front_of(tile.pos()).unwrap();
                let front_shut = board[front].is_shut();

                assert_eq!(is_available(tile, &board, &Selection::new()), front_shut);

                let with_front = Selection::new().with(front);
                assert!(is_available(tile, &board, &with_front));
            }
        }
    }

    #[test]
    fn legacy_ignores_selection() {
        let board = Board::new();
        let selection = Selection::new().with((0, 3));
        let behind = board.tile_at((1, 3));

        assert!(is_available(behind, &board, &selection));
        assert!(!is_available_legacy(behind, &board));
        assert!(!RuleSet::Legacy.is_available(behind, &board, &selection));
    }

    #[test]
    fn middle_shut_unblocks_back_even_with_open_front() {
        let board = Board::from_shut_positions(&[(1, 2)]).unwrap();

        assert!(is_available(board.tile_at((2, 2)), &board, &Selection::new()));
        assert!(is_available_legacy(board.tile_at((2, 2)), &board));
    }
}
