use crate::*;

/// Multiplier applied to an open tile's value, front tiles hurt the most.
pub const fn row_weight(row: Row) -> Score {
    match row {
        FRONT_ROW => 3,
        MIDDLE_ROW => 2,
        _ => 1,
    }
}

/// Penalty for the tiles left open on `board`, `0` once everything is shut.
pub fn score(board: &Board) -> Score {
    board
        .open_tiles()
        .map(|tile| Score::from(tile.value) * row_weight(tile.row))
        .sum()
}
