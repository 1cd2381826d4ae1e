/// Board row index, `0` is the front row.
pub type Row = u8;

/// Board column index.
pub type Col = u8;

/// Number printed on a tile.
pub type TileValue = u8;

/// Face of a single die.
pub type DieFace = u8;

/// Sum of tile values or dice faces.
pub type Sum = u16;

/// Row-weighted penalty of a finished board, lower is better.
pub type Score = u32;

/// Tile position `(row, col)`.
pub type TilePos = (Row, Col);

pub const ROWS: Row = 3;
pub const COLS: Col = 9;
pub const TILE_COUNT: usize = ROWS as usize * COLS as usize;

pub const FRONT_ROW: Row = 0;
pub const MIDDLE_ROW: Row = 1;
pub const BACK_ROW: Row = 2;

pub(crate) const BOARD_SHAPE: [usize; 2] = [ROWS as usize, COLS as usize];

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for TilePos {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Value of the tile at `pos`: front and back rows count up `1..=9`, the middle row counts down.
pub const fn face_value((row, col): TilePos) -> TileValue {
    if row == MIDDLE_ROW { COLS - col } else { col + 1 }
}

/// Every board position in row-major order, front row first.
pub fn positions() -> impl Iterator<Item = TilePos> {
    (0..ROWS).flat_map(|row| (0..COLS).map(move |col| (row, col)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_values_follow_row_layout() {
        assert_eq!(face_value((FRONT_ROW, 0)), 1);
        assert_eq!(face_value((FRONT_ROW, 8)), 9);
        assert_eq!(face_value((MIDDLE_ROW, 0)), 9);
        assert_eq!(face_value((MIDDLE_ROW, 8)), 1);
        assert_eq!(face_value((BACK_ROW, 3)), 4);
    }

    #[test]
    fn positions_cover_the_board_once() {
        let mut seen = alloc::collections::BTreeSet::new();
        for pos in positions() {
            assert!(seen.insert(pos));
        }
        assert_eq!(seen.len(), TILE_COUNT);
    }
}
