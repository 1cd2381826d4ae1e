use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileStatus {
    Open,
    Shut,
}

impl TileStatus {
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    pub const fn is_shut(self) -> bool {
        matches!(self, Self::Shut)
    }
}

impl Default for TileStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Read-only view of one board cell; boards hand these out by value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub row: Row,
    pub col: Col,
    pub value: TileValue,
    pub status: TileStatus,
}

impl Tile {
    pub const fn new(pos: TilePos, status: TileStatus) -> Self {
        Self {
            row: pos.0,
            col: pos.1,
            value: face_value(pos),
            status,
        }
    }

    pub const fn pos(self) -> TilePos {
        (self.row, self.col)
    }

    pub const fn is_open(self) -> bool {
        self.status.is_open()
    }

    pub const fn is_shut(self) -> bool {
        self.status.is_shut()
    }
}
