use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Tiles picked during the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    positions: BTreeSet<TilePos>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.positions.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TilePos> {
        self.positions.iter().copied()
    }

    /// Sum of the face values of the selected tiles.
    pub fn value_sum(&self) -> Sum {
        self.iter().map(|pos| Sum::from(face_value(pos))).sum()
    }

    pub fn with(&self, pos: TilePos) -> Self {
        let mut positions = self.positions.clone();
        positions.insert(pos);
        Self { positions }
    }

    /// Drops `pos` together with every selected tile that only stayed reachable through it.
    pub fn remove_with_dependents(&self, pos: TilePos, board: &Board, rules: RuleSet) -> Self {
        let mut next = self.clone();
        next.positions.remove(&pos);

        loop {
            let stranded: Vec<TilePos> = next
                .iter()
                .filter(|&selected| !rules.is_available(board.tile_at(selected), board, &next))
                .collect();

            if stranded.is_empty() {
                return next;
            }

            log::trace!("Deselecting {:?} after removing {:?}", stranded, pos);
            for selected in stranded {
                next.positions.remove(&selected);
            }
        }
    }
}

impl FromIterator<TilePos> for Selection {
    fn from_iter<I: IntoIterator<Item = TilePos>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}
