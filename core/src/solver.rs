//! Feasibility checks run after every roll to detect a lost game.
//!
//! Two searches are provided. [`can_make_sum`] treats each column as a chain: a turn may take
//! the first open tile of a column together with any number of open tiles directly behind it,
//! so a column offers `0` plus the running sums of its open tiles front to back.
//! [`can_make_subset_sum`] only looks at tiles that are available without any selection and
//! tries every subset of them.
//!
//! Both searches are plain depth-first recursion with pruning on overshoot. A board never holds
//! more than 27 tiles and targets never exceed 12, so this finishes well within a frame.

use alloc::vec::Vec;
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Sums a single column can contribute, ascending, always starting with `0`.
pub type ColumnOptions = SmallVec<[Sum; 4]>;

pub fn column_options(board: &Board, col: Col) -> ColumnOptions {
    let mut options: ColumnOptions = smallvec![0];
    let mut chain: Sum = 0;

    // shut tiles are gaps in the chain, they already satisfy the tile behind them
    for tile in board.tiles_by_column(col).filter(|tile| tile.is_open()) {
        chain += Sum::from(tile.value);
        options.push(chain);
    }

    options
}

/// Whether some column-chain selection adds up to exactly `target`.
///
/// A target of `0` is always reachable by selecting nothing.
pub fn can_make_sum(target: Sum, board: &Board) -> bool {
    let found = chain_lengths(target, board).is_some();
    log::trace!("Chain feasibility for {}: {}", target, found);
    found
}

/// Whether some subset of the currently available tiles adds up to exactly `target`.
///
/// A target of `0` is always reachable by selecting nothing.
pub fn can_make_subset_sum(target: Sum, board: &Board) -> bool {
    let found = subset_positions(target, board).is_some();
    log::trace!("Subset feasibility for {}: {}", target, found);
    found
}

/// One legal selection reaching `target` under `rules`, if there is any.
///
/// Returns `None` for a target of `0`, there is nothing to select.
pub fn suggest_selection(target: Sum, board: &Board, rules: RuleSet) -> Option<Selection> {
    if target == 0 {
        return None;
    }

    match rules {
        RuleSet::Chain => {
            let lengths = chain_lengths(target, board)?;
            let selection = lengths
                .into_iter()
                .zip(0..COLS)
                .flat_map(|(length, col)| {
                    board
                        .tiles_by_column(col)
                        .filter(|tile| tile.is_open())
                        .take(length)
                        .map(|tile| tile.pos())
                })
                .collect();
            Some(selection)
        }
        RuleSet::Legacy => subset_positions(target, board).map(Selection::from_iter),
    }
}

/// Number of open tiles to take from each column, leading columns first. Columns past the end
/// of the returned list contribute nothing.
fn chain_lengths(target: Sum, board: &Board) -> Option<Vec<usize>> {
    let options: Vec<ColumnOptions> = (0..COLS).map(|col| column_options(board, col)).collect();
    let mut picks = Vec::with_capacity(options.len());

    search_chains(&options, target, 0, &mut picks).then_some(picks)
}

fn search_chains(
    options: &[ColumnOptions],
    target: Sum,
    running: Sum,
    picks: &mut Vec<usize>,
) -> bool {
    if running == target {
        return true;
    }

    let Some((column, rest)) = options.split_first() else {
        return false;
    };

    for (length, &option) in column.iter().enumerate() {
        let next = running + option;
        // options are ascending, everything after this overshoots too
        if next > target {
            break;
        }

        picks.push(length);
        if search_chains(rest, target, next, picks) {
            return true;
        }
        picks.pop();
    }

    false
}

fn subset_positions(target: Sum, board: &Board) -> Option<Vec<TilePos>> {
    let empty = Selection::new();
    let candidates: Vec<Tile> = board
        .open_tiles()
        .filter(|&tile| is_available(tile, board, &empty))
        .collect();
    let mut picks = Vec::with_capacity(candidates.len());

    search_subsets(&candidates, target, 0, &mut picks).then_some(picks)
}

fn search_subsets(
    candidates: &[Tile],
    target: Sum,
    running: Sum,
    picks: &mut Vec<TilePos>,
) -> bool {
    if running == target {
        return true;
    }

    let Some((tile, rest)) = candidates.split_first() else {
        return false;
    };

    let with_tile = running + Sum::from(tile.value);
    if with_tile <= target {
        picks.push(tile.pos());
        if search_subsets(rest, target, with_tile, picks) {
            return true;
        }
        picks.pop();
    }

    search_subsets(rest, target, running, picks)
}
