#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use dice::*;
pub use engine::*;
pub use error::*;
pub use rules::*;
pub use score::*;
pub use selection::*;
pub use solver::*;
pub use stats::*;
pub use tile::*;
pub use types::*;

mod board;
mod dice;
mod engine;
mod error;
mod rules;
mod score;
mod selection;
mod solver;
mod stats;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rules: RuleSet,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ChangeOutcome {
    NoChange,
    Changed,
}

impl ChangeOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RollOutcome {
    Ignored,
    Rolling,
    Ready(DiceRoll),
    Lost(DiceRoll),
}

impl RollOutcome {
    pub const fn has_update(self) -> bool {
        use RollOutcome::*;
        match self {
            Ignored => false,
            Rolling => true,
            Ready(_) => true,
            Lost(_) => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    Ignored,
    Selected,
    Deselected { removed: usize },
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ConfirmOutcome {
    Ignored,
    Rejected { selected: Sum, target: Sum },
    Shut,
    Won,
}

impl ConfirmOutcome {
    pub const fn has_update(self) -> bool {
        use ConfirmOutcome::*;
        match self {
            Ignored => false,
            Rejected { .. } => false,
            Shut => true,
            Won => true,
        }
    }
}
