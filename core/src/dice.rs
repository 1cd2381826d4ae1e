use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_FACE: DieFace = 1;
pub const MAX_FACE: DieFace = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceCount {
    One,
    Two,
}

impl Default for DiceCount {
    fn default() -> Self {
        Self::Two
    }
}

/// Faces shown after a roll, `second` is empty for a single-die roll.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub first: DieFace,
    pub second: Option<DieFace>,
}

impl DiceRoll {
    pub fn sum(self) -> Sum {
        Sum::from(self.first) + self.second.map_or(0, Sum::from)
    }

    pub fn count(self) -> DiceCount {
        if self.second.is_some() {
            DiceCount::Two
        } else {
            DiceCount::One
        }
    }
}

/// Where die faces come from. Production code uses [`SeededDice`], tests script the faces.
pub trait DiceSource {
    /// Next face, always within `MIN_FACE..=MAX_FACE`.
    fn roll_die(&mut self) -> DieFace;

    fn roll(&mut self, count: DiceCount) -> DiceRoll {
        let first = self.roll_die();
        let second = match count {
            DiceCount::One => None,
            DiceCount::Two => Some(self.roll_die()),
        };
        DiceRoll { first, second }
    }
}

/// Uniform face from any random generator.
pub fn roll_die<R: Rng + ?Sized>(rng: &mut R) -> DieFace {
    rng.random_range(MIN_FACE..=MAX_FACE)
}

#[derive(Clone, Debug)]
pub struct SeededDice {
    rng: SmallRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DiceSource for SeededDice {
    fn roll_die(&mut self) -> DieFace {
        roll_die(&mut self.rng)
    }
}

/// Replays a fixed list of faces, starting over once it runs out.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedDice {
    faces: Vec<DieFace>,
    next: usize,
}

impl ScriptedDice {
    pub fn new(faces: impl Into<Vec<DieFace>>) -> Result<Self> {
        let faces = faces.into();
        if faces.is_empty() || faces.iter().any(|face| !(MIN_FACE..=MAX_FACE).contains(face)) {
            return Err(GameError::InvalidDieFace);
        }
        Ok(Self { faces, next: 0 })
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> DieFace {
        let face = self.faces[self.next];
        self.next = (self.next + 1) % self.faces.len();
        face
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_stay_in_range_and_repeat() {
        let mut a = SeededDice::new(7);
        let mut b = SeededDice::new(7);

        for _ in 0..500 {
            let face = a.roll_die();
            assert!((MIN_FACE..=MAX_FACE).contains(&face));
            assert_eq!(face, b.roll_die());
        }
    }

    #[test]
    fn seeded_dice_hit_every_face() {
        let mut dice = SeededDice::new(42);
        let mut seen = [false; 6];

        for _ in 0..600 {
            seen[usize::from(dice.roll_die() - 1)] = true;
        }

        assert!(seen.iter().all(|&hit| hit));
    }

    #[test]
    fn scripted_dice_cycle() {
        let mut dice = ScriptedDice::new([3, 4, 6]).unwrap();

        assert_eq!(dice.roll(DiceCount::Two), DiceRoll { first: 3, second: Some(4) });
        assert_eq!(dice.roll(DiceCount::One), DiceRoll { first: 6, second: None });
        assert_eq!(dice.roll_die(), 3);
    }

    #[test]
    fn scripted_dice_reject_bad_scripts() {
        assert_eq!(ScriptedDice::new(Vec::new()), Err(GameError::InvalidDieFace));
        assert_eq!(ScriptedDice::new([1, 7]), Err(GameError::InvalidDieFace));
        assert_eq!(ScriptedDice::new([0]), Err(GameError::InvalidDieFace));
    }

    #[test]
    fn roll_sum_and_count() {
        let two = DiceRoll { first: 5, second: Some(6) };
        let one = DiceRoll { first: 2, second: None };

        assert_eq!(two.sum(), 11);
        assert_eq!(two.count(), DiceCount::Two);
        assert_eq!(one.sum(), 2);
        assert_eq!(one.count(), DiceCount::One);
    }
}
