//! Multi-die roller.
//!
//! `Dice` is a leaf: it knows its shape (count × sides), the last rolled
//! values and its own random stream. Nothing else.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::GameError;
use super::rng::{GameRng, GameRngState};

/// Per-die values of a single roll, in die order.
///
/// Most games roll one or two dice, so this stays on the stack.
pub type RollValues = SmallVec<[u32; 4]>;

/// A configurable set of identical dice.
///
/// ## Example
///
/// ```
/// use board_engine::core::Dice;
///
/// let mut dice = Dice::new(2, 6, 42).unwrap();
/// let total = dice.roll();
///
/// assert!((2..=12).contains(&total));
/// assert_eq!(dice.values().len(), 2);
/// assert_eq!(dice.values().iter().sum::<u32>(), total);
/// ```
#[derive(Clone, Debug)]
pub struct Dice {
    sides: u32,
    values: RollValues,
    rng: GameRng,
}

impl Dice {
    /// Create `count` dice with `sides` faces each, seeded with `seed`.
    ///
    /// Fails with [`GameError::InvalidDice`] if either value is zero.
    /// Before the first roll every die shows 1.
    pub fn new(count: u32, sides: u32, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(count, sides, GameRng::new(seed))
    }

    /// Create dice drawing from an existing random stream.
    pub fn with_rng(count: u32, sides: u32, rng: GameRng) -> Result<Self, GameError> {
        if count == 0 || sides == 0 {
            return Err(GameError::InvalidDice { count, sides });
        }

        Ok(Self {
            sides,
            values: (0..count).map(|_| 1).collect(),
            rng,
        })
    }

    /// Re-randomize every die and return the sum.
    pub fn roll(&mut self) -> u32 {
        for value in self.values.iter_mut() {
            *value = self.rng.roll_die(self.sides);
        }
        self.total()
    }

    /// Replace the last roll with the given values.
    ///
    /// Used to replay a recorded turn. Every value must be a legal face and
    /// there must be exactly one value per die.
    pub fn load(&mut self, values: &[u32]) -> Result<u32, GameError> {
        self.check(values)?;
        self.values = values.iter().copied().collect();
        Ok(self.total())
    }

    /// Check that `values` is a legal roll for these dice, without keeping it.
    pub fn check(&self, values: &[u32]) -> Result<(), GameError> {
        if values.len() != self.values.len() {
            return Err(GameError::DiceCountMismatch {
                expected: self.values.len(),
                actual: values.len(),
            });
        }
        if let Some(&value) = values.iter().find(|&&v| v == 0 || v > self.sides) {
            return Err(GameError::DieValueOutOfRange {
                value,
                sides: self.sides,
            });
        }
        Ok(())
    }

    /// The last rolled values, in die order.
    #[must_use]
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    /// The value of die `n` (1-indexed).
    pub fn die(&self, n: usize) -> Result<u32, GameError> {
        if n == 0 || n > self.values.len() {
            return Err(GameError::DieOutOfRange {
                index: n,
                count: self.values.len(),
            });
        }
        Ok(self.values[n - 1])
    }

    /// Sum of the last roll.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.values.iter().sum()
    }

    /// Number of dice.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.values.len() as u32
    }

    /// Faces per die.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Highest possible total.
    #[must_use]
    pub fn max_roll(&self) -> u32 {
        self.count() * self.sides
    }

    /// Capture the dice for a snapshot.
    #[must_use]
    pub fn state(&self) -> DiceState {
        DiceState {
            sides: self.sides,
            values: self.values.clone(),
            rng: self.rng.state(),
        }
    }

    /// Restore dice from a snapshot.
    pub fn from_state(state: &DiceState) -> Result<Self, GameError> {
        let mut dice = Self::with_rng(
            state.values.len() as u32,
            state.sides,
            GameRng::from_state(&state.rng),
        )?;
        dice.load(&state.values)?;
        Ok(dice)
    }
}

/// Serializable dice state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceState {
    pub sides: u32,
    pub values: RollValues,
    pub rng: GameRngState,
}
