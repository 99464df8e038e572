//! Core engine types: players, dice, RNG and errors.
//!
//! These are the leaves every game family shares. Nothing in here knows
//! about boards, rules or turns.

pub mod dice;
pub mod error;
pub mod player;
pub mod rng;

pub use dice::{Dice, DiceState, RollValues};
pub use error::{GameError, Rejection};
pub use player::{Player, PlayerId};
pub use rng::{GameRng, GameRngState};
