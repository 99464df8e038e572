//! Rule configuration shared by every game family.
//!
//! Games differ by [`GameType`] and by the toggles in [`GameRules`]; the
//! orchestrator reads these and never needs a subclass per variant.

pub mod game_rules;

pub use game_rules::{keys, GameRules, GameType, RuleValue};
