//! The game orchestrator.
//!
//! [`BoardGame`] owns the board, dice, rules, players and event bus of one
//! session and drives the `NotStarted → Started → Finished` state machine.
//!
//! - `board_game`: construction, players, start, shared turn plumbing
//! - `turn`: dice turns on linear boards (Snakes & Ladders, Ludo)
//! - `travel`: route choice and token decisions (Lost Diamond)
//! - `snapshot`: serializable game state and turn history

mod board_game;
mod snapshot;
mod travel;
mod turn;

use serde::{Deserialize, Serialize};

pub use board_game::BoardGame;
pub use snapshot::{GameSnapshot, PendingToken, TurnRecord};
pub use travel::{TokenOffer, TokenReveal, TokenRoll, TravelOption, TravelOutcome};
pub use turn::{MoveReport, TurnOutcome};

/// Lifecycle of a session. `Finished` is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    NotStarted,
    Started,
    Finished,
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameState::NotStarted => "not started",
            GameState::Started => "started",
            GameState::Finished => "finished",
        };
        f.write_str(name)
    }
}
