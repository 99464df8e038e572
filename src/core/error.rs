//! Error taxonomy.
//!
//! Two kinds of failure exist and they never mix:
//!
//! - [`GameError`]: construction and load failures (bad dice shape, broken
//!   board, unknown action type, dangling tile reference). These are fatal
//!   to the call that built the object and are returned as `Err`.
//! - [`Rejection`]: a gameplay request that cannot be honored right now
//!   (game not started, insufficient funds, no route). The engine state is
//!   left untouched, the rejection is published on the event bus and also
//!   handed back to the caller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Direction, TileId};
use crate::game::GameState;
use crate::rules::GameType;

/// Fatal configuration or load error.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid dice configuration: {count} dice with {sides} sides")]
    InvalidDice { count: u32, sides: u32 },

    #[error("die {index} is out of range 1..={count}")]
    DieOutOfRange { index: usize, count: usize },

    #[error("die value {value} is out of range 1..={sides}")]
    DieValueOutOfRange { value: u32, sides: u32 },

    #[error("expected {expected} die values, got {actual}")]
    DiceCountMismatch { expected: usize, actual: usize },

    #[error("board size must be positive")]
    InvalidBoardSize,

    #[error("unknown tile action type `{0}`")]
    UnknownActionType(String),

    #[error("tile action `{kind}` requires {expected}")]
    MissingParameter { kind: String, expected: &'static str },

    #[error("tile {0} not found")]
    TileNotFound(TileId),

    #[error("tile {0} already exists")]
    DuplicateTile(TileId),

    #[error("tile {from} references missing tile {to}")]
    DanglingReference { from: TileId, to: TileId },

    #[error("board chain is broken: {0}")]
    BrokenChain(String),

    #[error("tiles {from} and {to} share a position, no direction can be derived")]
    SamePosition { from: TileId, to: TileId },

    #[error("tile {tile} already has a connection heading {direction}")]
    DirectionTaken { tile: TileId, direction: Direction },

    #[error("starting city {0} cannot hold a token")]
    TokenOnStartingCity(TileId),

    #[error("travel board has no starting city")]
    NoStartingCity,

    #[error("no city is eligible to hold a token")]
    NoTokenSites,

    #[error("rules are for {rules} but the board is for {board}")]
    GameTypeMismatch { rules: GameType, board: GameType },

    #[error("unknown board variant `{variant}` for {game_type}")]
    UnknownVariant { game_type: GameType, variant: String },

    #[error("player setup rejected: {0}")]
    PlayerSetup(#[from] Rejection),

    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] bincode::Error),
}

/// A gameplay request the engine refused.
///
/// Rejections never abort a session; the turn simply does not advance.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum Rejection {
    #[error("cannot start without players")]
    NoPlayers,

    #[error("the game has already started")]
    AlreadyStarted,

    #[error("the game is not in progress ({state})")]
    NotInProgress { state: GameState },

    #[error("this action is not available in {0}")]
    WrongGameType(GameType),

    #[error("no more than {max} players can join")]
    TooManyPlayers { max: usize },

    #[error("invalid roll: {reason}")]
    InvalidRoll { reason: String },

    #[error("there is no route heading {direction} from {city}")]
    NoRoute { city: String, direction: Direction },

    #[error("need at least {needed} coins to travel from {city} (have {available})")]
    InsufficientFunds {
        city: String,
        needed: i64,
        available: i64,
    },

    #[error("need at least {needed} coins to open the token in {city} (have {available})")]
    CannotAffordToken {
        city: String,
        needed: i64,
        available: i64,
    },

    #[error("there is no token waiting to be opened")]
    NoPendingToken,

    #[error("the token in {city} must be resolved first")]
    TokenDecisionPending { city: String },

    #[error("opening tokens with the dice is disabled")]
    DiceRevealDisabled,

    #[error("the dice were already rolled for this token")]
    AlreadyRolled,

    #[error("reveal threshold {threshold} exceeds the maximum roll {max_roll}")]
    UnreachableThreshold { threshold: u32, max_roll: u32 },

    #[error("cannot pass while a route from {city} is affordable")]
    RouteAffordable { city: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_explains_why() {
        let rejection = Rejection::InsufficientFunds {
            city: "Cairo".to_string(),
            needed: 50,
            available: 40,
        };
        assert_eq!(
            rejection.to_string(),
            "need at least 50 coins to travel from Cairo (have 40)"
        );
        assert_eq!(Rejection::NoPlayers.to_string(), "cannot start without players");
    }

    #[test]
    fn test_game_error_display() {
        let err = GameError::InvalidDice { count: 0, sides: 6 };
        assert_eq!(err.to_string(), "invalid dice configuration: 0 dice with 6 sides");

        let err = GameError::UnknownActionType("Trampoline".to_string());
        assert_eq!(err.to_string(), "unknown tile action type `Trampoline`");
    }

    #[test]
    fn test_rejection_serde() {
        let rejection = Rejection::NoRoute {
            city: "Tunis".to_string(),
            direction: Direction::South,
        };
        let json = serde_json::to_string(&rejection).unwrap();
        let back: Rejection = serde_json::from_str(&json).unwrap();
        assert_eq!(rejection, back);
    }
}
