//! Serializable game state.
//!
//! A [`GameSnapshot`] captures everything needed to continue a session:
//! board (including unopened tokens), rules, players, turn pointer and both
//! random streams. Subscribers are not part of it.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::board_game::BoardGame;
use super::GameState;
use crate::board::{Board, TileId};
use crate::core::{Dice, DiceState, GameError, GameRng, GameRngState, Player, PlayerId};
use crate::events::EventBus;
use crate::rules::GameRules;

/// One resolved roll or travel move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub player: PlayerId,
    /// Dice total; `None` for a travel move.
    pub roll: Option<u32>,
    pub from: TileId,
    pub to: TileId,
}

/// A hidden token awaiting the current player's decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingToken {
    pub tile: TileId,
    /// The free dice attempt has been used.
    pub rolled: bool,
}

/// Complete state of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub rules: GameRules,
    pub dice: DiceState,
    pub players: Vec<Player>,
    pub current: usize,
    pub state: GameState,
    pub winner: Option<PlayerId>,
    pub rng: GameRngState,
    pub consecutive_max: u32,
    pub turn_number: u32,
    pub history: Vector<TurnRecord>,
    pub pending: Option<PendingToken>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, GameError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl BoardGame {
    /// Capture the session.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            rules: self.rules.clone(),
            dice: self.dice.state(),
            players: self.players.clone(),
            current: self.current,
            state: self.state,
            winner: self.winner,
            rng: self.rng.state(),
            consecutive_max: self.consecutive_max,
            turn_number: self.turn_number,
            history: self.history.clone(),
            pending: self.pending,
        }
    }

    /// Rebuild a session from a snapshot, with no subscribers.
    ///
    /// The restored game rolls exactly what the original would have.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, GameError> {
        if snapshot.rules.game_type != snapshot.board.game_type() {
            return Err(GameError::GameTypeMismatch {
                rules: snapshot.rules.game_type,
                board: snapshot.board.game_type(),
            });
        }
        snapshot.board.validate()?;
        for player in &snapshot.players {
            for tile in [player.tile(), player.home()] {
                if !snapshot.board.contains(tile) {
                    return Err(GameError::TileNotFound(tile));
                }
            }
        }
        let start = snapshot
            .board
            .first_tile_id()
            .ok_or(GameError::InvalidBoardSize)?;
        let current = if snapshot.players.is_empty() {
            0
        } else {
            snapshot.current % snapshot.players.len()
        };

        Ok(Self {
            dice: Dice::from_state(&snapshot.dice)?,
            board: snapshot.board,
            rules: snapshot.rules,
            players: snapshot.players,
            current,
            state: snapshot.state,
            winner: snapshot.winner,
            rng: GameRng::from_state(&snapshot.rng),
            events: EventBus::new(),
            consecutive_max: snapshot.consecutive_max,
            turn_number: snapshot.turn_number,
            history: snapshot.history,
            pending: snapshot.pending,
            start,
        })
    }
}
