//! Game events.
//!
//! Everything a presentation layer may want to react to is one of these.
//! Each event belongs to exactly one [`EventFamily`], and subscribers listen
//! per family.

use serde::{Deserialize, Serialize};

use crate::board::{TileId, Token};
use crate::core::{PlayerId, Rejection};
use crate::game::GameState;

/// Channel an event is published on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventFamily {
    /// Pieces changing tiles.
    Movement,
    /// Game state transitions and the winner.
    Lifecycle,
    /// Extra turns, skipped turns, forfeits.
    Turn,
    /// Pieces sent home.
    Capture,
    /// Tokens, money and the diamond.
    Treasure,
    /// Requests the engine refused.
    Rejection,
}

impl EventFamily {
    pub const ALL: [EventFamily; 6] = [
        EventFamily::Movement,
        EventFamily::Lifecycle,
        EventFamily::Turn,
        EventFamily::Capture,
        EventFamily::Treasure,
        EventFamily::Rejection,
    ];
}

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Movement ===
    /// A piece moved along the board by a dice roll or a chosen route.
    PlayerMoved {
        player: PlayerId,
        from: TileId,
        to: TileId,
        steps: u32,
    },

    /// A tile action moved a piece directly.
    PlayerTeleported {
        player: PlayerId,
        from: TileId,
        to: TileId,
    },

    /// Two pieces exchanged tiles.
    PlayersSwapped { player: PlayerId, other: PlayerId },

    // === Lifecycle ===
    GameStateChanged { state: GameState },

    GameWinner { player: PlayerId },

    // === Turn ===
    PlayerExtraTurn { player: PlayerId },

    /// The player will miss their next turn.
    PlayerSkipTurn { player: PlayerId },

    /// Too many maximum rolls in a row; the move is lost.
    TurnForfeited { player: PlayerId, consecutive: u32 },

    // === Capture ===
    PlayerCaptured { captor: PlayerId, victim: PlayerId },

    // === Treasure ===
    TokenRevealed {
        player: PlayerId,
        tile: TileId,
        token: Token,
    },

    DiamondFound { player: PlayerId, tile: TileId },

    MoneyChanged { player: PlayerId, money: i64 },

    // === Rejection ===
    ActionRejected {
        player: Option<PlayerId>,
        reason: Rejection,
    },
}

impl GameEvent {
    /// The channel this event is published on.
    #[must_use]
    pub fn family(&self) -> EventFamily {
        match self {
            GameEvent::PlayerMoved { .. }
            | GameEvent::PlayerTeleported { .. }
            | GameEvent::PlayersSwapped { .. } => EventFamily::Movement,
            GameEvent::GameStateChanged { .. } | GameEvent::GameWinner { .. } => {
                EventFamily::Lifecycle
            }
            GameEvent::PlayerExtraTurn { .. }
            | GameEvent::PlayerSkipTurn { .. }
            | GameEvent::TurnForfeited { .. } => EventFamily::Turn,
            GameEvent::PlayerCaptured { .. } => EventFamily::Capture,
            GameEvent::TokenRevealed { .. }
            | GameEvent::DiamondFound { .. }
            | GameEvent::MoneyChanged { .. } => EventFamily::Treasure,
            GameEvent::ActionRejected { .. } => EventFamily::Rejection,
        }
    }

    /// The player the event is mainly about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::PlayerMoved { player, .. }
            | GameEvent::PlayerTeleported { player, .. }
            | GameEvent::PlayersSwapped { player, .. }
            | GameEvent::GameWinner { player }
            | GameEvent::PlayerExtraTurn { player }
            | GameEvent::PlayerSkipTurn { player }
            | GameEvent::TurnForfeited { player, .. }
            | GameEvent::TokenRevealed { player, .. }
            | GameEvent::DiamondFound { player, .. }
            | GameEvent::MoneyChanged { player, .. } => Some(*player),
            GameEvent::PlayerCaptured { victim, .. } => Some(*victim),
            GameEvent::ActionRejected { player, .. } => *player,
            GameEvent::GameStateChanged { .. } => None,
        }
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameEvent::PlayerMoved {
                player,
                from,
                to,
                steps,
            } => write!(f, "{} moved {} steps from {} to {}", player, steps, from, to),
            GameEvent::PlayerTeleported { player, from, to } => {
                write!(f, "{} was moved from {} to {}", player, from, to)
            }
            GameEvent::PlayersSwapped { player, other } => {
                write!(f, "{} swapped places with {}", player, other)
            }
            GameEvent::GameStateChanged { state } => write!(f, "game is now {}", state),
            GameEvent::GameWinner { player } => write!(f, "{} wins", player),
            GameEvent::PlayerExtraTurn { player } => write!(f, "{} gets an extra turn", player),
            GameEvent::PlayerSkipTurn { player } => write!(f, "{} will miss a turn", player),
            GameEvent::TurnForfeited {
                player,
                consecutive,
            } => write!(f, "{} rolled the maximum {} times and forfeits", player, consecutive),
            GameEvent::PlayerCaptured { captor, victim } => {
                write!(f, "{} captured {}", captor, victim)
            }
            GameEvent::TokenRevealed {
                player,
                tile,
                token,
            } => write!(f, "{} revealed {} at {}", player, token, tile),
            GameEvent::DiamondFound { player, tile } => {
                write!(f, "{} found the diamond at {}", player, tile)
            }
            GameEvent::MoneyChanged { player, money } => {
                write!(f, "{} now has {} coins", player, money)
            }
            GameEvent::ActionRejected {
                player: Some(player),
                reason,
            } => write!(f, "{} was refused: {}", player, reason),
            GameEvent::ActionRejected {
                player: None,
                reason,
            } => write!(f, "refused: {}", reason),
        }
    }
}
