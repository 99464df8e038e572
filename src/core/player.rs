//! Player identification and per-player state.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players.
//!
//! ## Player
//!
//! Mutable per-participant state: position, turn flags and, for the
//! travel game, money and diamond possession.

use serde::{Deserialize, Serialize};

use crate::board::TileId;

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based and follow join order: the first player to
/// join is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Maximum number of players in one game.
    pub const MAX_PLAYERS: usize = 255;

    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// A participant and everything the engine tracks about them.
///
/// The position is only settable from inside the crate so it always names
/// a tile of the board the player was bound to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,

    /// Display name.
    pub name: String,

    /// Token or piece identifier (colour, figurine...).
    pub token: String,

    tile: TileId,

    /// Starting-area tile this player's piece returns to when captured.
    home: TileId,

    /// Skip the next turn. Consumed at the start of that turn.
    pub missing_turn: bool,

    /// Roll again after this turn.
    pub extra_throw: bool,

    /// Ludo: piece is still waiting in its starting area.
    pub in_starting_area: bool,

    /// Ludo: piece reached the goal through a Win tile.
    pub reached_goal: bool,

    /// Lost Diamond: coins in hand.
    pub money: i64,

    /// Lost Diamond: holds the diamond.
    pub has_diamond: bool,
}

impl Player {
    /// Create a player standing on `tile`.
    pub fn new(id: PlayerId, name: impl Into<String>, token: impl Into<String>, tile: TileId) -> Self {
        Self {
            id,
            name: name.into(),
            token: token.into(),
            tile,
            home: tile,
            missing_turn: false,
            extra_throw: false,
            in_starting_area: false,
            reached_goal: false,
            money: 0,
            has_diamond: false,
        }
    }

    /// This player's id.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The tile the player currently stands on.
    #[must_use]
    pub fn tile(&self) -> TileId {
        self.tile
    }

    /// The player's starting-area tile.
    #[must_use]
    pub fn home(&self) -> TileId {
        self.home
    }

    pub(crate) fn place(&mut self, tile: TileId) {
        self.tile = tile;
    }

    pub(crate) fn set_home(&mut self, tile: TileId) {
        self.home = tile;
    }

    /// Send the piece back to its starting area.
    pub(crate) fn return_home(&mut self) {
        self.tile = self.home;
        self.in_starting_area = true;
    }

    /// Whether the player can pay `amount`.
    #[must_use]
    pub fn can_afford(&self, amount: i64) -> bool {
        self.money >= amount
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.token)
    }
}
