//! Tiles: the addressable nodes of a board.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::travel::{Connection, Direction, Token};
use crate::effects::TileAction;

/// Stable tile identifier.
///
/// Linear boards number their tiles from 1 upward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout position of a tile.
///
/// `x` grows to the east and `y` grows to the south, like screen rows.
/// Only a presentation hint, except that travel boards derive compass
/// directions from it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A node on the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,

    pub coord: Coord,

    /// City name on travel boards.
    pub name: Option<String>,

    /// Effect applied when a turn ends on this tile.
    pub land_action: Option<TileAction>,

    /// Following tile on linear boards.
    pub next: Option<TileId>,

    /// Ludo: pieces here cannot be captured.
    pub safe_zone: bool,

    /// Ludo: the tile's land action is suppressed.
    pub disabled: bool,

    /// Lost Diamond: players start here and must return here with the diamond.
    pub starting_city: bool,

    /// Lost Diamond: outgoing routes keyed by compass direction.
    pub connections: BTreeMap<Direction, Connection>,

    /// Lost Diamond: hidden token waiting to be opened.
    pub token: Option<Token>,

    /// Lost Diamond: coins needed to open the token.
    pub token_price: i64,
}

impl Tile {
    /// Create a plain tile.
    pub fn new(id: TileId, coord: Coord) -> Self {
        Self {
            id,
            coord,
            name: None,
            land_action: None,
            next: None,
            safe_zone: false,
            disabled: false,
            starting_city: false,
            connections: BTreeMap::new(),
            token: None,
            token_price: 0,
        }
    }

    /// Create a named city tile for a travel board.
    pub fn city(id: TileId, name: impl Into<String>, coord: Coord) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(id, coord)
        }
    }

    /// Mark the tile as a starting city (builder pattern).
    #[must_use]
    pub fn starting(mut self) -> Self {
        self.starting_city = true;
        self
    }

    /// Attach a land action (builder pattern).
    #[must_use]
    pub fn with_action(mut self, action: TileAction) -> Self {
        self.land_action = Some(action);
        self
    }

    /// Name for messages: the city name, or the tile id.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("tile {}", self.id.0),
        }
    }

    /// Whether a hidden token is still waiting here.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// The land action, unless the tile is disabled.
    #[must_use]
    pub fn active_action(&self) -> Option<&TileAction> {
        if self.disabled {
            None
        } else {
            self.land_action.as_ref()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_id_display() {
        let id = TileId::new(12);
        assert_eq!(id.raw(), 12);
        assert_eq!(id.to_string(), "#12");
    }

    #[test]
    fn test_display_name() {
        let plain = Tile::new(TileId::new(3), Coord::new(2, 0));
        assert_eq!(plain.display_name(), "tile 3");

        let city = Tile::city(TileId::new(1), "Cairo", Coord::new(9, 1)).starting();
        assert_eq!(city.display_name(), "Cairo");
        assert!(city.starting_city);
    }

    #[test]
    fn test_disabled_tile_suppresses_action() {
        let mut tile = Tile::new(TileId::new(5), Coord::default())
            .with_action(TileAction::ExtraThrow);
        assert_eq!(tile.active_action(), Some(&TileAction::ExtraThrow));

        tile.disabled = true;
        assert_eq!(tile.active_action(), None);
    }
}
