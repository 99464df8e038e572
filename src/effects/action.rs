//! Tile action definitions.
//!
//! A tile action is what happens to a piece that ends its move on the tile.
//! The set is closed: every behaviour the three game families need is one
//! variant here, dispatched by [`ActionResolver`](super::ActionResolver).

use serde::{Deserialize, Serialize};

use super::resolver::{ActionContext, ActionResolver, ResolveResult};
use crate::board::TileId;
use crate::core::{GameError, PlayerId};

/// Default number of tiles skipped at the start of the track by a random teleport.
pub const DEFAULT_TELEPORT_MARGIN_START: usize = 1;

/// Default number of tiles kept clear before the goal by a random teleport.
pub const DEFAULT_TELEPORT_MARGIN_END: usize = 6;

/// An effect attached to a tile.
///
/// ## Movement
///
/// - `Ladder` / `Snake`: jump to a fixed tile
/// - `RandomTeleport`: jump to a random tile of the track
/// - `Swap`: trade places with a random opponent
/// - `GoToStart` / `GoToJail`: jump back
///
/// ## Turn flow
///
/// - `ExtraThrow`, `MissingTurn`
///
/// ## Ludo
///
/// - `Capture`, `Win`, `StartingArea`
///
/// ## Lost Diamond
///
/// - `Treasure`, `Thief`, `Diamond`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileAction {
    Ladder { destination: TileId },

    Snake { destination: TileId },

    /// Jump to a uniformly chosen tile, never within `margin_start` tiles of
    /// the start or `margin_end` tiles of the goal.
    RandomTeleport {
        margin_start: usize,
        margin_end: usize,
    },

    Swap,

    ExtraThrow,

    MissingTurn,

    GoToStart,

    /// Jump to `jail` and miss the next turn.
    GoToJail { jail: TileId },

    /// Send every opponent on this tile back to their starting area.
    Capture,

    /// Mark the player as having reached the goal.
    Win,

    /// Return the player to their starting area.
    StartingArea,

    Treasure { value: i64 },

    /// Take all of the player's money and the diamond.
    Thief,

    Diamond,
}

impl TileAction {
    // === Convenience constructors ===

    #[must_use]
    pub const fn ladder(destination: TileId) -> Self {
        TileAction::Ladder { destination }
    }

    #[must_use]
    pub const fn snake(destination: TileId) -> Self {
        TileAction::Snake { destination }
    }

    #[must_use]
    pub const fn random_teleport() -> Self {
        TileAction::RandomTeleport {
            margin_start: DEFAULT_TELEPORT_MARGIN_START,
            margin_end: DEFAULT_TELEPORT_MARGIN_END,
        }
    }

    /// A random teleport keeping `margin_start` tiles clear at the start of
    /// the chain and `margin_end` clear at its end.
    #[must_use]
    pub const fn random_teleport_within(margin_start: usize, margin_end: usize) -> Self {
        TileAction::RandomTeleport {
            margin_start,
            margin_end,
        }
    }

    #[must_use]
    pub const fn go_to_jail(jail: TileId) -> Self {
        TileAction::GoToJail { jail }
    }

    #[must_use]
    pub const fn treasure(value: i64) -> Self {
        TileAction::Treasure { value }
    }

    /// Build an action from a type name and an optional numeric parameter.
    ///
    /// Names are matched ignoring case, spaces, `_` and `-`, so
    /// `"Go To Jail"`, `"go_to_jail"` and `"GOTOJAIL"` are the same action.
    /// The parameter is the destination for ladders, snakes and jails, the
    /// coin value for treasure, and the start margin for random teleports.
    /// A teleport parsed here keeps the default end margin; set both margins
    /// with [`random_teleport_within`](Self::random_teleport_within) or in
    /// the board document.
    ///
    /// ```
    /// use board_engine::board::TileId;
    /// use board_engine::effects::TileAction;
    ///
    /// let ladder = TileAction::parse("Ladder", Some(14)).unwrap();
    /// assert_eq!(ladder, TileAction::ladder(TileId::new(14)));
    ///
    /// assert!(TileAction::parse("Trampoline", None).is_err());
    /// assert!(TileAction::parse("snake", None).is_err());
    /// ```
    pub fn parse(kind: &str, param: Option<i64>) -> Result<Self, GameError> {
        let normalized: String = kind
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        let tile_param = |expected| {
            param
                .and_then(|value| u32::try_from(value).ok())
                .map(TileId::new)
                .ok_or_else(|| GameError::MissingParameter {
                    kind: kind.to_string(),
                    expected,
                })
        };

        let action = match normalized.as_str() {
            "ladder" => TileAction::Ladder {
                destination: tile_param("a destination tile")?,
            },
            "snake" => TileAction::Snake {
                destination: tile_param("a destination tile")?,
            },
            "randomteleport" | "teleport" => TileAction::RandomTeleport {
                margin_start: param
                    .and_then(|value| usize::try_from(value).ok())
                    .unwrap_or(DEFAULT_TELEPORT_MARGIN_START),
                margin_end: DEFAULT_TELEPORT_MARGIN_END,
            },
            "swap" => TileAction::Swap,
            "extrathrow" | "extraturn" => TileAction::ExtraThrow,
            "missingturn" | "skipturn" => TileAction::MissingTurn,
            "gotostart" | "start" => TileAction::GoToStart,
            "gotojail" | "jail" => TileAction::GoToJail {
                jail: tile_param("a jail tile")?,
            },
            "capture" => TileAction::Capture,
            "win" | "goal" => TileAction::Win,
            "startingarea" => TileAction::StartingArea,
            "treasure" => TileAction::Treasure {
                value: param.ok_or_else(|| GameError::MissingParameter {
                    kind: kind.to_string(),
                    expected: "a coin value",
                })?,
            },
            "thief" => TileAction::Thief,
            "diamond" => TileAction::Diamond,
            _ => return Err(GameError::UnknownActionType(kind.to_string())),
        };
        Ok(action)
    }

    /// Stable type name, accepted back by [`parse`](Self::parse).
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TileAction::Ladder { .. } => "Ladder",
            TileAction::Snake { .. } => "Snake",
            TileAction::RandomTeleport { .. } => "RandomTeleport",
            TileAction::Swap => "Swap",
            TileAction::ExtraThrow => "ExtraThrow",
            TileAction::MissingTurn => "MissingTurn",
            TileAction::GoToStart => "GoToStart",
            TileAction::GoToJail { .. } => "GoToJail",
            TileAction::Capture => "Capture",
            TileAction::Win => "Win",
            TileAction::StartingArea => "StartingArea",
            TileAction::Treasure { .. } => "Treasure",
            TileAction::Thief => "Thief",
            TileAction::Diamond => "Diamond",
        }
    }

    /// Human-readable description for logs.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            TileAction::Ladder { destination } => format!("climb a ladder to {}", destination),
            TileAction::Snake { destination } => format!("slide down a snake to {}", destination),
            TileAction::RandomTeleport { .. } => "teleport to a random tile".to_string(),
            TileAction::Swap => "swap places with a random opponent".to_string(),
            TileAction::ExtraThrow => "throw again".to_string(),
            TileAction::MissingTurn => "miss the next turn".to_string(),
            TileAction::GoToStart => "go back to the start".to_string(),
            TileAction::GoToJail { jail } => format!("go to jail at {} and miss a turn", jail),
            TileAction::Capture => "capture opponents on this tile".to_string(),
            TileAction::Win => "reach the goal".to_string(),
            TileAction::StartingArea => "return to the starting area".to_string(),
            TileAction::Treasure { value } => format!("collect {} coins", value),
            TileAction::Thief => "lose all money and the diamond".to_string(),
            TileAction::Diamond => "find the lost diamond".to_string(),
        }
    }

    /// The fixed tile this action sends a piece to, if any.
    #[must_use]
    pub fn destination(&self) -> Option<TileId> {
        match self {
            TileAction::Ladder { destination } | TileAction::Snake { destination } => {
                Some(*destination)
            }
            TileAction::GoToJail { jail } => Some(*jail),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_ladder(&self) -> bool {
        matches!(self, TileAction::Ladder { .. })
    }

    #[must_use]
    pub fn is_snake(&self) -> bool {
        matches!(self, TileAction::Snake { .. })
    }

    /// Apply the action to `actor`.
    pub fn perform(&self, actor: PlayerId, ctx: &mut ActionContext<'_>) -> ResolveResult {
        ActionResolver::perform(self, actor, ctx)
    }
}

impl std::fmt::Display for TileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_names() {
        for name in ["GoToJail", "go_to_jail", "Go To Jail", "go-to-jail", "JAIL"] {
            assert_eq!(
                TileAction::parse(name, Some(30)).unwrap(),
                TileAction::go_to_jail(TileId::new(30))
            );
        }
        assert_eq!(TileAction::parse("extra_throw", None).unwrap(), TileAction::ExtraThrow);
    }

    #[test]
    fn test_parse_unknown_is_error() {
        let err = TileAction::parse("Trampoline", None).unwrap_err();
        assert!(matches!(err, GameError::UnknownActionType(name) if name == "Trampoline"));
    }

    #[test]
    fn test_parse_requires_parameters() {
        assert!(matches!(
            TileAction::parse("Ladder", None),
            Err(GameError::MissingParameter { .. })
        ));
        assert!(matches!(
            TileAction::parse("Snake", Some(-3)),
            Err(GameError::MissingParameter { .. })
        ));
        assert!(matches!(
            TileAction::parse("Treasure", None),
            Err(GameError::MissingParameter { .. })
        ));
    }

    #[test]
    fn test_parse_teleport_margins() {
        assert_eq!(TileAction::parse("RandomTeleport", None).unwrap(), TileAction::random_teleport());
        assert_eq!(
            TileAction::parse("teleport", Some(3)).unwrap(),
            TileAction::RandomTeleport {
                margin_start: 3,
                margin_end: DEFAULT_TELEPORT_MARGIN_END,
            }
        );

        let action = TileAction::random_teleport_within(2, 4);
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"RandomTeleport":{"margin_start":2,"margin_end":4}}"#);
        assert_eq!(serde_json::from_str::<TileAction>(&json).unwrap(), action);
    }

    #[test]
    fn test_kind_round_trips_through_parse() {
        let actions = [
            TileAction::ladder(TileId::new(9)),
            TileAction::snake(TileId::new(2)),
            TileAction::Swap,
            TileAction::MissingTurn,
            TileAction::GoToStart,
            TileAction::Capture,
            TileAction::Win,
            TileAction::StartingArea,
            TileAction::treasure(600),
            TileAction::Thief,
            TileAction::Diamond,
        ];
        for action in actions {
            let param = match &action {
                TileAction::Ladder { destination } | TileAction::Snake { destination } => {
                    Some(i64::from(destination.raw()))
                }
                TileAction::Treasure { value } => Some(*value),
                _ => None,
            };
            assert_eq!(TileAction::parse(action.kind(), param).unwrap(), action);
        }
    }

    #[test]
    fn test_description_and_destination() {
        let ladder = TileAction::ladder(TileId::new(14));
        assert_eq!(ladder.description(), "climb a ladder to #14");
        assert_eq!(ladder.destination(), Some(TileId::new(14)));
        assert!(ladder.is_ladder());
        assert_eq!(TileAction::Thief.destination(), None);
    }
}
