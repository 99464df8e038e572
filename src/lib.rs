//! # board-engine
//!
//! A turn-based engine for dice-and-board games. Three rule families share
//! one board/player/turn substrate:
//!
//! - **Snakes & Ladders**: race along a linear track of ladders and snakes
//! - **Ludo**: leave home on a six, capture opponents, reach the goal
//! - **Lost Diamond**: travel a city graph, buy hidden tokens, bring the
//!   diamond home
//!
//! ## Design Principles
//!
//! 1. **Configuration over subclassing**: game differences live in
//!    `GameRules` and in the tile actions on the `Board`, not in separate
//!    engine types.
//!
//! 2. **Closed effects**: tile actions are one enum dispatched by `match`.
//!    They reach the game only through an explicit `ActionContext`.
//!
//! 3. **Synchronous observers**: every event is delivered, in registration
//!    order, before the call that caused it returns.
//!
//! 4. **Deterministic**: one seed plus the same player choices replays the
//!    same game, and a snapshot continues it exactly.
//!
//! ## Modules
//!
//! - `core`: dice, players, RNG, errors
//! - `board`: tiles, linear chains, the travel graph
//! - `effects`: tile actions and their resolver
//! - `rules`: `GameRules` and the extension keys
//! - `events`: event vocabulary and the event bus
//! - `game`: the `BoardGame` orchestrator and snapshots
//! - `games`: preset boards and `GameBuilder`
//!
//! ## Example
//!
//! ```
//! use board_engine::{GameBuilder, GameRules, GameState};
//!
//! let mut game = GameBuilder::new(GameRules::snakes_and_ladders())
//!     .seed(42)
//!     .player("Ada", "red")
//!     .player("Grace", "blue")
//!     .start()
//!     .unwrap();
//!
//! while game.state() == GameState::Started {
//!     game.play_turn().unwrap();
//! }
//! assert!(game.winner().is_some());
//! ```

pub mod board;
pub mod core;
pub mod effects;
pub mod events;
pub mod game;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Dice, DiceState, GameError, GameRng, GameRngState, Player, PlayerId, Rejection, RollValues,
};

pub use crate::board::{Board, Connection, Coord, Direction, Tile, TileId, Token};

pub use crate::effects::{ActionContext, ActionResolver, ResolveResult, TileAction};

pub use crate::rules::{GameRules, GameType, RuleValue};

pub use crate::events::{EventBus, EventFamily, GameEvent, SubscriptionId};

pub use crate::game::{
    BoardGame, GameSnapshot, GameState, MoveReport, TokenOffer, TokenReveal, TokenRoll,
    TravelOption, TravelOutcome, TurnOutcome, TurnRecord,
};

pub use crate::games::{board_for, new_game, GameBuilder};
