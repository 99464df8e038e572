//! Tile action system.
//!
//! - [`TileAction`]: the closed set of effects a tile can carry
//! - [`ActionResolver`]: applies an action to the game through an [`ActionContext`]
//!
//! Actions are plain data. They can be parsed from a type name, serialized
//! with the board, and compared in tests.

mod action;
mod resolver;

pub use action::{TileAction, DEFAULT_TELEPORT_MARGIN_END, DEFAULT_TELEPORT_MARGIN_START};
pub use resolver::{ActionContext, ActionResolver, ResolveResult};
