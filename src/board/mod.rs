//! Board graph: tiles, linear chains and the Lost Diamond travel map.

#[allow(clippy::module_inception)]
mod board;
pub mod tile;
pub mod travel;

pub use board::{Board, BoardDocument, LINEAR_COLUMNS};
pub use tile::{Coord, Tile, TileId};
pub use travel::{Connection, Direction, Token, TOKEN_POOL};
