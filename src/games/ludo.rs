//! Ludo track.
//!
//! One shared track per game: the starting area on the first tile, the goal
//! on the last, safe squares at fixed positions and capture everywhere else.

use crate::board::{Board, TileId};
use crate::core::GameError;
use crate::effects::TileAction;
use crate::rules::GameType;

/// Tiles on the track, starting area and goal included.
pub const TRACK_SIZE: u32 = 57;

/// Squares where pieces cannot be captured.
pub const SAFE_TILES: [u32; 7] = [9, 14, 22, 27, 35, 40, 48];

pub fn track() -> Result<Board, GameError> {
    let mut board = Board::linear(GameType::Ludo, TRACK_SIZE)?;
    board.set_action(TileId::new(1), TileAction::StartingArea)?;
    for tile in 2..TRACK_SIZE {
        board.set_action(TileId::new(tile), TileAction::Capture)?;
    }
    board.set_action(TileId::new(TRACK_SIZE), TileAction::Win)?;
    for tile in SAFE_TILES {
        board.set_safe_zone(TileId::new(tile), true)?;
    }
    Ok(board)
}
