//! Snakes & Ladders boards.

use crate::board::{Board, TileId};
use crate::core::GameError;
use crate::effects::TileAction;
use crate::rules::GameType;

/// Tiles on the classic board.
pub const CLASSIC_SIZE: u32 = 100;

/// `(foot, top)` of every ladder on the classic board.
pub const LADDERS: [(u32, u32); 8] = [
    (4, 14),
    (9, 31),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (80, 100),
];

/// `(head, tail)` of every snake on the classic board.
pub const SNAKES: [(u32, u32); 10] = [
    (16, 6),
    (47, 26),
    (49, 11),
    (56, 53),
    (62, 19),
    (64, 60),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

/// Tile that `GoToJail` sends pieces to on the special board.
pub const JAIL: u32 = 30;

/// The classic 100-tile board.
pub fn classic() -> Result<Board, GameError> {
    let mut board = Board::linear(GameType::SnakesAndLadders, CLASSIC_SIZE)?;
    for (foot, top) in LADDERS {
        board.set_action(TileId::new(foot), TileAction::ladder(TileId::new(top)))?;
    }
    for (head, tail) in SNAKES {
        board.set_action(TileId::new(head), TileAction::snake(TileId::new(tail)))?;
    }
    Ok(board)
}

/// The classic board plus a handful of special tiles.
pub fn special() -> Result<Board, GameError> {
    let mut board = classic()?;
    let specials = [
        (33, TileAction::random_teleport()),
        (45, TileAction::Swap),
        (58, TileAction::ExtraThrow),
        (69, TileAction::MissingTurn),
        (77, TileAction::go_to_jail(TileId::new(JAIL))),
        (89, TileAction::GoToStart),
    ];
    for (tile, action) in specials {
        board.set_action(TileId::new(tile), action)?;
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_layout() {
        let board = classic().unwrap();
        board.validate().unwrap();
        assert_eq!(board.len(), 100);

        let actions = board.tiles().filter(|t| t.land_action.is_some()).count();
        assert_eq!(actions, LADDERS.len() + SNAKES.len());
        assert_eq!(
            board.tile(TileId::new(28)).unwrap().land_action,
            Some(TileAction::ladder(TileId::new(84)))
        );
        assert_eq!(
            board.tile(TileId::new(98)).unwrap().land_action,
            Some(TileAction::snake(TileId::new(78)))
        );
    }

    #[test]
    fn test_ladders_climb_and_snakes_slide() {
        for (foot, top) in LADDERS {
            assert!(top > foot);
        }
        for (head, tail) in SNAKES {
            assert!(tail < head);
        }
    }

    #[test]
    fn test_special_adds_tiles() {
        let board = special().unwrap();
        board.validate().unwrap();
        assert_eq!(board.tile(TileId::new(45)).unwrap().land_action, Some(TileAction::Swap));
        assert_eq!(
            board.tiles().filter(|t| t.land_action.is_some()).count(),
            LADDERS.len() + SNAKES.len() + 6
        );
    }
}
