//! Lost Diamond: the Africa map.
//!
//! Twelve cities, two of them starting cities. Routes are one-way and
//! listed in both directions; a few cost more one way than the other.

use crate::board::Direction::{
    East, North, NorthEast, NorthWest, South, SouthEast, SouthWest, West,
};
use crate::board::{Board, Coord, Direction, TileId};
use crate::core::GameError;

pub const CAIRO: TileId = TileId::new(1);
pub const TANGIER: TileId = TileId::new(2);
pub const TUNIS: TileId = TileId::new(3);
pub const TRIPOLI: TileId = TileId::new(4);
pub const DAKAR: TileId = TileId::new(5);
pub const TIMBUKTU: TileId = TileId::new(6);
pub const KHARTOUM: TileId = TileId::new(7);
pub const LAGOS: TileId = TileId::new(8);
pub const ADDIS_ABABA: TileId = TileId::new(9);
pub const KINSHASA: TileId = TileId::new(10);
pub const NAIROBI: TileId = TileId::new(11);
pub const CAPE_TOWN: TileId = TileId::new(12);

const CITIES: [(TileId, &str, Coord, bool); 12] = [
    (CAIRO, "Cairo", Coord::new(9, 1), true),
    (TANGIER, "Tangier", Coord::new(2, 0), true),
    (TUNIS, "Tunis", Coord::new(5, 0), false),
    (TRIPOLI, "Tripoli", Coord::new(7, 2), false),
    (DAKAR, "Dakar", Coord::new(0, 4), false),
    (TIMBUKTU, "Timbuktu", Coord::new(3, 4), false),
    (KHARTOUM, "Khartoum", Coord::new(9, 4), false),
    (LAGOS, "Lagos", Coord::new(5, 6), false),
    (ADDIS_ABABA, "Addis Ababa", Coord::new(12, 7), false),
    (KINSHASA, "Kinshasa", Coord::new(6, 9), false),
    (NAIROBI, "Nairobi", Coord::new(10, 9), false),
    (CAPE_TOWN, "Cape Town", Coord::new(7, 13), false),
];

const ROUTES: [(TileId, Direction, TileId, u32); 40] = [
    (CAIRO, West, TUNIS, 50),
    (CAIRO, SouthWest, TRIPOLI, 30),
    (CAIRO, South, KHARTOUM, 60),
    (TANGIER, East, TUNIS, 40),
    (TANGIER, SouthWest, DAKAR, 60),
    (TANGIER, South, TIMBUKTU, 70),
    (TUNIS, East, CAIRO, 50),
    (TUNIS, West, TANGIER, 40),
    (TUNIS, SouthEast, TRIPOLI, 20),
    (TUNIS, SouthWest, TIMBUKTU, 70),
    (TRIPOLI, NorthEast, CAIRO, 30),
    (TRIPOLI, NorthWest, TUNIS, 20),
    (TRIPOLI, SouthWest, LAGOS, 80),
    (TRIPOLI, SouthEast, KHARTOUM, 40),
    (DAKAR, NorthEast, TANGIER, 60),
    (DAKAR, East, TIMBUKTU, 30),
    (TIMBUKTU, North, TANGIER, 70),
    (TIMBUKTU, NorthEast, TUNIS, 70),
    (TIMBUKTU, West, DAKAR, 30),
    (TIMBUKTU, SouthEast, LAGOS, 40),
    (KHARTOUM, North, CAIRO, 55),
    (KHARTOUM, NorthWest, TRIPOLI, 40),
    (KHARTOUM, SouthEast, ADDIS_ABABA, 30),
    (KHARTOUM, SouthWest, KINSHASA, 90),
    (KHARTOUM, South, NAIROBI, 70),
    (LAGOS, NorthWest, TIMBUKTU, 40),
    (LAGOS, NorthEast, TRIPOLI, 80),
    (LAGOS, South, KINSHASA, 50),
    (ADDIS_ABABA, NorthWest, KHARTOUM, 30),
    (ADDIS_ABABA, SouthWest, NAIROBI, 40),
    (KINSHASA, North, LAGOS, 50),
    (KINSHASA, NorthEast, KHARTOUM, 90),
    (KINSHASA, East, NAIROBI, 60),
    (KINSHASA, South, CAPE_TOWN, 100),
    (NAIROBI, North, KHARTOUM, 70),
    (NAIROBI, NorthEast, ADDIS_ABABA, 40),
    (NAIROBI, West, KINSHASA, 60),
    (NAIROBI, SouthWest, CAPE_TOWN, 90),
    (CAPE_TOWN, North, KINSHASA, 80),
    (CAPE_TOWN, NorthEast, NAIROBI, 90),
];

/// The Africa map, without tokens.
pub fn africa() -> Result<Board, GameError> {
    let mut board = Board::travel(14, 13);
    for (id, name, coord, starting) in CITIES {
        board.add_city(id, name, coord, starting)?;
    }
    for (from, direction, to, cost) in ROUTES {
        board.connect(from, direction, to, cost)?;
    }
    Ok(board)
}
