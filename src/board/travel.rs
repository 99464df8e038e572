//! Travel-graph primitives for Lost Diamond: compass directions, weighted
//! routes and the hidden tokens scattered over the cities.

use serde::{Deserialize, Serialize};

use super::tile::{Coord, TileId};
use crate::effects::TileAction;

/// Compass direction of a route leaving a city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Label the heading from one position to another.
    ///
    /// A route counts as straight when one axis is more than twice the
    /// other; anything in between is diagonal. Returns `None` for equal
    /// positions.
    ///
    /// ```
    /// use board_engine::board::{Coord, Direction};
    ///
    /// let cairo = Coord::new(9, 1);
    /// assert_eq!(Direction::between(cairo, Coord::new(2, 1)), Some(Direction::West));
    /// assert_eq!(Direction::between(cairo, Coord::new(10, 4)), Some(Direction::South));
    /// assert_eq!(Direction::between(cairo, Coord::new(6, 4)), Some(Direction::SouthWest));
    /// ```
    #[must_use]
    pub fn between(from: Coord, to: Coord) -> Option<Direction> {
        let dx = i64::from(to.x) - i64::from(from.x);
        let dy = i64::from(to.y) - i64::from(from.y);
        if dx == 0 && dy == 0 {
            return None;
        }

        let (ax, ay) = (dx.abs(), dy.abs());
        let direction = if ax > 2 * ay {
            if dx > 0 { Direction::East } else { Direction::West }
        } else if ay > 2 * ax {
            if dy < 0 { Direction::North } else { Direction::South }
        } else {
            match (dx > 0, dy < 0) {
                (true, true) => Direction::NorthEast,
                (true, false) => Direction::SouthEast,
                (false, true) => Direction::NorthWest,
                (false, false) => Direction::SouthWest,
            }
        };
        Some(direction)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::NorthEast => "north-east",
            Direction::East => "east",
            Direction::SouthEast => "south-east",
            Direction::South => "south",
            Direction::SouthWest => "south-west",
            Direction::West => "west",
            Direction::NorthWest => "north-west",
        };
        f.write_str(name)
    }
}

/// A directed, weighted route to another city.
///
/// The reverse route is a separate connection and may cost a different amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub to: TileId,
    pub cost: u32,
}

impl Connection {
    #[must_use]
    pub const fn new(to: TileId, cost: u32) -> Self {
        Self { to, cost }
    }
}

/// A hidden token lying face down on a city.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// The lost diamond. Exactly one per board.
    Diamond,
    /// A gem worth `value` coins.
    Treasure { value: i64 },
    /// Takes all money and the diamond.
    Thief,
    /// Nothing under the token.
    Empty,
}

impl Token {
    /// The effect of opening this token, if any.
    #[must_use]
    pub fn action(self) -> Option<TileAction> {
        match self {
            Token::Diamond => Some(TileAction::Diamond),
            Token::Treasure { value } => Some(TileAction::Treasure { value }),
            Token::Thief => Some(TileAction::Thief),
            Token::Empty => None,
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Diamond => f.write_str("diamond"),
            Token::Treasure { value } => write!(f, "treasure worth {}", value),
            Token::Thief => f.write_str("thief"),
            Token::Empty => f.write_str("nothing"),
        }
    }
}

/// Weighted pool the non-diamond tokens are drawn from.
pub const TOKEN_POOL: [(Token, f32); 5] = [
    (Token::Treasure { value: 1000 }, 1.0),
    (Token::Treasure { value: 600 }, 2.0),
    (Token::Treasure { value: 300 }, 3.0),
    (Token::Thief, 2.0),
    (Token::Empty, 4.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_round_trips() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_between_straight_and_diagonal() {
        let origin = Coord::new(0, 0);
        assert_eq!(Direction::between(origin, Coord::new(0, -5)), Some(Direction::North));
        assert_eq!(Direction::between(origin, Coord::new(5, 1)), Some(Direction::East));
        assert_eq!(Direction::between(origin, Coord::new(-4, 4)), Some(Direction::SouthWest));
        assert_eq!(Direction::between(origin, Coord::new(3, -2)), Some(Direction::NorthEast));
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn test_token_actions() {
        assert_eq!(Token::Diamond.action(), Some(TileAction::Diamond));
        assert_eq!(Token::Thief.action(), Some(TileAction::Thief));
        assert_eq!(
            Token::Treasure { value: 300 }.action(),
            Some(TileAction::Treasure { value: 300 })
        );
        assert_eq!(Token::Empty.action(), None);
    }

    #[test]
    fn test_pool_has_no_diamond() {
        assert!(TOKEN_POOL.iter().all(|(token, _)| *token != Token::Diamond));
    }
}
