//! The board graph.
//!
//! Linear boards (Snakes & Ladders, Ludo) are a single `next` chain from the
//! lowest id to the highest. Travel boards (Lost Diamond) are a directed graph
//! of cities joined by compass-labelled, weighted routes.
//!
//! ## Example
//!
//! ```
//! use board_engine::board::{Board, TileId};
//! use board_engine::effects::TileAction;
//! use board_engine::rules::GameType;
//!
//! let mut board = Board::linear(GameType::SnakesAndLadders, 10).unwrap();
//! board
//!     .set_action(TileId::new(3), TileAction::ladder(TileId::new(7)))
//!     .unwrap();
//!
//! assert_eq!(board.len(), 10);
//! assert_eq!(board.advance(TileId::new(8), 5).unwrap(), TileId::new(10));
//! assert!(board.validate().is_ok());
//! ```

use std::collections::BTreeMap;

use log::debug;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::tile::{Coord, Tile, TileId};
use super::travel::{Connection, Direction, Token, TOKEN_POOL};
use crate::core::{GameError, GameRng};
use crate::effects::TileAction;
use crate::rules::{keys, GameRules, GameType};

/// Columns used when laying out a linear board.
pub const LINEAR_COLUMNS: u32 = 10;

/// Tiles keyed by id, plus the layout extent and the game family they serve.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardDocument", into = "BoardDocument")]
pub struct Board {
    game_type: GameType,
    rows: u32,
    columns: u32,
    tiles: BTreeMap<TileId, Tile>,
}

impl Board {
    /// Build a linear board of `size` tiles numbered `1..=size`.
    ///
    /// Tiles snake back and forth across rows of ten, starting bottom-left.
    pub fn linear(game_type: GameType, size: u32) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::InvalidBoardSize);
        }

        let columns = LINEAR_COLUMNS.min(size);
        let rows = size.div_ceil(columns);
        let mut tiles = BTreeMap::new();

        for number in 1..=size {
            let index = number - 1;
            let row = index / columns;
            let offset = index % columns;
            let column = if row % 2 == 0 { offset } else { columns - 1 - offset };
            let coord = Coord::new(column as i32, (rows - 1 - row) as i32);

            let mut tile = Tile::new(TileId::new(number), coord);
            if number < size {
                tile.next = Some(TileId::new(number + 1));
            }
            tiles.insert(tile.id, tile);
        }

        Ok(Self {
            game_type,
            rows,
            columns,
            tiles,
        })
    }

    /// Create an empty travel board. Cities and routes are added explicitly.
    #[must_use]
    pub fn travel(rows: u32, columns: u32) -> Self {
        Self {
            game_type: GameType::LostDiamond,
            rows,
            columns,
            tiles: BTreeMap::new(),
        }
    }

    // === Construction ===

    /// Add a tile. Fails if the id is taken.
    pub fn add_tile(&mut self, tile: Tile) -> Result<(), GameError> {
        if self.tiles.contains_key(&tile.id) {
            return Err(GameError::DuplicateTile(tile.id));
        }
        self.tiles.insert(tile.id, tile);
        Ok(())
    }

    /// Add a named city to a travel board.
    pub fn add_city(
        &mut self,
        id: TileId,
        name: impl Into<String>,
        coord: Coord,
        starting: bool,
    ) -> Result<(), GameError> {
        let mut city = Tile::city(id, name, coord);
        city.starting_city = starting;
        self.add_tile(city)
    }

    /// Add a one-way route leaving `from` in `direction`.
    ///
    /// Each direction can be used once per city. The reverse route must be
    /// added separately and may cost a different amount.
    pub fn connect(
        &mut self,
        from: TileId,
        direction: Direction,
        to: TileId,
        cost: u32,
    ) -> Result<(), GameError> {
        if !self.tiles.contains_key(&to) {
            return Err(GameError::TileNotFound(to));
        }
        let tile = self.tile_mut(from)?;
        if tile.connections.contains_key(&direction) {
            return Err(GameError::DirectionTaken {
                tile: from,
                direction,
            });
        }
        tile.connections.insert(direction, Connection::new(to, cost));
        Ok(())
    }

    /// Add a route whose direction is derived from the tile coordinates.
    pub fn connect_auto(&mut self, from: TileId, to: TileId, cost: u32) -> Result<Direction, GameError> {
        let origin = self.tile(from)?.coord;
        let target = self.tile(to)?.coord;
        let direction =
            Direction::between(origin, target).ok_or(GameError::SamePosition { from, to })?;
        self.connect(from, direction, to, cost)?;
        Ok(direction)
    }

    /// Attach a land action to a tile.
    ///
    /// Any tile the action points at must already exist.
    pub fn set_action(&mut self, id: TileId, action: TileAction) -> Result<(), GameError> {
        if let Some(target) = action.destination() {
            if !self.tiles.contains_key(&target) {
                return Err(GameError::DanglingReference { from: id, to: target });
            }
        }
        self.tile_mut(id)?.land_action = Some(action);
        Ok(())
    }

    /// Mark a tile as a safe zone.
    pub fn set_safe_zone(&mut self, id: TileId, safe: bool) -> Result<(), GameError> {
        self.tile_mut(id)?.safe_zone = safe;
        Ok(())
    }

    /// Enable or disable a tile's land action.
    pub fn set_disabled(&mut self, id: TileId, disabled: bool) -> Result<(), GameError> {
        self.tile_mut(id)?.disabled = disabled;
        Ok(())
    }

    // === Queries ===

    /// Look up a tile. Unknown ids are always an error.
    pub fn tile(&self, id: TileId) -> Result<&Tile, GameError> {
        self.tiles.get(&id).ok_or(GameError::TileNotFound(id))
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Result<&mut Tile, GameError> {
        self.tiles.get_mut(&id).ok_or(GameError::TileNotFound(id))
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    /// All tiles in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Lowest tile id, where linear games begin.
    #[must_use]
    pub fn first_tile_id(&self) -> Option<TileId> {
        self.tiles.keys().next().copied()
    }

    /// Highest tile id, the goal of linear games.
    #[must_use]
    pub fn max_tile_id(&self) -> Option<TileId> {
        self.tiles.keys().next_back().copied()
    }

    /// Tile ids in `next` order from the first tile.
    ///
    /// Stops at the end of the chain, at a missing tile, or before revisiting
    /// a tile.
    #[must_use]
    pub fn chain(&self) -> Vec<TileId> {
        let mut chain = Vec::with_capacity(self.tiles.len());
        let mut seen = FxHashSet::default();
        let mut cursor = self.first_tile_id();
        while let Some(id) = cursor {
            let Some(tile) = self.tiles.get(&id) else { break };
            if !seen.insert(id) {
                break;
            }
            chain.push(id);
            cursor = tile.next;
        }
        chain
    }

    /// Follow `next` links `steps` times, stopping early at the last tile.
    pub fn advance(&self, from: TileId, steps: u32) -> Result<TileId, GameError> {
        let mut current = self.tile(from)?;
        for _ in 0..steps {
            match current.next {
                Some(next) => current = self.tile(next)?,
                None => break,
            }
        }
        Ok(current.id)
    }

    /// Starting cities in id order.
    #[must_use]
    pub fn starting_cities(&self) -> Vec<TileId> {
        self.tiles
            .values()
            .filter(|tile| tile.starting_city)
            .map(|tile| tile.id)
            .collect()
    }

    /// Check every structural invariant.
    ///
    /// - the board is non-empty
    /// - every `next`, route and action target exists
    /// - no starting city holds a token
    /// - linear boards form one acyclic chain ending at the highest id
    /// - travel boards have at least one starting city
    pub fn validate(&self) -> Result<(), GameError> {
        if self.tiles.is_empty() {
            return Err(GameError::InvalidBoardSize);
        }

        for tile in self.tiles.values() {
            let targets = tile
                .next
                .into_iter()
                .chain(tile.connections.values().map(|c| c.to))
                .chain(tile.land_action.as_ref().and_then(TileAction::destination));
            for target in targets {
                if !self.tiles.contains_key(&target) {
                    return Err(GameError::DanglingReference {
                        from: tile.id,
                        to: target,
                    });
                }
            }
            if tile.starting_city && tile.token.is_some() {
                return Err(GameError::TokenOnStartingCity(tile.id));
            }
        }

        if self.game_type.is_linear() {
            self.validate_chain()
        } else if self.tiles.values().any(|tile| tile.starting_city) {
            Ok(())
        } else {
            Err(GameError::NoStartingCity)
        }
    }

    fn validate_chain(&self) -> Result<(), GameError> {
        let chain = self.chain();
        let last = chain.last().copied();
        if last != self.max_tile_id() {
            return Err(GameError::BrokenChain(format!(
                "chain stops at {} before reaching the last tile",
                last.map_or_else(|| "nothing".to_string(), |id| id.to_string())
            )));
        }
        if let Some(id) = last {
            if self.tile(id)?.next.is_some() {
                return Err(GameError::BrokenChain(format!("cycle through {}", id)));
            }
        }
        if chain.len() != self.tiles.len() {
            return Err(GameError::BrokenChain(format!(
                "{} of {} tiles are unreachable",
                self.tiles.len() - chain.len(),
                self.tiles.len()
            )));
        }
        Ok(())
    }

    // === Tokens ===

    /// Scatter hidden tokens over every non-starting city.
    ///
    /// Exactly one city receives the diamond; the rest draw from
    /// [`TOKEN_POOL`]. Each city's price is the `tokenPrice` rule plus a
    /// uniform jitter of up to `tokenPriceJitter` either way.
    pub fn distribute_tokens(&mut self, rng: &mut GameRng, rules: &GameRules) -> Result<(), GameError> {
        let sites: Vec<TileId> = self
            .tiles
            .values()
            .filter(|tile| !tile.starting_city)
            .map(|tile| tile.id)
            .collect();
        if sites.is_empty() {
            return Err(GameError::NoTokenSites);
        }

        let base = rules.get_int_additional(keys::TOKEN_PRICE, keys::DEFAULT_TOKEN_PRICE);
        let jitter = rules
            .get_int_additional(keys::TOKEN_PRICE_JITTER, keys::DEFAULT_TOKEN_PRICE_JITTER)
            .max(0);
        let weights: Vec<f32> = TOKEN_POOL.iter().map(|(_, weight)| *weight).collect();
        let diamond_site = sites[rng.gen_index(sites.len())];

        for id in sites {
            let token = if id == diamond_site {
                Token::Diamond
            } else {
                rng.choose_weighted(&weights)
                    .map_or(Token::Empty, |index| TOKEN_POOL[index].0)
            };
            let price = (base + rng.gen_between(-jitter, jitter)).max(0);

            let tile = self.tile_mut(id)?;
            tile.token = Some(token);
            tile.token_price = price;
        }

        debug!("distributed tokens, diamond hidden at {}", diamond_site);
        Ok(())
    }

    // === Documents ===

    /// Load and validate a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the board as JSON.
    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Serialized form of a [`Board`]: a flat tile list.
///
/// Converting back into a `Board` rejects duplicate ids and runs
/// [`Board::validate`], so a broken document never loads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoardDocument {
    pub game_type: GameType,
    pub rows: u32,
    pub columns: u32,
    pub tiles: Vec<Tile>,
}

impl TryFrom<BoardDocument> for Board {
    type Error = GameError;

    fn try_from(document: BoardDocument) -> Result<Self, Self::Error> {
        let mut board = Board {
            game_type: document.game_type,
            rows: document.rows,
            columns: document.columns,
            tiles: BTreeMap::new(),
        };
        for tile in document.tiles {
            board.add_tile(tile)?;
        }
        board.validate()?;
        Ok(board)
    }
}

impl From<Board> for BoardDocument {
    fn from(board: Board) -> Self {
        Self {
            game_type: board.game_type,
            rows: board.rows,
            columns: board.columns,
            tiles: board.tiles.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> Board {
        let mut board = Board::travel(4, 4);
        board.add_city(TileId::new(1), "Cairo", Coord::new(3, 0), true).unwrap();
        board.add_city(TileId::new(2), "Tunis", Coord::new(0, 0), false).unwrap();
        board.add_city(TileId::new(3), "Lagos", Coord::new(0, 3), false).unwrap();
        board.connect(TileId::new(1), Direction::West, TileId::new(2), 50).unwrap();
        board.connect(TileId::new(2), Direction::East, TileId::new(1), 40).unwrap();
        board.connect(TileId::new(2), Direction::South, TileId::new(3), 30).unwrap();
        board
    }

    #[test]
    fn test_linear_rejects_zero_size() {
        assert!(matches!(
            Board::linear(GameType::SnakesAndLadders, 0),
            Err(GameError::InvalidBoardSize)
        ));
    }

    #[test]
    fn test_linear_chain() {
        let board = Board::linear(GameType::SnakesAndLadders, 25).unwrap();
        assert_eq!(board.len(), 25);
        assert_eq!(board.rows(), 3);
        assert_eq!(board.first_tile_id(), Some(TileId::new(1)));
        assert_eq!(board.max_tile_id(), Some(TileId::new(25)));
        assert_eq!(board.chain().len(), 25);
        assert!(board.tile(TileId::new(25)).unwrap().next.is_none());
        board.validate().unwrap();
    }

    #[test]
    fn test_linear_layout_snakes_across_rows() {
        let board = Board::linear(GameType::SnakesAndLadders, 20).unwrap();
        assert_eq!(board.tile(TileId::new(1)).unwrap().coord, Coord::new(0, 1));
        assert_eq!(board.tile(TileId::new(10)).unwrap().coord, Coord::new(9, 1));
        assert_eq!(board.tile(TileId::new(11)).unwrap().coord, Coord::new(9, 0));
        assert_eq!(board.tile(TileId::new(20)).unwrap().coord, Coord::new(0, 0));
    }

    #[test]
    fn test_unknown_tile_is_error() {
        let board = Board::linear(GameType::Ludo, 5).unwrap();
        assert!(matches!(
            board.tile(TileId::new(6)),
            Err(GameError::TileNotFound(id)) if id == TileId::new(6)
        ));
        assert!(board.tile(TileId::new(0)).is_err());
    }

    #[test]
    fn test_advance_clamps() {
        let board = Board::linear(GameType::SnakesAndLadders, 10).unwrap();
        assert_eq!(board.advance(TileId::new(2), 3).unwrap(), TileId::new(5));
        assert_eq!(board.advance(TileId::new(8), 5).unwrap(), TileId::new(10));
        assert_eq!(board.advance(TileId::new(10), 6).unwrap(), TileId::new(10));
    }

    #[test]
    fn test_set_action_rejects_dangling_destination() {
        let mut board = Board::linear(GameType::SnakesAndLadders, 10).unwrap();
        let err = board
            .set_action(TileId::new(3), TileAction::ladder(TileId::new(40)))
            .unwrap_err();
        assert!(matches!(err, GameError::DanglingReference { .. }));
    }

    #[test]
    fn test_broken_chain_detected() {
        let mut board = Board::linear(GameType::SnakesAndLadders, 5).unwrap();
        board.tile_mut(TileId::new(3)).unwrap().next = None;
        assert!(matches!(board.validate(), Err(GameError::BrokenChain(_))));

        let mut board = Board::linear(GameType::SnakesAndLadders, 5).unwrap();
        board.tile_mut(TileId::new(5)).unwrap().next = Some(TileId::new(2));
        assert!(matches!(board.validate(), Err(GameError::BrokenChain(_))));
    }

    #[test]
    fn test_connect_direction_taken() {
        let mut board = small_map();
        let err = board
            .connect(TileId::new(1), Direction::West, TileId::new(3), 10)
            .unwrap_err();
        assert!(matches!(err, GameError::DirectionTaken { .. }));
    }

    #[test]
    fn test_connect_auto_derives_direction() {
        let mut board = small_map();
        let direction = board.connect_auto(TileId::new(3), TileId::new(1), 70).unwrap();
        assert_eq!(direction, Direction::NorthEast);
        assert!(board
            .tile(TileId::new(3))
            .unwrap()
            .connections
            .contains_key(&Direction::NorthEast));
    }

    #[test]
    fn test_travel_needs_starting_city() {
        let mut board = Board::travel(2, 2);
        board.add_city(TileId::new(1), "Tunis", Coord::new(0, 0), false).unwrap();
        assert!(matches!(board.validate(), Err(GameError::NoStartingCity)));
    }

    #[test]
    fn test_distribute_tokens() {
        let mut board = small_map();
        let mut rng = GameRng::new(7);
        let rules = GameRules::lost_diamond();
        board.distribute_tokens(&mut rng, &rules).unwrap();

        let diamonds = board
            .tiles()
            .filter(|tile| tile.token == Some(Token::Diamond))
            .count();
        assert_eq!(diamonds, 1);
        assert!(board.tile(TileId::new(1)).unwrap().token.is_none());
        for id in [TileId::new(2), TileId::new(3)] {
            let tile = board.tile(id).unwrap();
            assert!(tile.token.is_some());
            assert!((80..=120).contains(&tile.token_price));
        }
        board.validate().unwrap();
    }

    #[test]
    fn test_token_on_starting_city_rejected() {
        let mut board = small_map();
        board.tile_mut(TileId::new(1)).unwrap().token = Some(Token::Empty);
        assert!(matches!(
            board.validate(),
            Err(GameError::TokenOnStartingCity(_))
        ));
    }

    #[test]
    fn test_json_round_trip_validates() {
        let mut board = Board::linear(GameType::SnakesAndLadders, 12).unwrap();
        board
            .set_action(TileId::new(11), TileAction::snake(TileId::new(2)))
            .unwrap();
        let json = board.to_json().unwrap();
        let restored = Board::from_json(&json).unwrap();
        assert_eq!(restored, board);

        let broken = json.replace("\"destination\": 2", "\"destination\": 99");
        assert!(Board::from_json(&broken).is_err());
    }
}
