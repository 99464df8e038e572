//! Preset boards and a session builder.
//!
//! `GameRules::board_variant` picks the layout:
//!
//! | Game | Variants |
//! | --- | --- |
//! | Snakes & Ladders | `classic`, `special` |
//! | Ludo | `classic` |
//! | Lost Diamond | `africa` |

pub mod lost_diamond;
pub mod ludo;
pub mod snakes_ladders;

use crate::board::Board;
use crate::core::{GameError, GameRng};
use crate::game::BoardGame;
use crate::rules::{GameRules, GameType};

/// Build the preset board named by the rules.
///
/// Lost Diamond boards come with their tokens already hidden, drawn from
/// `seed`.
pub fn board_for(rules: &GameRules, seed: u64) -> Result<Board, GameError> {
    let variant = rules.board_variant.to_lowercase();
    match (rules.game_type, variant.as_str()) {
        (GameType::SnakesAndLadders, "classic") => snakes_ladders::classic(),
        (GameType::SnakesAndLadders, "special") => snakes_ladders::special(),
        (GameType::Ludo, "classic") => ludo::track(),
        (GameType::LostDiamond, "africa") => {
            let mut board = lost_diamond::africa()?;
            let mut rng = GameRng::new(seed).for_context("tokens");
            board.distribute_tokens(&mut rng, rules)?;
            Ok(board)
        }
        (game_type, _) => Err(GameError::UnknownVariant {
            game_type,
            variant: rules.board_variant.clone(),
        }),
    }
}

/// A session on the preset board for `rules`, with no players yet.
pub fn new_game(rules: GameRules, seed: u64) -> Result<BoardGame, GameError> {
    let board = board_for(&rules, seed)?;
    BoardGame::new(board, rules, seed)
}

/// Builds a session with its players.
///
/// ## Example
///
/// ```
/// use board_engine::games::GameBuilder;
/// use board_engine::game::GameState;
/// use board_engine::rules::GameRules;
///
/// let game = GameBuilder::new(GameRules::ludo())
///     .seed(7)
///     .player("Ada", "red")
///     .player("Grace", "yellow")
///     .start()
///     .unwrap();
///
/// assert_eq!(game.state(), GameState::Started);
/// assert_eq!(game.players().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct GameBuilder {
    rules: GameRules,
    seed: u64,
    players: Vec<(String, String)>,
}

impl GameBuilder {
    pub fn new(rules: GameRules) -> Self {
        Self {
            rules,
            seed: 0,
            players: Vec::new(),
        }
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn player(mut self, name: impl Into<String>, token: impl Into<String>) -> Self {
        self.players.push((name.into(), token.into()));
        self
    }

    /// Build the session with every player joined, not yet started.
    pub fn build(self) -> Result<BoardGame, GameError> {
        let mut game = new_game(self.rules, self.seed)?;
        for (name, token) in self.players {
            game.add_player(name, token)?;
        }
        Ok(game)
    }

    /// Build and start the session.
    pub fn start(self) -> Result<BoardGame, GameError> {
        let mut game = self.build()?;
        game.start_game()?;
        Ok(game)
    }
}
