//! Lost Diamond: route choice and token decisions.
//!
//! A travel turn is a chosen route, paid for up front. Arriving on a city
//! with a hidden token opens a decision: pay the price, try the dice once,
//! or leave it. The turn passes once the decision is made.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::board_game::BoardGame;
use super::snapshot::PendingToken;
use crate::board::{Direction, TileId, Token};
use crate::core::{PlayerId, Rejection};
use crate::events::GameEvent;
use crate::rules::keys;

/// An outgoing route from the current player's city.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelOption {
    pub direction: Direction,
    pub destination: TileId,
    pub destination_name: String,
    /// Cost after the travel cost modifier.
    pub cost: i64,
    pub affordable: bool,
}

/// A hidden token the player may now open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenOffer {
    pub tile: TileId,
    pub price: i64,
}

/// Result of [`BoardGame::process_lost_diamond_move`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelOutcome {
    pub player: PlayerId,
    pub from: TileId,
    pub to: TileId,
    pub cost: i64,
    pub offer: Option<TokenOffer>,
    pub winner: Option<PlayerId>,
}

/// A token that was opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReveal {
    pub player: PlayerId,
    pub tile: TileId,
    pub token: Token,
    /// Coins paid; zero when opened with the dice.
    pub paid: i64,
}

/// Result of [`BoardGame::roll_for_token`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenRoll {
    /// The roll met the threshold and the token was opened for free.
    Revealed { roll: u32, reveal: TokenReveal },
    /// The roll fell short. The token can still be bought or declined.
    Failed { roll: u32, threshold: u32 },
}

impl BoardGame {
    /// Every route leaving the current player's city.
    ///
    /// Empty unless a Lost Diamond game is running.
    #[must_use]
    pub fn travel_options(&self) -> Vec<TravelOption> {
        let Some(player) = self.current_player() else {
            return Vec::new();
        };
        if self.rules.game_type.is_linear() {
            return Vec::new();
        }
        let Ok(tile) = self.board.tile(player.tile()) else {
            return Vec::new();
        };

        tile.connections
            .iter()
            .map(|(&direction, route)| {
                let cost = self.rules.travel_cost(route.cost);
                TravelOption {
                    direction,
                    destination: route.to,
                    destination_name: self
                        .board
                        .tile(route.to)
                        .map(|t| t.display_name())
                        .unwrap_or_default(),
                    cost,
                    affordable: player.can_afford(cost),
                }
            })
            .collect()
    }

    /// Travel along the route heading `direction` from the current city.
    ///
    /// The route must exist and the player must be able to pay for it.
    /// Arriving home with the diamond wins; arriving on a hidden token
    /// leaves it pending until [`buy_token`](Self::buy_token),
    /// [`roll_for_token`](Self::roll_for_token) or
    /// [`decline_token`](Self::decline_token).
    pub fn process_lost_diamond_move(&mut self, direction: Direction) -> Result<TravelOutcome, Rejection> {
        let actor = self.ensure_playing(false)?;
        if let Some(pending) = self.pending {
            let city = self.city_name(pending.tile);
            return Err(self.reject(Rejection::TokenDecisionPending { city }));
        }

        let from = self.players[actor.index()].tile();
        let city = self.city_name(from);
        let route = self
            .board
            .tile(from)
            .ok()
            .and_then(|tile| tile.connections.get(&direction).copied());
        let Some(route) = route else {
            return Err(self.reject(Rejection::NoRoute { city, direction }));
        };

        let cost = self.rules.travel_cost(route.cost);
        let available = self.players[actor.index()].money;
        if available < cost {
            return Err(self.reject(Rejection::InsufficientFunds {
                city,
                needed: cost,
                available,
            }));
        }

        let to = route.to;
        let player = &mut self.players[actor.index()];
        player.money -= cost;
        player.place(to);
        let money = player.money;
        info!("{} travels {} from {} to {} for {}", actor, direction, city, self.city_name(to), cost);

        if cost != 0 {
            self.events.publish(GameEvent::MoneyChanged { player: actor, money });
        }
        self.events.publish(GameEvent::PlayerMoved {
            player: actor,
            from,
            to,
            steps: 1,
        });
        self.record(actor, None, from, to);

        if let Some(action) = self.board.tile(to).ok().and_then(|t| t.active_action()).cloned() {
            self.run_action(&action, actor);
        }

        let mut outcome = TravelOutcome {
            player: actor,
            from,
            to,
            cost,
            offer: None,
            winner: None,
        };

        let at_start = self.board.tile(to).map_or(false, |tile| tile.starting_city);
        if at_start && self.players[actor.index()].has_diamond {
            self.turn_number += 1;
            self.finish(actor);
            outcome.winner = Some(actor);
            return Ok(outcome);
        }

        if let Ok(tile) = self.board.tile(to) {
            if tile.has_token() {
                let offer = TokenOffer {
                    tile: to,
                    price: tile.token_price,
                };
                debug!("{} may open the token at {} for {}", actor, to, offer.price);
                self.pending = Some(PendingToken {
                    tile: to,
                    rolled: false,
                });
                outcome.offer = Some(offer);
                return Ok(outcome);
            }
        }

        self.end_turn(false);
        Ok(outcome)
    }

    /// Pay the price of the pending token and open it.
    pub fn buy_token(&mut self) -> Result<TokenReveal, Rejection> {
        let (actor, pending) = self.ensure_pending()?;
        let price = self.board.tile(pending.tile).map_or(0, |tile| tile.token_price);
        let available = self.players[actor.index()].money;
        if available < price {
            let city = self.city_name(pending.tile);
            return Err(self.reject(Rejection::CannotAffordToken {
                city,
                needed: price,
                available,
            }));
        }

        self.players[actor.index()].money -= price;
        self.events.publish(GameEvent::MoneyChanged {
            player: actor,
            money: available - price,
        });
        Ok(self.reveal_pending(actor, pending.tile, price))
    }

    /// Try to open the pending token for free with one roll.
    ///
    /// Allowed once per token and only when `allowDiceForToken` is set.
    /// A failed roll keeps the token pending.
    pub fn roll_for_token(&mut self) -> Result<TokenRoll, Rejection> {
        let (actor, pending) = self.ensure_pending()?;
        if !self.rules.get_bool_additional(keys::ALLOW_DICE_FOR_TOKEN, true) {
            return Err(self.reject(Rejection::DiceRevealDisabled));
        }
        if pending.rolled {
            return Err(self.reject(Rejection::AlreadyRolled));
        }
        let threshold = self.rules.dice_roll_threshold();
        let max_roll = self.dice.max_roll();
        if threshold > max_roll {
            return Err(self.reject(Rejection::UnreachableThreshold { threshold, max_roll }));
        }

        let roll = self.dice.roll();
        debug!("{} rolled {} against {} for the token", actor, roll, threshold);
        if roll >= threshold {
            let reveal = self.reveal_pending(actor, pending.tile, 0);
            return Ok(TokenRoll::Revealed { roll, reveal });
        }

        self.pending = Some(PendingToken {
            rolled: true,
            ..pending
        });
        Ok(TokenRoll::Failed { roll, threshold })
    }

    /// Leave the pending token unopened and end the turn.
    pub fn decline_token(&mut self) -> Result<(), Rejection> {
        let (actor, pending) = self.ensure_pending()?;
        debug!("{} leaves the token at {}", actor, pending.tile);
        self.pending = None;
        self.end_turn(false);
        Ok(())
    }

    /// Give up the turn when no route can be paid for.
    ///
    /// Only a stranded player may pass, and never with a token pending.
    pub fn pass_turn(&mut self) -> Result<(), Rejection> {
        let actor = self.ensure_playing(false)?;
        if let Some(pending) = self.pending {
            let city = self.city_name(pending.tile);
            return Err(self.reject(Rejection::TokenDecisionPending { city }));
        }
        if self.travel_options().iter().any(|option| option.affordable) {
            let city = self.city_name(self.players[actor.index()].tile());
            return Err(self.reject(Rejection::RouteAffordable { city }));
        }
        info!("{} is stranded and passes", actor);
        self.end_turn(false);
        Ok(())
    }

    fn ensure_pending(&mut self) -> Result<(PlayerId, PendingToken), Rejection> {
        let actor = self.ensure_playing(false)?;
        match self.pending {
            Some(pending) => Ok((actor, pending)),
            None => Err(self.reject(Rejection::NoPendingToken)),
        }
    }

    fn reveal_pending(&mut self, actor: PlayerId, tile: TileId, paid: i64) -> TokenReveal {
        self.pending = None;
        let token = match self.board.tile_mut(tile) {
            Ok(tile) => tile.token.take().unwrap_or(Token::Empty),
            Err(_) => Token::Empty,
        };
        self.events.publish(GameEvent::TokenRevealed {
            player: actor,
            tile,
            token,
        });
        if let Some(action) = token.action() {
            self.run_action(&action, actor);
        }
        self.end_turn(false);

        TokenReveal {
            player: actor,
            tile,
            token,
            paid,
        }
    }

    fn city_name(&self, tile: TileId) -> String {
        self.board
            .tile(tile)
            .map_or_else(|_| tile.to_string(), |t| t.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Coord};
    use crate::game::GameState;
    use crate::rules::GameRules;

    /// Cairo (start) --W 50--> Tunis (token) --S 30--> Lagos, and back.
    fn map(token: Token) -> Board {
        let mut board = Board::travel(4, 4);
        board.add_city(TileId::new(1), "Cairo", Coord::new(3, 0), true).unwrap();
        board.add_city(TileId::new(2), "Tunis", Coord::new(0, 0), false).unwrap();
        board.add_city(TileId::new(3), "Lagos", Coord::new(0, 3), false).unwrap();
        board.connect(TileId::new(1), Direction::West, TileId::new(2), 50).unwrap();
        board.connect(TileId::new(2), Direction::East, TileId::new(1), 40).unwrap();
        board.connect(TileId::new(2), Direction::South, TileId::new(3), 30).unwrap();
        board.connect(TileId::new(3), Direction::North, TileId::new(2), 30).unwrap();
        let tunis = board.tile_mut(TileId::new(2)).unwrap();
        tunis.token = Some(token);
        tunis.token_price = 100;
        board
    }

    fn game(token: Token, money: i64) -> BoardGame {
        let rules = GameRules::lost_diamond().with_starting_money(money);
        let mut game = BoardGame::new(map(token), rules, 5).unwrap();
        game.add_player("Ada", "red").unwrap();
        game.start_game().unwrap();
        game
    }

    #[test]
    fn test_travel_options() {
        let game = game(Token::Empty, 40);
        let options = game.travel_options();
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].direction, Direction::West);
        assert_eq!(options[0].destination_name, "Tunis");
        assert_eq!(options[0].cost, 50);
        assert!(!options[0].affordable);
    }

    #[test]
    fn test_no_route() {
        let mut game = game(Token::Empty, 300);
        let err = game.process_lost_diamond_move(Direction::North).unwrap_err();
        assert_eq!(
            err,
            Rejection::NoRoute {
                city: "Cairo".to_string(),
                direction: Direction::North
            }
        );
    }

    #[test]
    fn test_buy_token_and_win_home() {
        let mut game = game(Token::Diamond, 300);
        let outcome = game.process_lost_diamond_move(Direction::West).unwrap();
        assert_eq!(outcome.offer, Some(TokenOffer { tile: TileId::new(2), price: 100 }));

        assert!(matches!(
            game.process_lost_diamond_move(Direction::East),
            Err(Rejection::TokenDecisionPending { .. })
        ));

        let reveal = game.buy_token().unwrap();
        assert_eq!(reveal.token, Token::Diamond);
        assert_eq!(game.players()[0].money, 150);
        assert!(game.players()[0].has_diamond);
        assert!(game.board().tile(TileId::new(2)).unwrap().token.is_none());

        let outcome = game.process_lost_diamond_move(Direction::East).unwrap();
        assert_eq!(outcome.winner, Some(PlayerId::new(0)));
        assert_eq!(game.state(), GameState::Finished);
        assert_eq!(game.players()[0].money, 110);
    }

    #[test]
    fn test_cannot_afford_token_keeps_it_pending() {
        let mut game = game(Token::Thief, 120);
        game.process_lost_diamond_move(Direction::West).unwrap();
        assert!(matches!(
            game.buy_token(),
            Err(Rejection::CannotAffordToken { needed: 100, available: 70, .. })
        ));
        assert!(game.pending_token().is_some());
        game.decline_token().unwrap();
        assert!(game.pending_token().is_none());
        assert_eq!(game.decline_token(), Err(Rejection::NoPendingToken));
    }

    #[test]
    fn test_roll_for_token_only_once() {
        let rules = GameRules::lost_diamond().with_dice(1, 6);
        let mut game = BoardGame::new(map(Token::Empty), rules, 5).unwrap();
        game.add_player("Ada", "red").unwrap();
        game.start_game().unwrap();
        game.process_lost_diamond_move(Direction::West).unwrap();

        match game.roll_for_token().unwrap() {
            TokenRoll::Revealed { roll, .. } => {
                assert!(roll >= 4);
                assert!(game.pending_token().is_none());
            }
            TokenRoll::Failed { roll, threshold } => {
                assert!(roll < threshold);
                assert_eq!(game.roll_for_token(), Err(Rejection::AlreadyRolled));
                assert!(game.buy_token().is_ok());
            }
        }
    }

    #[test]
    fn test_dice_reveal_checks() {
        let rules = GameRules::lost_diamond()
            .with_additional(keys::DICE_ROLL_THRESHOLD, 9);
        let mut game = BoardGame::new(map(Token::Empty), rules, 5).unwrap();
        game.add_player("Ada", "red").unwrap();
        game.start_game().unwrap();
        game.process_lost_diamond_move(Direction::West).unwrap();
        assert_eq!(
            game.roll_for_token(),
            Err(Rejection::UnreachableThreshold { threshold: 9, max_roll: 6 })
        );

        let rules = GameRules::lost_diamond().with_additional(keys::ALLOW_DICE_FOR_TOKEN, false);
        let mut game = BoardGame::new(map(Token::Empty), rules, 5).unwrap();
        game.add_player("Ada", "red").unwrap();
        game.start_game().unwrap();
        game.process_lost_diamond_move(Direction::West).unwrap();
        assert_eq!(game.roll_for_token(), Err(Rejection::DiceRevealDisabled));
    }

    #[test]
    fn test_emergency_money_for_stranded_player() {
        let rules = GameRules::lost_diamond()
            .with_starting_money(10)
            .with_additional(keys::EMERGENCY_MONEY, 60);
        let mut game = BoardGame::new(map(Token::Empty), rules, 5).unwrap();
        game.add_player("Ada", "red").unwrap();
        game.start_game().unwrap();
        assert_eq!(game.players()[0].money, 60);
        assert!(game.travel_options()[0].affordable);
    }
}
