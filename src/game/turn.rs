//! Dice turns on linear boards.
//!
//! One call resolves one turn, in this order:
//!
//! 1. a pending missed turn is consumed (no roll, no movement)
//! 2. roll, or load the supplied values
//! 3. consecutive maximum rolls past the limit forfeit the move
//! 4. a Ludo piece in its starting area needs a maximum roll to enter
//! 5. advance, clamped at the final tile, and publish the move
//! 6. run the landed tile's action once
//! 7. apply ladder/snake rule bonuses
//! 8. check for a winner
//! 9. grant an extra throw, or pass play to the next player

use log::debug;
use serde::{Deserialize, Serialize};

use super::board_game::BoardGame;
use super::GameState;
use crate::board::TileId;
use crate::core::{PlayerId, Rejection};
use crate::effects::TileAction;
use crate::events::GameEvent;

/// What a completed dice move did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub player: PlayerId,
    pub roll: u32,
    pub from: TileId,
    /// Tile the dice move ended on, before any action.
    pub landed: TileId,
    /// Tile the player stands on after the action.
    pub to: TileId,
    /// Action of the landed tile, if one ran.
    pub action: Option<TileAction>,
    pub extra_turn: bool,
    pub winner: Option<PlayerId>,
}

/// Result of [`BoardGame::play_turn`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The player was flagged to miss this turn.
    Skipped { player: PlayerId },
    /// Too many maximum rolls in a row.
    Forfeited { player: PlayerId, roll: u32 },
    /// Ludo: the piece could not leave its starting area.
    Blocked { player: PlayerId, roll: u32 },
    /// Ludo: the piece left its starting area on a maximum roll.
    Entered {
        player: PlayerId,
        roll: u32,
        extra_turn: bool,
    },
    Moved(MoveReport),
}

impl TurnOutcome {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            TurnOutcome::Skipped { player }
            | TurnOutcome::Forfeited { player, .. }
            | TurnOutcome::Blocked { player, .. }
            | TurnOutcome::Entered { player, .. } => *player,
            TurnOutcome::Moved(report) => report.player,
        }
    }

    /// The dice total, unless the turn was skipped.
    #[must_use]
    pub fn roll(&self) -> Option<u32> {
        match self {
            TurnOutcome::Skipped { .. } => None,
            TurnOutcome::Forfeited { roll, .. }
            | TurnOutcome::Blocked { roll, .. }
            | TurnOutcome::Entered { roll, .. } => Some(*roll),
            TurnOutcome::Moved(report) => Some(report.roll),
        }
    }
}

impl BoardGame {
    /// Roll the dice and resolve the current player's turn.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, Rejection> {
        let actor = self.ensure_playing(true)?;
        if let Some(outcome) = self.consume_missing_turn(actor) {
            return Ok(outcome);
        }
        let roll = self.dice.roll();
        Ok(self.resolve_roll(actor, roll))
    }

    /// Resolve the current player's turn with the given die values.
    ///
    /// The values must match the dice shape exactly. Used for replays and
    /// scripted games.
    pub fn play_turn_with_roll(&mut self, values: &[u32]) -> Result<TurnOutcome, Rejection> {
        let actor = self.ensure_playing(true)?;
        if let Err(err) = self.dice.check(values) {
            return Err(self.reject(Rejection::InvalidRoll {
                reason: err.to_string(),
            }));
        }
        if let Some(outcome) = self.consume_missing_turn(actor) {
            return Ok(outcome);
        }
        let roll = match self.dice.load(values) {
            Ok(total) => total,
            Err(err) => {
                return Err(self.reject(Rejection::InvalidRoll {
                    reason: err.to_string(),
                }))
            }
        };
        Ok(self.resolve_roll(actor, roll))
    }

    fn consume_missing_turn(&mut self, actor: PlayerId) -> Option<TurnOutcome> {
        let player = self.players.get_mut(actor.index())?;
        if !player.missing_turn {
            return None;
        }
        player.missing_turn = false;
        debug!("{} misses this turn", actor);
        self.end_turn(false);
        Some(TurnOutcome::Skipped { player: actor })
    }

    fn resolve_roll(&mut self, actor: PlayerId, roll: u32) -> TurnOutcome {
        let is_max = roll == self.dice.max_roll();
        let Some(from) = self.player(actor).map(|p| p.tile()) else {
            return TurnOutcome::Skipped { player: actor };
        };
        debug!("{} rolled {} ({:?}) on {}", actor, roll, self.dice.values(), from);

        if is_max {
            self.consecutive_max += 1;
        } else {
            self.consecutive_max = 0;
        }
        let limit = self.rules.consecutive_sixes_limit;
        if is_max && limit > 0 && self.consecutive_max >= limit {
            self.events.publish(GameEvent::TurnForfeited {
                player: actor,
                consecutive: self.consecutive_max,
            });
            self.record(actor, Some(roll), from, from);
            self.end_turn(false);
            return TurnOutcome::Forfeited { player: actor, roll };
        }

        if self.rules.start_only_with_max && self.players[actor.index()].in_starting_area {
            self.record(actor, Some(roll), from, from);
            if !is_max {
                self.end_turn(false);
                return TurnOutcome::Blocked { player: actor, roll };
            }
            self.players[actor.index()].in_starting_area = false;
            let extra_turn = self.rules.extra_throw_on_max;
            if extra_turn {
                self.events.publish(GameEvent::PlayerExtraTurn { player: actor });
            }
            self.end_turn(extra_turn);
            return TurnOutcome::Entered {
                player: actor,
                roll,
                extra_turn,
            };
        }

        let landed = self.board.advance(from, roll).unwrap_or(from);
        self.players[actor.index()].place(landed);
        self.events.publish(GameEvent::PlayerMoved {
            player: actor,
            from,
            to: landed,
            steps: roll,
        });

        let action = self
            .board
            .tile(landed)
            .ok()
            .and_then(|tile| tile.active_action())
            .cloned();
        let mut extra_turn = false;
        if let Some(action) = &action {
            let applied = self.run_action(action, actor).is_applied();
            if applied && action.is_ladder() && self.rules.extra_turn_on_ladder {
                extra_turn = true;
            }
            if applied && action.is_snake() && self.rules.skip_turn_on_snake {
                self.players[actor.index()].missing_turn = true;
                self.events.publish(GameEvent::PlayerSkipTurn { player: actor });
            }
        }
        if std::mem::take(&mut self.players[actor.index()].extra_throw) {
            extra_turn = true;
        }

        let to = self.players[actor.index()].tile();
        self.record(actor, Some(roll), from, to);

        let goal = self.board.max_tile_id();
        let winner = self
            .players
            .iter()
            .find(|p| Some(p.tile()) == goal || p.reached_goal)
            .map(|p| p.id());
        if let Some(winner) = winner {
            self.turn_number += 1;
            self.finish(winner);
            return TurnOutcome::Moved(MoveReport {
                player: actor,
                roll,
                from,
                landed,
                to,
                action,
                extra_turn: false,
                winner: Some(winner),
            });
        }

        if is_max && self.rules.extra_throw_on_max {
            extra_turn = true;
        }
        if extra_turn {
            self.events.publish(GameEvent::PlayerExtraTurn { player: actor });
        }
        debug_assert_eq!(self.state, GameState::Started);
        self.end_turn(extra_turn);

        TurnOutcome::Moved(MoveReport {
            player: actor,
            roll,
            from,
            landed,
            to,
            action,
            extra_turn,
            winner: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::rules::{GameRules, GameType};

    fn game(rules: GameRules, size: u32, players: usize) -> BoardGame {
        let board = Board::linear(rules.game_type, size).unwrap();
        let mut game = BoardGame::new(board, rules, 9).unwrap();
        for i in 0..players {
            game.add_player(format!("p{}", i), "red").unwrap();
        }
        game.start_game().unwrap();
        game
    }

    #[test]
    fn test_not_started_rejects() {
        let board = Board::linear(GameType::SnakesAndLadders, 10).unwrap();
        let mut game = BoardGame::new(board, GameRules::snakes_and_ladders(), 1).unwrap();
        game.add_player("Ada", "red").unwrap();
        assert_eq!(
            game.play_turn(),
            Err(Rejection::NotInProgress {
                state: GameState::NotStarted
            })
        );
    }

    #[test]
    fn test_turn_passes_round_robin() {
        let mut game = game(GameRules::snakes_and_ladders(), 30, 3);
        for expected in [0, 1, 2, 0] {
            let outcome = game.play_turn_with_roll(&[2]).unwrap();
            assert_eq!(outcome.player(), PlayerId::new(expected));
        }
        assert_eq!(game.turn_number(), 4);
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn test_invalid_roll_rejected() {
        let mut game = game(GameRules::snakes_and_ladders(), 30, 1);
        assert!(matches!(
            game.play_turn_with_roll(&[7]),
            Err(Rejection::InvalidRoll { .. })
        ));
        assert!(matches!(
            game.play_turn_with_roll(&[1, 2]),
            Err(Rejection::InvalidRoll { .. })
        ));
        assert_eq!(game.turn_number(), 0);
    }

    #[test]
    fn test_missing_turn_consumes_one_turn() {
        let mut game = game(GameRules::snakes_and_ladders(), 30, 2);
        game.players[0].missing_turn = true;

        let before = game.dice().values().to_vec();
        let outcome = game.play_turn_with_roll(&[4]).unwrap();
        assert_eq!(outcome, TurnOutcome::Skipped { player: PlayerId::new(0) });
        assert_eq!(game.dice().values(), before.as_slice());
        assert_eq!(game.players[0].tile(), TileId::new(1));
        assert!(!game.players[0].missing_turn);
        assert_eq!(game.current_player_id(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_consecutive_max_forfeits() {
        let rules = GameRules::snakes_and_ladders()
            .with_extra_throw_on_max(true)
            .with_consecutive_sixes_limit(3);
        let mut game = game(rules, 60, 2);

        game.play_turn_with_roll(&[6]).unwrap();
        game.play_turn_with_roll(&[6]).unwrap();
        assert_eq!(game.players[0].tile(), TileId::new(13));
        let outcome = game.play_turn_with_roll(&[6]).unwrap();

        assert!(matches!(outcome, TurnOutcome::Forfeited { .. }));
        assert_eq!(game.players[0].tile(), TileId::new(13));
        assert_eq!(game.current_player_id(), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_wrong_game_type() {
        let mut game = game(GameRules::snakes_and_ladders(), 10, 1);
        assert!(matches!(
            game.process_lost_diamond_move(crate::board::Direction::North),
            Err(Rejection::WrongGameType(GameType::SnakesAndLadders))
        ));
    }
}
