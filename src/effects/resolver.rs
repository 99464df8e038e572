//! Action resolution.
//!
//! The orchestrator lends its board, players, random stream and event bus
//! to the resolver through an [`ActionContext`] for the duration of one
//! action. Actions never hold on to the game.

use log::debug;

use super::action::TileAction;
use crate::board::{Board, TileId};
use crate::core::{GameRng, Player, PlayerId};
use crate::events::{EventBus, GameEvent};

/// Everything an action may touch while it runs.
pub struct ActionContext<'a> {
    pub board: &'a Board,
    /// All players, indexed by [`PlayerId::index`].
    pub players: &'a mut [Player],
    /// Whose turn it is.
    pub current: PlayerId,
    pub rng: &'a mut GameRng,
    pub events: &'a mut EventBus,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        board: &'a Board,
        players: &'a mut [Player],
        current: PlayerId,
        rng: &'a mut GameRng,
        events: &'a mut EventBus,
    ) -> Self {
        Self {
            board,
            players,
            current,
            rng,
            events,
        }
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id.index())
    }
}

/// Result of resolving an action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// The action changed the game.
    Applied,
    /// Nothing to do (no candidate, safe zone, empty range...).
    Skipped(&'static str),
}

impl ResolveResult {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, ResolveResult::Applied)
    }
}

/// Applies tile actions.
pub struct ActionResolver;

impl ActionResolver {
    /// Run `action` for `actor`.
    ///
    /// Runs exactly once: a teleport never triggers the action of the tile
    /// it lands on.
    pub fn perform(action: &TileAction, actor: PlayerId, ctx: &mut ActionContext<'_>) -> ResolveResult {
        debug!("{} lands on: {}", actor, action.description());

        match action {
            TileAction::Ladder { destination } | TileAction::Snake { destination } => {
                Self::teleport(ctx, actor, *destination)
            }

            TileAction::RandomTeleport {
                margin_start,
                margin_end,
            } => {
                let chain = ctx.board.chain();
                let end = chain.len().saturating_sub(*margin_end);
                if *margin_start >= end {
                    return ResolveResult::Skipped("teleport range is empty");
                }
                let target = chain[margin_start + ctx.rng.gen_index(end - margin_start)];
                Self::teleport(ctx, actor, target)
            }

            TileAction::Swap => Self::swap(ctx, actor),

            TileAction::ExtraThrow => match ctx.player_mut(actor) {
                Some(player) => {
                    player.extra_throw = true;
                    ResolveResult::Applied
                }
                None => ResolveResult::Skipped("unknown player"),
            },

            TileAction::MissingTurn => match ctx.player_mut(actor) {
                Some(player) => {
                    player.missing_turn = true;
                    ctx.events.publish(GameEvent::PlayerSkipTurn { player: actor });
                    ResolveResult::Applied
                }
                None => ResolveResult::Skipped("unknown player"),
            },

            TileAction::GoToStart => match ctx.board.first_tile_id() {
                Some(start) => Self::teleport(ctx, actor, start),
                None => ResolveResult::Skipped("board is empty"),
            },

            TileAction::GoToJail { jail } => {
                let result = Self::teleport(ctx, actor, *jail);
                if result.is_applied() {
                    if let Some(player) = ctx.player_mut(actor) {
                        player.missing_turn = true;
                    }
                    ctx.events.publish(GameEvent::PlayerSkipTurn { player: actor });
                }
                result
            }

            TileAction::Capture => Self::capture(ctx, actor),

            TileAction::Win => match ctx.player_mut(actor) {
                Some(player) => {
                    player.reached_goal = true;
                    ResolveResult::Applied
                }
                None => ResolveResult::Skipped("unknown player"),
            },

            TileAction::StartingArea => match ctx.player_mut(actor) {
                Some(player) => {
                    player.return_home();
                    ResolveResult::Applied
                }
                None => ResolveResult::Skipped("unknown player"),
            },

            TileAction::Treasure { value } => match ctx.player_mut(actor) {
                Some(player) => {
                    player.money += value;
                    let money = player.money;
                    ctx.events.publish(GameEvent::MoneyChanged {
                        player: actor,
                        money,
                    });
                    ResolveResult::Applied
                }
                None => ResolveResult::Skipped("unknown player"),
            },

            TileAction::Thief => match ctx.player_mut(actor) {
                Some(player) => {
                    player.money = 0;
                    player.has_diamond = false;
                    ctx.events.publish(GameEvent::MoneyChanged {
                        player: actor,
                        money: 0,
                    });
                    ResolveResult::Applied
                }
                None => ResolveResult::Skipped("unknown player"),
            },

            TileAction::Diamond => match ctx.player_mut(actor) {
                Some(player) => {
                    player.has_diamond = true;
                    let tile = player.tile();
                    ctx.events.publish(GameEvent::DiamondFound {
                        player: actor,
                        tile,
                    });
                    ResolveResult::Applied
                }
                None => ResolveResult::Skipped("unknown player"),
            },
        }
    }

    fn teleport(ctx: &mut ActionContext<'_>, actor: PlayerId, to: TileId) -> ResolveResult {
        if !ctx.board.contains(to) {
            return ResolveResult::Skipped("destination is not on the board");
        }
        let Some(player) = ctx.player_mut(actor) else {
            return ResolveResult::Skipped("unknown player");
        };
        let from = player.tile();
        player.place(to);
        ctx.events.publish(GameEvent::PlayerTeleported {
            player: actor,
            from,
            to,
        });
        ResolveResult::Applied
    }

    fn swap(ctx: &mut ActionContext<'_>, actor: PlayerId) -> ResolveResult {
        if ctx.players.len() < 2 || actor.index() >= ctx.players.len() {
            return ResolveResult::Skipped("no opponent to swap with");
        }
        let candidates: Vec<PlayerId> = ctx
            .players
            .iter()
            .map(Player::id)
            .filter(|&id| id != actor)
            .collect();
        let Some(&other) = ctx.rng.choose(&candidates) else {
            return ResolveResult::Skipped("no opponent to swap with");
        };

        let mine = ctx.players[actor.index()].tile();
        let theirs = ctx.players[other.index()].tile();
        ctx.players[actor.index()].place(theirs);
        ctx.players[other.index()].place(mine);

        if actor == ctx.current {
            ctx.events.publish(GameEvent::PlayersSwapped {
                player: actor,
                other,
            });
        }
        ResolveResult::Applied
    }

    fn capture(ctx: &mut ActionContext<'_>, actor: PlayerId) -> ResolveResult {
        let Some(tile) = ctx.players.get(actor.index()).map(Player::tile) else {
            return ResolveResult::Skipped("unknown player");
        };
        if ctx.board.tile(tile).map_or(false, |t| t.safe_zone) {
            return ResolveResult::Skipped("safe zone");
        }

        let mut captured = Vec::new();
        for player in ctx.players.iter_mut() {
            if player.id() != actor && player.tile() == tile && !player.in_starting_area {
                player.return_home();
                captured.push(player.id());
            }
        }
        if captured.is_empty() {
            return ResolveResult::Skipped("no opponent on this tile");
        }
        for victim in captured {
            ctx.events.publish(GameEvent::PlayerCaptured {
                captor: actor,
                victim,
            });
        }
        ResolveResult::Applied
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::events::EventFamily;
    use crate::rules::GameType;

    struct Fixture {
        board: Board,
        players: Vec<Player>,
        rng: GameRng,
        events: EventBus,
        seen: Rc<RefCell<Vec<GameEvent>>>,
    }

    impl Fixture {
        fn new(player_count: u8) -> Self {
            let board = Board::linear(GameType::SnakesAndLadders, 20).unwrap();
            let players = (0..player_count)
                .map(|i| Player::new(PlayerId::new(i), format!("p{}", i), "red", TileId::new(1)))
                .collect();
            let mut events = EventBus::new();
            let seen = Rc::new(RefCell::new(Vec::new()));
            let sink = Rc::clone(&seen);
            events.subscribe_all(move |event| sink.borrow_mut().push(event.clone()));
            Self {
                board,
                players,
                rng: GameRng::new(3),
                events,
                seen,
            }
        }

        fn run(&mut self, action: &TileAction, actor: PlayerId, current: PlayerId) -> ResolveResult {
            let mut ctx = ActionContext::new(
                &self.board,
                &mut self.players,
                current,
                &mut self.rng,
                &mut self.events,
            );
            action.perform(actor, &mut ctx)
        }
    }

    #[test]
    fn test_ladder_moves_and_notifies() {
        let mut fx = Fixture::new(1);
        fx.players[0].place(TileId::new(3));
        let p0 = PlayerId::new(0);

        let result = fx.run(&TileAction::ladder(TileId::new(12)), p0, p0);
        assert_eq!(result, ResolveResult::Applied);
        assert_eq!(fx.players[0].tile(), TileId::new(12));
        assert_eq!(
            fx.seen.borrow().as_slice(),
            &[GameEvent::PlayerTeleported {
                player: p0,
                from: TileId::new(3),
                to: TileId::new(12),
            }]
        );
    }

    #[test]
    fn test_swap_needs_two_players() {
        let mut fx = Fixture::new(1);
        let p0 = PlayerId::new(0);
        fx.players[0].place(TileId::new(7));

        let result = fx.run(&TileAction::Swap, p0, p0);
        assert!(!result.is_applied());
        assert_eq!(fx.players[0].tile(), TileId::new(7));
        assert!(fx.seen.borrow().is_empty());
    }

    #[test]
    fn test_swap_notifies_only_for_current_player() {
        let mut fx = Fixture::new(2);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        fx.players[0].place(TileId::new(4));
        fx.players[1].place(TileId::new(9));

        assert!(fx.run(&TileAction::Swap, p0, p1).is_applied());
        assert_eq!(fx.players[0].tile(), TileId::new(9));
        assert_eq!(fx.players[1].tile(), TileId::new(4));
        assert!(fx.seen.borrow().is_empty());

        assert!(fx.run(&TileAction::Swap, p0, p0).is_applied());
        assert_eq!(
            fx.seen.borrow().as_slice(),
            &[GameEvent::PlayersSwapped { player: p0, other: p1 }]
        );
    }

    #[test]
    fn test_random_teleport_respects_margins() {
        let mut fx = Fixture::new(1);
        let p0 = PlayerId::new(0);
        let action = TileAction::random_teleport_within(2, 5);
        for _ in 0..50 {
            assert!(fx.run(&action, p0, p0).is_applied());
            let raw = fx.players[0].tile().raw();
            assert!((3..=15).contains(&raw), "landed on {}", raw);
        }

        let empty = TileAction::random_teleport_within(10, 10);
        assert!(!fx.run(&empty, p0, p0).is_applied());
    }

    #[test]
    fn test_capture_skips_safe_zone() {
        let mut fx = Fixture::new(2);
        let (p0, p1) = (PlayerId::new(0), PlayerId::new(1));
        fx.players[1].set_home(TileId::new(1));
        fx.players[0].place(TileId::new(6));
        fx.players[1].place(TileId::new(6));
        fx.board.set_safe_zone(TileId::new(6), true).unwrap();

        assert!(!fx.run(&TileAction::Capture, p0, p0).is_applied());
        assert_eq!(fx.players[1].tile(), TileId::new(6));

        fx.board.set_safe_zone(TileId::new(6), false).unwrap();
        assert!(fx.run(&TileAction::Capture, p0, p0).is_applied());
        assert_eq!(fx.players[1].tile(), TileId::new(1));
        assert!(fx.players[1].in_starting_area);
        assert!(fx.seen.borrow().contains(&GameEvent::PlayerCaptured {
            captor: p0,
            victim: p1,
        }));
    }

    #[test]
    fn test_thief_takes_everything() {
        let mut fx = Fixture::new(1);
        let p0 = PlayerId::new(0);
        fx.players[0].money = 450;
        fx.players[0].has_diamond = true;

        fx.run(&TileAction::Thief, p0, p0);
        assert_eq!(fx.players[0].money, 0);
        assert!(!fx.players[0].has_diamond);
    }

    #[test]
    fn test_treasure_and_diamond() {
        let mut fx = Fixture::new(1);
        let p0 = PlayerId::new(0);
        fx.players[0].money = 100;

        fx.run(&TileAction::treasure(600), p0, p0);
        fx.run(&TileAction::Diamond, p0, p0);
        assert_eq!(fx.players[0].money, 700);
        assert!(fx.players[0].has_diamond);

        let treasure_events = fx
            .seen
            .borrow()
            .iter()
            .filter(|event| event.family() == EventFamily::Treasure)
            .count();
        assert_eq!(treasure_events, 2);
    }

    #[test]
    fn test_jail_sets_missing_turn() {
        let mut fx = Fixture::new(1);
        let p0 = PlayerId::new(0);
        fx.run(&TileAction::go_to_jail(TileId::new(5)), p0, p0);
        assert_eq!(fx.players[0].tile(), TileId::new(5));
        assert!(fx.players[0].missing_turn);
    }
}
