//! Session construction, player management and shared turn plumbing.

use im::Vector;
use log::{debug, info};

use super::snapshot::{PendingToken, TurnRecord};
use super::GameState;
use crate::board::{Board, TileId};
use crate::core::{Dice, GameError, GameRng, Player, PlayerId, Rejection};
use crate::effects::{ActionContext, ResolveResult, TileAction};
use crate::events::{EventBus, EventFamily, GameEvent, SubscriptionId};
use crate::rules::{keys, GameRules, GameType};

/// One game session.
///
/// Every operation is synchronous: by the time a call returns, its effects
/// have been applied and every subscriber has been notified.
///
/// ## Example
///
/// ```
/// use board_engine::board::{Board, TileId};
/// use board_engine::game::{BoardGame, GameState};
/// use board_engine::rules::{GameRules, GameType};
///
/// let board = Board::linear(GameType::SnakesAndLadders, 10).unwrap();
/// let mut game = BoardGame::new(board, GameRules::snakes_and_ladders(), 42).unwrap();
/// game.add_player("Ada", "red").unwrap();
/// game.add_player("Grace", "blue").unwrap();
/// game.start_game().unwrap();
///
/// while game.state() == GameState::Started {
///     game.play_turn().unwrap();
/// }
/// assert_eq!(game.player(game.winner().unwrap()).unwrap().tile(), TileId::new(10));
/// ```
pub struct BoardGame {
    pub(super) board: Board,
    pub(super) rules: GameRules,
    pub(super) dice: Dice,
    pub(super) players: Vec<Player>,
    /// Index into `players` of whose turn it is.
    pub(super) current: usize,
    pub(super) state: GameState,
    pub(super) winner: Option<PlayerId>,
    /// Stream for board effects (teleports, swaps). Dice have their own.
    pub(super) rng: GameRng,
    pub(super) events: EventBus,
    pub(super) consecutive_max: u32,
    pub(super) turn_number: u32,
    pub(super) history: Vector<TurnRecord>,
    /// Lost Diamond: token the current player must decide on.
    pub(super) pending: Option<PendingToken>,
    /// First tile of the board, where linear games place their pieces.
    pub(super) start: TileId,
}

impl BoardGame {
    /// Create a session.
    ///
    /// Fails if the rules and board are for different game types, if the
    /// dice shape is invalid, or if the board breaks a structural invariant.
    pub fn new(board: Board, rules: GameRules, seed: u64) -> Result<Self, GameError> {
        if rules.game_type != board.game_type() {
            return Err(GameError::GameTypeMismatch {
                rules: rules.game_type,
                board: board.game_type(),
            });
        }
        board.validate()?;
        let start = board.first_tile_id().ok_or(GameError::InvalidBoardSize)?;

        let rng = GameRng::new(seed);
        let dice = Dice::with_rng(rules.number_of_dice, rules.dice_sides, rng.for_context("dice"))?;

        info!(
            "new {} session `{}` on {} tiles",
            rules.game_type,
            rules.name,
            board.len()
        );

        Ok(Self {
            board,
            rules,
            dice,
            players: Vec::new(),
            current: 0,
            state: GameState::NotStarted,
            winner: None,
            rng: rng.for_context("board"),
            events: EventBus::new(),
            consecutive_max: 0,
            turn_number: 0,
            history: Vector::new(),
            pending: None,
            start,
        })
    }

    // === Players ===

    /// Bind a new player to the session. Only allowed before the start.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<PlayerId, Rejection> {
        if self.state != GameState::NotStarted {
            return Err(self.reject(Rejection::AlreadyStarted));
        }
        if self.players.len() >= PlayerId::MAX_PLAYERS {
            return Err(self.reject(Rejection::TooManyPlayers {
                max: PlayerId::MAX_PLAYERS,
            }));
        }

        let id = PlayerId::new(self.players.len() as u8);
        let player = Player::new(id, name, token, self.start);
        debug!("{} joined as {}", player, id);
        self.players.push(player);
        Ok(id)
    }

    /// Move out of `NotStarted` and place every piece.
    ///
    /// Linear games put everyone on the first tile. Lost Diamond hands out the
    /// starting cities in turn and pays the starting money.
    pub fn start_game(&mut self) -> Result<(), Rejection> {
        if self.state != GameState::NotStarted {
            return Err(self.reject(Rejection::AlreadyStarted));
        }
        if self.players.is_empty() {
            return Err(self.reject(Rejection::NoPlayers));
        }

        match self.rules.game_type {
            GameType::SnakesAndLadders | GameType::Ludo => {
                let in_starting_area = self.rules.start_only_with_max;
                for player in &mut self.players {
                    player.set_home(self.start);
                    player.place(self.start);
                    player.in_starting_area = in_starting_area;
                }
            }
            GameType::LostDiamond => {
                let cities = self.board.starting_cities();
                for (index, player) in self.players.iter_mut().enumerate() {
                    let city = cities.get(index % cities.len().max(1)).copied().unwrap_or(self.start);
                    player.set_home(city);
                    player.place(city);
                    player.money = self.rules.starting_money;
                }
            }
        }

        self.current = 0;
        self.set_state(GameState::Started);
        self.apply_emergency_money();
        Ok(())
    }

    // === Observers ===

    /// Listen on one event family.
    pub fn subscribe(
        &mut self,
        family: EventFamily,
        handler: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(family, handler)
    }

    /// Listen on every event family.
    pub fn subscribe_all(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.events.subscribe_all(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Queries ===

    #[must_use]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn dice(&self) -> &Dice {
        &self.dice
    }

    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id.index())
    }

    /// The player whose turn it is, once anyone has joined.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    #[must_use]
    pub fn current_player_id(&self) -> Option<PlayerId> {
        self.current_player().map(Player::id)
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Turns resolved so far, including extra turns.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    /// Every resolved roll or move, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<TurnRecord> {
        &self.history
    }

    /// Lost Diamond: the token waiting for the current player's decision.
    #[must_use]
    pub fn pending_token(&self) -> Option<&PendingToken> {
        self.pending.as_ref()
    }

    // === Shared plumbing ===

    /// Publish a rejection and hand it back to the caller.
    pub(super) fn reject(&mut self, reason: Rejection) -> Rejection {
        info!("rejected: {}", reason);
        let player = self.current_player_id();
        self.events.publish(GameEvent::ActionRejected {
            player,
            reason: reason.clone(),
        });
        reason
    }

    /// Reject unless the game is running and is a dice game when `linear` is set,
    /// or a travel game otherwise.
    pub(super) fn ensure_playing(&mut self, linear: bool) -> Result<PlayerId, Rejection> {
        if self.state != GameState::Started {
            let state = self.state;
            return Err(self.reject(Rejection::NotInProgress { state }));
        }
        if self.rules.game_type.is_linear() != linear {
            let game_type = self.rules.game_type;
            return Err(self.reject(Rejection::WrongGameType(game_type)));
        }
        match self.current_player_id() {
            Some(id) => Ok(id),
            None => Err(self.reject(Rejection::NoPlayers)),
        }
    }

    pub(super) fn set_state(&mut self, state: GameState) {
        info!("game state {} -> {}", self.state, state);
        self.state = state;
        self.events.publish(GameEvent::GameStateChanged { state });
    }

    /// Run a tile action for `actor` with the session lent as context.
    pub(super) fn run_action(&mut self, action: &TileAction, actor: PlayerId) -> ResolveResult {
        let current = self.current_player_id().unwrap_or(actor);
        let mut ctx = ActionContext::new(
            &self.board,
            &mut self.players,
            current,
            &mut self.rng,
            &mut self.events,
        );
        action.perform(actor, &mut ctx)
    }

    pub(super) fn finish(&mut self, winner: PlayerId) {
        self.winner = Some(winner);
        self.pending = None;
        self.set_state(GameState::Finished);
        info!("{} wins after {} turns", winner, self.turn_number);
        self.events.publish(GameEvent::GameWinner { player: winner });
    }

    pub(super) fn record(&mut self, player: PlayerId, roll: Option<u32>, from: TileId, to: TileId) {
        self.history.push_back(TurnRecord {
            turn: self.turn_number,
            player,
            roll,
            from,
            to,
        });
    }

    /// Close the current turn. Without an extra turn, play passes to the
    /// next player in join order.
    pub(super) fn end_turn(&mut self, extra_turn: bool) {
        self.turn_number += 1;
        if !extra_turn && !self.players.is_empty() {
            self.current = (self.current + 1) % self.players.len();
            self.consecutive_max = 0;
        }
        self.apply_emergency_money();
    }

    /// Lost Diamond: top up a current player who cannot afford any route.
    fn apply_emergency_money(&mut self) {
        if self.rules.game_type != GameType::LostDiamond {
            return;
        }
        let emergency =
            self.rules.get_int_additional(keys::EMERGENCY_MONEY, keys::DEFAULT_EMERGENCY_MONEY);
        if emergency <= 0 {
            return;
        }
        let Some(player) = self.players.get(self.current) else {
            return;
        };
        if player.money >= emergency {
            return;
        }
        let Ok(tile) = self.board.tile(player.tile()) else {
            return;
        };
        let stranded = tile
            .connections
            .values()
            .all(|route| !player.can_afford(self.rules.travel_cost(route.cost)));
        if !stranded {
            return;
        }

        let id = player.id();
        if let Some(player) = self.players.get_mut(self.current) {
            player.money = emergency;
        }
        debug!("{} is stranded, topped up to {} coins", id, emergency);
        self.events.publish(GameEvent::MoneyChanged {
            player: id,
            money: emergency,
        });
    }
}

impl std::fmt::Debug for BoardGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardGame")
            .field("game_type", &self.rules.game_type)
            .field("state", &self.state)
            .field("players", &self.players.len())
            .field("current", &self.current)
            .field("turn", &self.turn_number)
            .finish()
    }
}
