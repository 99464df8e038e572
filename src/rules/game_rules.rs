//! Game rule configuration.
//!
//! `GameRules` parameterizes a session without subclassing it: dice shape,
//! rule toggles, starting money and an open extension map for per-variant
//! knobs. It performs no validation; the orchestrator checks cross-field
//! consistency where a value is actually used.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The rule family a board and rule set belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    SnakesAndLadders,
    Ludo,
    LostDiamond,
}

impl GameType {
    /// Whether the board is a linear tile chain (as opposed to a travel graph).
    #[must_use]
    pub const fn is_linear(self) -> bool {
        matches!(self, GameType::SnakesAndLadders | GameType::Ludo)
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GameType::SnakesAndLadders => "Snakes & Ladders",
            GameType::Ludo => "Ludo",
            GameType::LostDiamond => "Lost Diamond",
        };
        f.write_str(name)
    }
}

/// A value in the rules extension map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

impl From<i64> for RuleValue {
    fn from(value: i64) -> Self {
        RuleValue::Int(value)
    }
}

impl From<i32> for RuleValue {
    fn from(value: i32) -> Self {
        RuleValue::Int(i64::from(value))
    }
}

impl From<u32> for RuleValue {
    fn from(value: u32) -> Self {
        RuleValue::Int(i64::from(value))
    }
}

impl From<bool> for RuleValue {
    fn from(value: bool) -> Self {
        RuleValue::Bool(value)
    }
}

impl From<&str> for RuleValue {
    fn from(value: &str) -> Self {
        RuleValue::Text(value.to_string())
    }
}

impl From<String> for RuleValue {
    fn from(value: String) -> Self {
        RuleValue::Text(value)
    }
}

/// Extension keys understood by the engine.
///
/// Every key has a default that readers must pass explicitly.
pub mod keys {
    /// Base price to open a token. Default [`DEFAULT_TOKEN_PRICE`].
    pub const TOKEN_PRICE: &str = "tokenPrice";
    pub const DEFAULT_TOKEN_PRICE: i64 = 100;

    /// Upper bound of the random surcharge added per city. Default [`DEFAULT_TOKEN_PRICE_JITTER`].
    pub const TOKEN_PRICE_JITTER: &str = "tokenPriceJitter";
    pub const DEFAULT_TOKEN_PRICE_JITTER: i64 = 20;

    /// Percentage applied to every travel cost. Default 100.
    pub const TRAVEL_COST_MODIFIER: &str = "travelCostModifier";
    pub const DEFAULT_TRAVEL_COST_MODIFIER: i64 = 100;

    /// Roll needed to open a token for free. Defaults to `max_roll / 2 + 1`.
    pub const DICE_ROLL_THRESHOLD: &str = "diceRollThreshold";

    /// Whether a token may be opened with the dice. Default true.
    pub const ALLOW_DICE_FOR_TOKEN: &str = "allowDiceForToken";

    /// Money a stranded player is topped up to. 0 disables the policy.
    pub const EMERGENCY_MONEY: &str = "emergencyMoney";
    pub const DEFAULT_EMERGENCY_MONEY: i64 = 0;
}

/// Configuration for one game session.
///
/// ## Example
///
/// ```
/// use board_engine::rules::{GameRules, GameType};
///
/// let rules = GameRules::snakes_and_ladders()
///     .with_dice(2, 6)
///     .with_extra_turn_on_ladder(true);
///
/// assert_eq!(rules.game_type, GameType::SnakesAndLadders);
/// assert_eq!(rules.max_roll(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRules {
    /// Which family these rules drive.
    pub game_type: GameType,

    /// Human-readable rule set name.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// Selects the preset board layout.
    pub board_variant: String,

    /// Dice per roll.
    pub number_of_dice: u32,

    /// Faces per die.
    pub dice_sides: u32,

    /// Rolling the maximum grants another throw.
    pub extra_throw_on_max: bool,

    /// Ludo: a piece leaves its starting area only on a maximum roll.
    pub start_only_with_max: bool,

    /// Landing on a snake costs the next turn.
    pub skip_turn_on_snake: bool,

    /// Landing on a ladder grants another turn.
    pub extra_turn_on_ladder: bool,

    /// Consecutive maximum rolls that forfeit the move. 0 disables.
    pub consecutive_sixes_limit: u32,

    /// Lost Diamond: coins each player starts with.
    pub starting_money: i64,

    /// Per-variant tunables. See [`keys`].
    pub additional: BTreeMap<String, RuleValue>,
}

impl GameRules {
    /// Bare rules for a game type: one six-sided die, every toggle off.
    pub fn new(game_type: GameType, name: impl Into<String>) -> Self {
        Self {
            game_type,
            name: name.into(),
            description: String::new(),
            board_variant: "classic".to_string(),
            number_of_dice: 1,
            dice_sides: 6,
            extra_throw_on_max: false,
            start_only_with_max: false,
            skip_turn_on_snake: false,
            extra_turn_on_ladder: false,
            consecutive_sixes_limit: 0,
            starting_money: 0,
            additional: BTreeMap::new(),
        }
    }

    /// Standard Snakes & Ladders: one die, no bonus rules.
    pub fn snakes_and_ladders() -> Self {
        Self::new(GameType::SnakesAndLadders, "Snakes & Ladders")
            .with_description("Race to the last tile; ladders climb, snakes slide.")
    }

    /// Standard Ludo: leave home on a six, roll again on a six, three sixes forfeit.
    pub fn ludo() -> Self {
        let mut rules = Self::new(GameType::Ludo, "Ludo")
            .with_description("Leave home on a six and bring your piece to the goal.");
        rules.start_only_with_max = true;
        rules.extra_throw_on_max = true;
        rules.consecutive_sixes_limit = 3;
        rules
    }

    /// Standard Lost Diamond: 300 coins, 100-coin tokens, dice reveals allowed.
    pub fn lost_diamond() -> Self {
        Self::new(GameType::LostDiamond, "Lost Diamond")
            .with_description("Find the diamond and bring it back to a starting city.")
            .with_variant("africa")
            .with_starting_money(300)
            .with_additional(keys::TOKEN_PRICE, keys::DEFAULT_TOKEN_PRICE)
            .with_additional(keys::ALLOW_DICE_FOR_TOKEN, true)
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Select the board variant.
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.board_variant = variant.into();
        self
    }

    /// Set the dice shape.
    #[must_use]
    pub fn with_dice(mut self, count: u32, sides: u32) -> Self {
        self.number_of_dice = count;
        self.dice_sides = sides;
        self
    }

    /// Grant an extra throw on a maximum roll.
    #[must_use]
    pub fn with_extra_throw_on_max(mut self, enabled: bool) -> Self {
        self.extra_throw_on_max = enabled;
        self
    }

    /// Require a maximum roll to leave the starting area.
    #[must_use]
    pub fn with_start_only_with_max(mut self, enabled: bool) -> Self {
        self.start_only_with_max = enabled;
        self
    }

    /// Skip the next turn after a snake.
    #[must_use]
    pub fn with_skip_turn_on_snake(mut self, enabled: bool) -> Self {
        self.skip_turn_on_snake = enabled;
        self
    }

    /// Grant another turn after a ladder.
    #[must_use]
    pub fn with_extra_turn_on_ladder(mut self, enabled: bool) -> Self {
        self.extra_turn_on_ladder = enabled;
        self
    }

    /// Set the consecutive maximum-roll limit.
    #[must_use]
    pub fn with_consecutive_sixes_limit(mut self, limit: u32) -> Self {
        self.consecutive_sixes_limit = limit;
        self
    }

    /// Set the starting money.
    #[must_use]
    pub fn with_starting_money(mut self, money: i64) -> Self {
        self.starting_money = money;
        self
    }

    /// Set an extension value.
    #[must_use]
    pub fn with_additional(mut self, key: impl Into<String>, value: impl Into<RuleValue>) -> Self {
        self.set_additional(key, value);
        self
    }

    /// Highest possible dice total.
    #[must_use]
    pub fn max_roll(&self) -> u32 {
        self.number_of_dice * self.dice_sides
    }

    // === Extension map ===

    /// Get a raw extension value.
    #[must_use]
    pub fn get_additional(&self, key: &str) -> Option<&RuleValue> {
        self.additional.get(key)
    }

    /// Set an extension value.
    pub fn set_additional(&mut self, key: impl Into<String>, value: impl Into<RuleValue>) {
        self.additional.insert(key.into(), value.into());
    }

    /// Check whether an extension key is set.
    #[must_use]
    pub fn has_additional(&self, key: &str) -> bool {
        self.additional.contains_key(key)
    }

    /// Read an integer extension, falling back to `default` when unset or not an integer.
    #[must_use]
    pub fn get_int_additional(&self, key: &str, default: i64) -> i64 {
        match self.additional.get(key) {
            Some(RuleValue::Int(value)) => *value,
            _ => default,
        }
    }

    /// Read a boolean extension, falling back to `default` when unset or not a boolean.
    #[must_use]
    pub fn get_bool_additional(&self, key: &str, default: bool) -> bool {
        match self.additional.get(key) {
            Some(RuleValue::Bool(value)) => *value,
            _ => default,
        }
    }

    /// Read a text extension.
    #[must_use]
    pub fn get_text_additional(&self, key: &str) -> Option<&str> {
        match self.additional.get(key) {
            Some(RuleValue::Text(value)) => Some(value),
            _ => None,
        }
    }

    // === Derived tunables ===

    /// Roll needed to open a token for free.
    ///
    /// Not validated against [`max_roll`](Self::max_roll); callers check.
    #[must_use]
    pub fn dice_roll_threshold(&self) -> u32 {
        let computed = i64::from(self.max_roll() / 2 + 1);
        self.get_int_additional(keys::DICE_ROLL_THRESHOLD, computed)
            .clamp(0, i64::from(u32::MAX)) as u32
    }

    /// Apply the travel cost modifier (a percentage) to a base cost.
    #[must_use]
    pub fn travel_cost(&self, base: u32) -> i64 {
        let modifier = self.get_int_additional(
            keys::TRAVEL_COST_MODIFIER,
            keys::DEFAULT_TRAVEL_COST_MODIFIER,
        );
        (i64::from(base) * modifier.max(0)) / 100
    }
}
