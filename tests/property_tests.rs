//! Property tests for dice ranges, movement clamping and whole games.

use board_engine::{
    Board, BoardGame, Dice, GameEvent, GameRules, GameState, GameType, TileId,
};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

proptest! {
    #[test]
    fn dice_stay_in_range(count in 1u32..6, sides in 1u32..21, seed in any::<u64>()) {
        let mut dice = Dice::new(count, sides, seed).unwrap();
        for _ in 0..20 {
            let total = dice.roll();
            prop_assert!(total >= count && total <= count * sides);
            prop_assert_eq!(dice.values().len(), count as usize);
            prop_assert!(dice.values().iter().all(|&v| (1..=sides).contains(&v)));
            prop_assert_eq!(dice.values().iter().sum::<u32>(), total);
        }
    }

    #[test]
    fn die_index_is_one_based(count in 1u32..6, seed in any::<u64>()) {
        let dice = Dice::new(count, 6, seed).unwrap();
        prop_assert!(dice.die(0).is_err());
        prop_assert!(dice.die(count as usize).is_ok());
        prop_assert!(dice.die(count as usize + 1).is_err());
    }

    #[test]
    fn movement_clamps_at_last_tile(size in 1u32..150, start in 1u32..150, steps in 0u32..40) {
        let start = start.min(size);
        let board = Board::linear(GameType::SnakesAndLadders, size).unwrap();
        let landed = board.advance(TileId::new(start), steps).unwrap();
        prop_assert_eq!(landed, TileId::new((start + steps).min(size)));
    }

    #[test]
    fn games_end_with_one_winner(seed in any::<u64>(), players in 1usize..5) {
        let board = Board::linear(GameType::SnakesAndLadders, 30).unwrap();
        let rules = GameRules::snakes_and_ladders().with_extra_throw_on_max(true);
        let mut game = BoardGame::new(board, rules, seed).unwrap();
        for i in 0..players {
            game.add_player(format!("p{}", i), "red").unwrap();
        }
        let winners = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&winners);
        game.subscribe_all(move |event| {
            if matches!(event, GameEvent::GameWinner { .. }) {
                *sink.borrow_mut() += 1;
            }
        });
        game.start_game().unwrap();

        while game.state() == GameState::Started {
            game.play_turn().unwrap();
            for player in game.players() {
                prop_assert!(game.board().contains(player.tile()));
            }
        }
        prop_assert_eq!(*winners.borrow(), 1);
        let winner = game.winner().unwrap();
        prop_assert_eq!(game.player(winner).unwrap().tile(), TileId::new(30));
    }
}
