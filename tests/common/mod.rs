//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use board_engine::{BoardGame, GameEvent};

/// Events captured by a recording subscriber, in delivery order.
pub type Recorder = Rc<RefCell<Vec<GameEvent>>>;

/// Subscribe a recorder to every event family.
pub fn record(game: &mut BoardGame) -> Recorder {
    let seen: Recorder = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    game.subscribe_all(move |event| sink.borrow_mut().push(event.clone()));
    seen
}

/// Count recorded events matching `pred`.
pub fn count(seen: &Recorder, pred: impl Fn(&GameEvent) -> bool) -> usize {
    seen.borrow().iter().filter(|event| pred(event)).count()
}
