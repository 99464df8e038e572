//! Synchronous event bus.
//!
//! Subscribers register a handler on one or more [`EventFamily`] channels.
//! Publishing logs the event, then calls every handler on its channel in
//! registration order before returning. Handlers only see `&GameEvent`, so
//! they cannot reach back into the engine.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::event::{EventFamily, GameEvent};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subscription({})", self.0)
    }
}

/// Event handler callback.
pub type Handler = Box<dyn FnMut(&GameEvent)>;

/// Per-family fan-out of game events.
///
/// ## Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use board_engine::events::{EventBus, EventFamily, GameEvent};
/// use board_engine::core::PlayerId;
///
/// let mut bus = EventBus::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// bus.subscribe(EventFamily::Lifecycle, move |event| sink.borrow_mut().push(event.clone()));
///
/// bus.publish(GameEvent::GameWinner { player: PlayerId::new(0) });
/// bus.publish(GameEvent::PlayerExtraTurn { player: PlayerId::new(0) });
///
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    handlers: FxHashMap<SubscriptionId, Handler>,

    /// Subscription ids per family, in registration order.
    channels: FxHashMap<EventFamily, Vec<SubscriptionId>>,

    next_id: u32,

    published: u64,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Listen on a single family.
    pub fn subscribe(
        &mut self,
        family: EventFamily,
        handler: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        self.subscribe_to(&[family], handler)
    }

    /// Listen on several families with one handler.
    pub fn subscribe_to(
        &mut self,
        families: &[EventFamily],
        handler: impl FnMut(&GameEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        self.handlers.insert(id, Box::new(handler));
        for &family in families {
            let channel = self.channels.entry(family).or_default();
            if !channel.contains(&id) {
                channel.push(id);
            }
        }
        id
    }

    /// Listen on every family.
    pub fn subscribe_all(&mut self, handler: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.subscribe_to(&EventFamily::ALL, handler)
    }

    /// Remove a subscription. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if self.handlers.remove(&id).is_none() {
            return false;
        }
        for channel in self.channels.values_mut() {
            channel.retain(|&sub| sub != id);
        }
        true
    }

    /// Deliver an event to every handler on its channel.
    pub fn publish(&mut self, event: GameEvent) {
        log::debug!("[{:?}] {}", event.family(), event);
        self.published += 1;

        let Some(channel) = self.channels.get(&event.family()) else {
            return;
        };
        for id in channel {
            if let Some(handler) = self.handlers.get_mut(id) {
                handler(&event);
            }
        }
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }

    /// Number of subscriptions listening on `family`.
    #[must_use]
    pub fn listeners(&self, family: EventFamily) -> usize {
        self.channels.get(&family).map_or(0, Vec::len)
    }

    /// Total events published so far.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.published
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .field("published", &self.published)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::core::PlayerId;

    fn extra_turn() -> GameEvent {
        GameEvent::PlayerExtraTurn {
            player: PlayerId::new(0),
        }
    }

    #[test]
    fn test_registration_order() {
        let mut bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            bus.subscribe(EventFamily::Turn, move |_| order.borrow_mut().push(tag));
        }
        bus.publish(extra_turn());

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_family_filtering() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        bus.subscribe(EventFamily::Capture, move |_| *counter.borrow_mut() += 1);

        bus.publish(extra_turn());
        assert_eq!(*count.borrow(), 0);
        assert_eq!(bus.published(), 1);

        bus.publish(GameEvent::PlayerCaptured {
            captor: PlayerId::new(0),
            victim: PlayerId::new(1),
        });
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_subscribe_all_and_unsubscribe() {
        let mut bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&count);
        let id = bus.subscribe_all(move |_| *counter.borrow_mut() += 1);

        for family in EventFamily::ALL {
            assert_eq!(bus.listeners(family), 1);
        }

        bus.publish(extra_turn());
        assert!(bus.unsubscribe(id));
        assert!(!bus.unsubscribe(id));
        bus.publish(extra_turn());

        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
