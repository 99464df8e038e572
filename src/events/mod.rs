//! Observer layer: the event vocabulary and the bus that delivers it.
//!
//! The orchestrator owns one [`EventBus`] and is the only publisher.

mod bus;
mod event;

pub use bus::{EventBus, Handler, SubscriptionId};
pub use event::{EventFamily, GameEvent};
