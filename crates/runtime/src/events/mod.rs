//! Topic-based event bus for battle events.
//!
//! The manager publishes every observable change here; presentation layers
//! and tooling subscribe to the topics they care about. Publishing never
//! fails and never blocks, with or without subscribers.

mod bus;
mod types;

pub use bus::{EventBus, Topic};
pub use types::BattleEvent;
