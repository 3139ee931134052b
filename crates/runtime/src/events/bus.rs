//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::BattleEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Battle lifecycle (start, end, abort, fallen members)
    Battle,
    /// Turn flow (turn starts, executed actions, status changes)
    Turn,
    /// Combo chain (weakness, technical, knockdown, One More, finishers)
    Combo,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Battle, Topic::Turn, Topic::Combo];
}

struct Channels {
    battle: broadcast::Sender<BattleEvent>,
    turn: broadcast::Sender<BattleEvent>,
    combo: broadcast::Sender<BattleEvent>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<BattleEvent> {
        match topic {
            Topic::Battle => &self.battle,
            Topic::Turn => &self.turn,
            Topic::Combo => &self.combo,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Cloning shares the underlying channels.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            channels: Arc::new(Channels {
                battle: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
                combo: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: BattleEvent) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> Vec<(Topic, broadcast::Receiver<BattleEvent>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
