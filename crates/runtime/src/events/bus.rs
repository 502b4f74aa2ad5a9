//! Topic-based event bus implementation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::MatchEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Round boundaries
    Round,
    /// Resolved turns
    Action,
    /// Match results
    Outcome,
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing is best-effort: events sent while a
/// topic has no subscribers are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    round: broadcast::Sender<MatchEvent>,
    action: broadcast::Sender<MatchEvent>,
    outcome: broadcast::Sender<MatchEvent>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            round: broadcast::channel(capacity).0,
            action: broadcast::channel(capacity).0,
            outcome: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<MatchEvent> {
        match topic {
            Topic::Round => &self.round,
            Topic::Action => &self.action,
            Topic::Outcome => &self.outcome,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: MatchEvent) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<MatchEvent> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<MatchEvent>> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MatchId;

    #[tokio::test]
    async fn events_reach_only_their_topic() {
        let bus = EventBus::with_capacity(8);
        let mut rounds = bus.subscribe(Topic::Round);
        let mut outcomes = bus.subscribe(Topic::Outcome);

        bus.publish(MatchEvent::RoundStarted {
            match_id: MatchId(1),
            round: 1,
        });

        let event = rounds.recv().await.unwrap();
        assert_eq!(event.topic(), Topic::Round);
        assert_eq!(event.match_id(), MatchId(1));
        assert!(outcomes.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::default();
        bus.publish(MatchEvent::RoundEnded {
            match_id: MatchId(2),
            round: 1,
            game_over: false,
        });
        assert_eq!(bus.subscribe_multiple(&[Topic::Round, Topic::Action]).len(), 2);
    }
}
