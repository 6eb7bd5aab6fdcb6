//! Messages that are not the reply to a command.
//!
//! Combat rounds and world ticks happen between commands; what they produce
//! is emitted here. Subscribers see messages in the order they were emitted.

use std::fmt;

/// Where a message came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// A combat round.
    Combat,
    /// An NPC returning to the world.
    Respawn,
    /// An NPC moving on its own.
    Wander,
    /// A skill coming off cooldown.
    Cooldown,
    /// Anything else.
    System,
}

/// One emitted message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameMessage {
    /// Origin.
    pub kind: MessageKind,
    /// Player-facing text.
    pub text: String,
}

impl GameMessage {
    /// Creates a message.
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

impl fmt::Display for GameMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Handle returned by [`MessageBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&GameMessage)>;

/// Typed publish/subscribe channel.
#[derive(Default)]
pub struct MessageBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl MessageBus {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameMessage) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Removes a subscriber. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Delivers one message to every subscriber, in subscription order.
    pub fn emit(&mut self, message: &GameMessage) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber(message);
        }
    }

    /// Delivers messages in order.
    pub fn emit_all<'a>(&mut self, messages: impl IntoIterator<Item = &'a GameMessage>) {
        for message in messages {
            self.emit(message);
        }
    }
}
