//! Typed publish/subscribe channels
//!
//! Every interaction surface (hover, trigger, drag, manipulation) is an
//! [`Event<T>`]. Handlers run synchronously, in subscription order, on the
//! thread that publishes.

use std::fmt;

use uuid::Uuid;

/// Handle returned by [`Event::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

type Handler<T> = Box<dyn FnMut(&T) + Send>;

/// A publish/subscribe channel for payloads of type `T`
pub struct Event<T> {
    handlers: Vec<(SubscriptionId, Handler<T>)>,
}

impl<T> Default for Event<T> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}

impl<T> Event<T> {
    /// Create a channel with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a handler. It runs after every handler subscribed before it.
    pub fn subscribe(&mut self, handler: impl FnMut(&T) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Invoke every handler with `args`
    pub fn publish(&mut self, args: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(args);
        }
    }

    /// Number of subscribers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drop every subscriber
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
