//! Signal subscription registry.
//!
//! The host emits view signals (resize, scroll, content/selection updates) into a
//! [`SignalHub`]. Every subscription returns a [`Subscription`] disposer; an overlay must hand
//! all of its disposers back on teardown so that no callback outlives the surface it draws on.

use std::fmt;

/// Signal callback function type
pub type SignalCallback<E> = Box<dyn FnMut(&E)>;

/// Identifier of a live subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Disposer handle returned by [`SignalHub::subscribe`].
///
/// Dropping the handle does **not** unsubscribe; pass it to [`SignalHub::unsubscribe`] (or call
/// [`Subscription::dispose`]).
#[must_use = "a subscription must be disposed on teardown"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: SubscriptionId,
}

impl Subscription {
    /// Id of the subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener from `hub`.
    pub fn dispose<E>(self, hub: &mut SignalHub<E>) -> bool {
        hub.unsubscribe(self)
    }
}

/// An observer registry for events of type `E`.
pub struct SignalHub<E> {
    next_id: u64,
    listeners: Vec<(SubscriptionId, SignalCallback<E>)>,
}

impl<E> SignalHub<E> {
    /// Create an empty hub.
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener.
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        Subscription { id }
    }

    /// Remove a listener. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription.id);
        self.listeners.len() != before
    }

    /// Notify every listener, in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, callback) in &mut self.listeners {
            callback(event);
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<E> Default for SignalHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for SignalHub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalHub")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
