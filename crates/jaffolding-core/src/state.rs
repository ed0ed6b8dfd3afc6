//! Reactive state cell
//!
//! [`State`] holds a single mutable value and notifies subscribers when it
//! changes. Notification is synchronous; there is no scheduler. Setting a
//! value that compares equal to the current one is suppressed so table and
//! chart consumers are not refreshed for no-op writes.

/// Identifies one subscription so it can be removed later.
pub type SubscriptionId = u64;

/// A single mutable value with change subscription.
pub struct State<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
    next_id: SubscriptionId,
}

impl<T: std::fmt::Debug> std::fmt::Debug for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> State<T> {
    /// Create a state cell with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Subscribe to changes. The listener is invoked immediately with the
    /// current value, then again on every effective [`State::set`].
    pub fn subscribe(&mut self, mut listener: impl FnMut(&T) + 'static) -> SubscriptionId {
        listener(&self.value);
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(listener)));
        id
    }

    /// Remove a subscription. Returns `false` if the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.subscribers {
            listener(&self.value);
        }
    }
}

impl<T: PartialEq> State<T> {
    /// Replace the value, notifying subscribers. A value equal to the
    /// current one is ignored.
    pub fn set(&mut self, value: T) {
        if self.value == value {
            return;
        }
        self.value = value;
        self.notify();
    }
}

impl<T> State<T> {
    /// Mutate the value in place and notify subscribers unconditionally.
    /// Useful for values without a cheap equality check.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.notify();
    }
}
