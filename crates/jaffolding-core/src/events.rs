//! Window lifecycle events
//!
//! The desktop broadcasts `windowopen`/`windowclose` as typed values
//! instead of DOM custom events. The desktop pushes into an [`EventQueue`];
//! the shell drains it after every operation and forwards each event to all
//! consumers before the next one is dispatched, which preserves the
//! synchronous-dispatch ordering the framework relies on.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Unique identifier for a window, assigned by the desktop on add.
pub type WindowId = u64;

/// A window lifecycle notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WindowEvent {
    /// A window was added to the desktop.
    Opened { id: WindowId },
    /// A window was closed and removed from the desktop.
    Closed { id: WindowId },
}

impl WindowEvent {
    /// The window the event refers to.
    pub fn window_id(&self) -> WindowId {
        match self {
            Self::Opened { id } | Self::Closed { id } => *id,
        }
    }
}

/// FIFO queue of pending lifecycle events.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<WindowEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn push(&mut self, event: WindowEvent) {
        trace!(?event, "lifecycle event queued");
        self.events.push_back(event);
    }

    /// Take the oldest pending event.
    pub fn pop(&mut self) -> Option<WindowEvent> {
        self.events.pop_front()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether any events are pending.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = EventQueue::new();
        queue.push(WindowEvent::Opened { id: 1 });
        queue.push(WindowEvent::Opened { id: 2 });
        queue.push(WindowEvent::Closed { id: 1 });

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(WindowEvent::Opened { id: 1 }));
        assert_eq!(queue.pop(), Some(WindowEvent::Opened { id: 2 }));
        assert_eq!(queue.pop(), Some(WindowEvent::Closed { id: 1 }));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_window_id_accessor() {
        assert_eq!(WindowEvent::Opened { id: 3 }.window_id(), 3);
        assert_eq!(WindowEvent::Closed { id: 9 }.window_id(), 9);
    }
}
