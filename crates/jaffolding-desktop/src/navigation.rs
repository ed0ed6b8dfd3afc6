//! Mobile navigation history
//!
//! Below the mobile breakpoint the desktop behaves like a page stack:
//! opening a window pushes it onto a history, and back/forward/home move a
//! cursor through that history. Closed windows stay in the history but are
//! skipped during traversal, so back lands on the most recent window that
//! is still open.
//!
//! Horizontal swipes map to back (rightward) and forward (leftward) once
//! the displacement passes [`SWIPE_THRESHOLD`].

use jaffolding_core::WindowId;
use tracing::debug;

use crate::desktop::Desktop;
use crate::types::SWIPE_THRESHOLD;

/// Back/forward history for the mobile layout.
#[derive(Debug, Default)]
pub struct MobileNavigation {
    history: Vec<WindowId>,
    /// Index of the current entry. `None` before anything has opened.
    cursor: Option<usize>,
    touch_start_x: Option<f32>,
}

impl MobileNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// History entries, oldest first. Retains closed windows.
    pub fn history(&self) -> &[WindowId] {
        &self.history
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The window the cursor currently points at.
    pub fn current(&self) -> Option<WindowId> {
        self.cursor.map(|i| self.history[i])
    }

    /// Record a newly opened window. Any forward entries beyond the cursor
    /// are discarded, exactly like a browser history push.
    pub fn record_open(&mut self, id: WindowId) {
        match self.cursor {
            Some(i) => self.history.truncate(i + 1),
            None => self.history.clear(),
        }
        self.history.push(id);
        self.cursor = Some(self.history.len() - 1);
    }

    /// React to a window closing. If the closed window is the current one,
    /// navigate back to the nearest still-open entry, falling forward when
    /// nothing behind remains.
    pub fn handle_closed(&mut self, id: WindowId, desktop: &mut Desktop) {
        if self.current() != Some(id) {
            return;
        }
        if self.go_back(desktop).is_none() && self.go_forward(desktop).is_none() {
            debug!(id, "no open history entry left after close");
            self.cursor = None;
        }
    }

    /// Navigate back: scan from the cursor toward the oldest entry for a
    /// window still open on the desktop, activate it, and move the cursor.
    /// Returns the window reached, or `None` when there is nothing to go
    /// back to.
    pub fn go_back(&mut self, desktop: &mut Desktop) -> Option<WindowId> {
        let cursor = self.cursor?;
        for i in (0..cursor).rev() {
            let id = self.history[i];
            if desktop.contains(id) {
                self.cursor = Some(i);
                desktop.activate_window(id);
                return Some(id);
            }
        }
        None
    }

    /// Navigate forward, skipping closed entries.
    pub fn go_forward(&mut self, desktop: &mut Desktop) -> Option<WindowId> {
        let cursor = self.cursor?;
        for i in cursor + 1..self.history.len() {
            let id = self.history[i];
            if desktop.contains(id) {
                self.cursor = Some(i);
                desktop.activate_window(id);
                return Some(id);
            }
        }
        None
    }

    /// Jump to the oldest still-open entry.
    pub fn go_home(&mut self, desktop: &mut Desktop) -> Option<WindowId> {
        for (i, &id) in self.history.iter().enumerate() {
            if desktop.contains(id) {
                self.cursor = Some(i);
                desktop.activate_window(id);
                return Some(id);
            }
        }
        None
    }

    /// Record the starting x of a touch gesture.
    pub fn touch_start(&mut self, x: f32) {
        self.touch_start_x = Some(x);
    }

    /// Finish a touch gesture. A rightward swipe past the threshold goes
    /// back, a leftward one goes forward; anything shorter is ignored.
    pub fn touch_end(&mut self, x: f32, desktop: &mut Desktop) -> Option<WindowId> {
        let start = self.touch_start_x.take()?;
        let delta = x - start;
        if delta >= SWIPE_THRESHOLD {
            self.go_back(desktop)
        } else if delta <= -SWIPE_THRESHOLD {
            self.go_forward(desktop)
        } else {
            None
        }
    }
}
