//! Desktop: z-order, taskbar, dock, and activation
//!
//! The desktop owns the collection of open windows (insertion order, not
//! z-order), exactly one taskbar entry per open window, the dock with its
//! per-app running markers, and the single active window. Lifecycle
//! notifications go through the typed [`EventQueue`]; the shell drains it
//! and forwards to the navigation history and app manager.
//!
//! Operations on unknown window or app ids are no-ops with a logged
//! warning. Nothing here can halt the page.

use jaffolding_core::{EventQueue, WindowEvent, WindowId};
use tracing::{debug, warn};

use crate::apps::AppDescriptor;
use crate::error::{DesktopError, DesktopResult};
use crate::types::{Size, Vec2, MOBILE_BREAKPOINT};
use crate::window::{Window, WindowRegion};

/// One taskbar entry, created and removed in lockstep with its window.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub window_id: WindowId,
    /// Full window title, shown as a tooltip.
    pub title: String,
    /// Single-character label, the title's first character.
    pub label: String,
}

/// A dock entry: one launch affordance per registered app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DockEntry {
    pub app_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    /// Visual running marker, toggled by [`Desktop::update_dock`].
    pub running: bool,
}

/// A desktop launch icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DesktopIcon {
    pub app_id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

/// The desktop: open windows, taskbar, dock, active window.
pub struct Desktop {
    windows: Vec<Window>,
    taskbar: Vec<TaskbarEntry>,
    dock: Vec<DockEntry>,
    icons: Vec<DesktopIcon>,
    active: Option<WindowId>,
    viewport: Size,
    events: EventQueue,
    next_id: WindowId,
}

impl std::fmt::Debug for Desktop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Desktop")
            .field("windows", &self.windows.len())
            .field("taskbar", &self.taskbar.len())
            .field("active", &self.active)
            .field("viewport", &self.viewport)
            .finish()
    }
}

impl Desktop {
    /// Create a desktop for the given viewport size.
    pub fn new(viewport: Size) -> Self {
        Self {
            windows: Vec::new(),
            taskbar: Vec::new(),
            dock: Vec::new(),
            icons: Vec::new(),
            active: None,
            viewport,
            events: EventQueue::new(),
            next_id: 1,
        }
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Whether the viewport is below the mobile breakpoint.
    pub fn is_mobile(&self) -> bool {
        self.viewport.width < MOBILE_BREAKPOINT
    }

    /// Open windows in insertion order.
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Taskbar entries, always one per open window.
    pub fn taskbar(&self) -> &[TaskbarEntry] {
        &self.taskbar
    }

    pub fn dock(&self) -> &[DockEntry] {
        &self.dock
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    /// The currently active window, if any.
    pub fn active_window(&self) -> Option<WindowId> {
        self.active
    }

    /// Whether a window is still open on this desktop.
    pub fn contains(&self, id: WindowId) -> bool {
        self.windows.iter().any(|w| w.id == id)
    }

    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id == id)
    }

    /// Take the oldest pending lifecycle event. Drained by the shell.
    pub fn take_event(&mut self) -> Option<WindowEvent> {
        self.events.pop()
    }

    /// Add a window: assign its id, attach its content subtree, create the
    /// matching taskbar entry, activate it, and emit `Opened`.
    pub fn add_window(&mut self, mut window: Window) -> WindowId {
        let id = self.next_id;
        self.next_id += 1;
        window.id = id;
        if let Some(content) = window.content_mut() {
            content.attach();
        }

        let title = window.title().to_string();
        let label = title.chars().next().unwrap_or('?').to_string();
        self.windows.push(window);
        self.taskbar.push(TaskbarEntry {
            window_id: id,
            title,
            label,
        });

        self.activate_window(id);
        self.events.push(WindowEvent::Opened { id });
        id
    }

    /// Raise a window to the top: its z-order becomes the current maximum
    /// among siblings plus one.
    pub fn bring_to_front(&mut self, id: WindowId) {
        let top = self.windows.iter().map(Window::z_order).max().unwrap_or(0);
        match self.window_mut(id) {
            Some(window) => window.set_z(top + 1),
            None => warn!(id, "bring_to_front: unknown window"),
        }
    }

    /// Activate a window: raise it and record it as the single active
    /// window. Unknown ids are a logged no-op.
    pub fn activate_window(&mut self, id: WindowId) {
        if !self.contains(id) {
            warn!(id, "activate_window: unknown window");
            return;
        }
        self.bring_to_front(id);
        self.active = Some(id);
    }

    /// Close a window: run its close handling, drop it from the window
    /// collection and taskbar, clear the active slot if it was active, and
    /// emit `Closed` exactly once. Closing an unknown or already-closed
    /// window is a logged no-op.
    pub fn close_window(&mut self, id: WindowId) {
        let Some(index) = self.windows.iter().position(|w| w.id == id) else {
            warn!(id, "close_window: unknown window");
            return;
        };
        // Window::close is idempotent; only the first close emits.
        if !self.windows[index].close() {
            return;
        }
        self.windows.remove(index);
        self.taskbar.retain(|entry| entry.window_id != id);

        if self.active == Some(id) {
            // Deliberately no auto-activation of another window.
            self.active = None;
            debug!(id, "active window closed; active slot cleared");
        }
        self.events.push(WindowEvent::Closed { id });
    }

    /// Route a pointer-down. Hit-tests the topmost window under the
    /// pointer, then acts on the chrome region: buttons perform their
    /// action, the title bar starts a drag, the resize handle starts a
    /// resize, and content just activates.
    pub fn pointer_down(&mut self, pointer: Vec2) {
        let viewport = self.viewport;
        let Some((id, region)) = self.region_at(pointer) else {
            return;
        };
        self.activate_window(id);
        match region {
            WindowRegion::CloseButton => self.close_window(id),
            WindowRegion::MinimizeButton => {
                if let Some(window) = self.window_mut(id) {
                    window.toggle_minimize();
                }
            }
            WindowRegion::MaximizeButton => {
                if let Some(window) = self.window_mut(id) {
                    window.toggle_maximize(viewport);
                }
            }
            WindowRegion::TitleBar => {
                if let Some(window) = self.window_mut(id) {
                    window.start_drag(pointer);
                }
            }
            WindowRegion::ResizeHandle => {
                if let Some(window) = self.window_mut(id) {
                    window.start_resize(pointer);
                }
            }
            WindowRegion::Content => {}
        }
    }

    /// Route a pointer-move to whichever window has an active gesture.
    /// The listeners are global and installed once; each window filters by
    /// its own drag/resize flag, so this stays O(windows) with no
    /// per-gesture listener churn.
    pub fn pointer_move(&mut self, pointer: Vec2) {
        let viewport = self.viewport;
        for window in &mut self.windows {
            if window.is_dragging() || window.is_resizing() {
                window.pointer_move(pointer, viewport);
            }
        }
    }

    /// End all gestures. Safe with no gesture active; also used for
    /// pointer-cancel.
    pub fn pointer_up(&mut self) {
        for window in &mut self.windows {
            window.end_gesture();
        }
    }

    /// Topmost open window and chrome region under a point.
    fn region_at(&self, point: Vec2) -> Option<(WindowId, WindowRegion)> {
        self.windows
            .iter()
            .filter(|w| w.rect().contains(point))
            .max_by_key(|w| w.z_order())
            .and_then(|w| w.region_at(point).map(|region| (w.id, region)))
    }

    /// Build desktop launch icons from an app list, replacing any existing
    /// icons.
    pub fn create_desktop_icons(&mut self, apps: &[AppDescriptor]) {
        self.icons = apps
            .iter()
            .map(|app| DesktopIcon {
                app_id: app.id.clone(),
                name: app.name.clone(),
                icon: app.icon.clone(),
                color: app.color.clone(),
            })
            .collect();
    }

    /// Build the dock from an app list, replacing any existing entries.
    /// Running markers start cleared.
    pub fn create_dock(&mut self, apps: &[AppDescriptor]) {
        self.dock = apps
            .iter()
            .map(|app| DockEntry {
                app_id: app.id.clone(),
                name: app.name.clone(),
                icon: app.icon.clone(),
                color: app.color.clone(),
                running: false,
            })
            .collect();
    }

    /// Toggle the running marker on a dock entry. Purely presentational.
    pub fn update_dock(&mut self, app_id: &str, running: bool) {
        match self.dock.iter_mut().find(|entry| entry.app_id == app_id) {
            Some(entry) => entry.running = running,
            None => warn!(app_id, "update_dock: no dock entry"),
        }
    }

    /// Dock entry lookup, for callers that need to act on a miss.
    pub fn dock_entry(&self, app_id: &str) -> DesktopResult<&DockEntry> {
        self.dock
            .iter()
            .find(|entry| entry.app_id == app_id)
            .ok_or_else(|| DesktopError::DockEntryNotFound(app_id.to_string()))
    }

    /// Apply a new viewport size: re-clamp every window into the new
    /// bounds. Returns `true` when the mobile/desktop layout flipped so
    /// the shell can add or remove the mobile navigation.
    pub fn resize_viewport(&mut self, viewport: Size) -> bool {
        let was_mobile = self.is_mobile();
        self.viewport = viewport;
        for window in &mut self.windows {
            window.clamp_into(viewport);
        }
        was_mobile != self.is_mobile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaffolding_core::Element;
    use crate::types::Rect;

    const VIEWPORT: Size = Size {
        width: 1280.0,
        height: 800.0,
    };

    fn desktop() -> Desktop {
        Desktop::new(VIEWPORT)
    }

    fn titled(title: &str) -> Window {
        Window::new(title, Element::new("div"))
    }

    #[test]
    fn test_add_window_creates_taskbar_entry_and_activates() {
        let mut d = desktop();
        let a = d.add_window(titled("Alpha"));
        let b = d.add_window(titled("Beta"));

        assert_eq!(d.windows().len(), 2);
        assert_eq!(d.taskbar().len(), 2);
        assert_eq!(d.taskbar()[0].label, "A");
        assert_eq!(d.active_window(), Some(b));
        assert!(d.window(b).unwrap().z_order() > d.window(a).unwrap().z_order());

        assert_eq!(d.take_event(), Some(WindowEvent::Opened { id: a }));
        assert_eq!(d.take_event(), Some(WindowEvent::Opened { id: b }));
        assert_eq!(d.take_event(), None);
    }

    #[test]
    fn test_add_window_attaches_content() {
        let mut d = desktop();
        let id = d.add_window(titled("Alpha"));
        assert!(d.window(id).unwrap().content().unwrap().is_attached());
    }

    #[test]
    fn test_taskbar_matches_windows_across_lifecycle() {
        let mut d = desktop();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(d.add_window(titled(&format!("W{i}"))));
            assert_eq!(d.windows().len(), d.taskbar().len());
        }
        for id in ids {
            d.close_window(id);
            assert_eq!(d.windows().len(), d.taskbar().len());
        }
        assert!(d.windows().is_empty());
    }

    #[test]
    fn test_bring_to_front_beats_all_siblings() {
        let mut d = desktop();
        let a = d.add_window(titled("A"));
        let b = d.add_window(titled("B"));
        let c = d.add_window(titled("C"));

        d.bring_to_front(a);
        let za = d.window(a).unwrap().z_order();
        assert!(za > d.window(b).unwrap().z_order());
        assert!(za > d.window(c).unwrap().z_order());
    }

    #[test]
    fn test_close_active_window_clears_active_without_reactivation() {
        let mut d = desktop();
        let a = d.add_window(titled("A"));
        let b = d.add_window(titled("B"));

        d.close_window(b);
        assert_eq!(d.active_window(), None);
        assert!(d.contains(a));
    }

    #[test]
    fn test_close_inactive_window_keeps_active() {
        let mut d = desktop();
        let a = d.add_window(titled("A"));
        let b = d.add_window(titled("B"));

        d.close_window(a);
        assert_eq!(d.active_window(), Some(b));
    }

    #[test]
    fn test_close_emits_exactly_once() {
        let mut d = desktop();
        let a = d.add_window(titled("A"));
        while d.take_event().is_some() {}

        d.close_window(a);
        d.close_window(a); // unknown now, logged no-op
        assert_eq!(d.take_event(), Some(WindowEvent::Closed { id: a }));
        assert_eq!(d.take_event(), None);
    }

    #[test]
    fn test_unknown_ids_are_noops() {
        let mut d = desktop();
        d.activate_window(99);
        d.bring_to_front(99);
        d.close_window(99);
        d.update_dock("nope", true);
        assert_eq!(d.active_window(), None);
    }

    #[test]
    fn test_pointer_down_activates_topmost() {
        let mut d = desktop();
        let a = d.add_window(titled("A")); // both at default rect
        let b = d.add_window(titled("B"));
        assert_eq!(d.active_window(), Some(b));

        // Raise A, then click the shared area: A should win the hit test
        d.bring_to_front(a);
        d.pointer_down(Vec2::new(200.0, 200.0));
        assert_eq!(d.active_window(), Some(a));
    }

    #[test]
    fn test_pointer_drag_cycle() {
        let mut d = desktop();
        let id = d.add_window(titled("A"));

        d.pointer_down(Vec2::new(100.0, 60.0)); // title bar
        assert!(d.window(id).unwrap().is_dragging());

        d.pointer_move(Vec2::new(400.0, 300.0));
        let rect = d.window(id).unwrap().rect();
        assert_eq!(rect.position(), Vec2::new(350.0, 290.0));

        d.pointer_up();
        assert!(!d.window(id).unwrap().is_dragging());

        // Stray move after release must not drag anything
        d.pointer_move(Vec2::new(900.0, 700.0));
        assert_eq!(d.window(id).unwrap().rect(), rect);
    }

    #[test]
    fn test_pointer_down_close_button_closes() {
        let mut d = desktop();
        let id = d.add_window(titled("A"));
        // Default rect (50, 50, 400, 300); close button near (430, 68)
        d.pointer_down(Vec2::new(430.0, 68.0));
        assert!(!d.contains(id));
        assert_eq!(d.taskbar().len(), 0);
    }

    #[test]
    fn test_pointer_up_without_gesture_is_safe() {
        let mut d = desktop();
        d.add_window(titled("A"));
        d.pointer_up();
        d.pointer_move(Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_dock_running_marker() {
        let mut d = desktop();
        let apps = vec![AppDescriptor::new("calc", "Calculator", "=", "#5294e2")];
        d.create_dock(&apps);
        d.create_desktop_icons(&apps);
        assert_eq!(d.dock().len(), 1);
        assert_eq!(d.icons().len(), 1);
        assert!(!d.dock()[0].running);

        d.update_dock("calc", true);
        assert!(d.dock()[0].running);
        d.update_dock("calc", false);
        assert!(!d.dock()[0].running);

        assert!(d.dock_entry("calc").is_ok());
        assert!(matches!(
            d.dock_entry("ghost"),
            Err(DesktopError::DockEntryNotFound(_))
        ));
    }

    #[test]
    fn test_resize_viewport_reclamps_and_reports_breakpoint() {
        let mut d = desktop();
        let id = d.add_window(titled("A"));
        d.window_mut(id).unwrap().set_position(1000.0, 700.0);

        assert!(!d.is_mobile());
        let flipped = d.resize_viewport(Size::new(600.0, 500.0));
        assert!(flipped);
        assert!(d.is_mobile());

        let rect = d.window(id).unwrap().rect();
        assert!(rect.right() <= 600.0);
        assert!(rect.bottom() <= 500.0);

        assert!(!d.resize_viewport(Size::new(640.0, 480.0)));
    }

    #[test]
    fn test_resize_viewport_tracks_maximized_windows() {
        let mut d = desktop();
        let id = d.add_window(titled("A"));
        let viewport = d.viewport();
        d.window_mut(id).unwrap().toggle_maximize(viewport);

        d.resize_viewport(Size::new(1024.0, 768.0));
        assert_eq!(
            d.window(id).unwrap().rect(),
            Rect::new(0.0, 0.0, 1024.0, 768.0)
        );
    }
}
