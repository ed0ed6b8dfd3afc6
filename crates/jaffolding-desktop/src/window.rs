//! Window state machine
//!
//! A [`Window`] wraps arbitrary content in draggable/resizable chrome and
//! owns its own interaction state. Gesture state (idle/dragging/resizing)
//! is orthogonal to display mode (normal/minimized/maximized); dragging and
//! resizing are mutually exclusive and both disabled while maximized.
//!
//! Pointer math runs synchronously in the move handlers and clamps on every
//! move, so a window can never be dragged fully outside the viewport.

use jaffolding_core::{Element, WindowId};
use tracing::debug;

use crate::types::{sanitize, Rect, Size, Vec2, CHROME, MIN_WINDOW_SIZE};

/// Capability flags for a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowFlags {
    pub draggable: bool,
    pub resizable: bool,
    pub closeable: bool,
    pub minimizable: bool,
    pub maximizable: bool,
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self {
            draggable: true,
            resizable: true,
            closeable: true,
            minimizable: true,
            maximizable: true,
        }
    }
}

/// Active pointer interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Pointer offset from the window's top-left corner at drag start.
    Dragging { offset: Vec2 },
    /// Pointer position and window size at resize start.
    Resizing {
        start_pointer: Vec2,
        start_size: Size,
    },
}

/// Display mode. Saved geometry is written exactly once on each transition
/// and consumed exactly once on restore; the enum payload enforces that.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum WindowMode {
    #[default]
    Normal,
    /// Collapsed to the title bar. `from_maximized` remembers the rect to
    /// return to when the window was maximized before being minimized.
    Minimized {
        saved_height: f32,
        from_maximized: Option<Rect>,
    },
    Maximized { saved: Rect },
}

/// Chrome region under a pointer position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowRegion {
    TitleBar,
    CloseButton,
    MinimizeButton,
    MaximizeButton,
    ResizeHandle,
    Content,
}

/// A draggable, resizable, closeable, minimizable, maximizable window.
///
/// Window variants are composition, not subclassing: callers supply the
/// content subtree and optional close callback, never a derived type.
pub struct Window {
    pub(crate) id: WindowId,
    title: String,
    content: Option<Element>,
    rect: Rect,
    flags: WindowFlags,
    gesture: Gesture,
    mode: WindowMode,
    z: u32,
    open: bool,
    on_close: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("rect", &self.rect)
            .field("mode", &self.mode)
            .field("gesture", &self.gesture)
            .field("z", &self.z)
            .field("open", &self.open)
            .finish()
    }
}

impl Window {
    /// Create a window with default geometry (50, 50, 400×300).
    pub fn new(title: impl Into<String>, content: Element) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: Some(content),
            rect: Rect::new(50.0, 50.0, 400.0, 300.0),
            flags: WindowFlags::default(),
            gesture: Gesture::Idle,
            mode: WindowMode::Normal,
            z: 0,
            open: true,
            on_close: None,
        }
    }

    /// Create a window with no content. Renders an empty content area.
    pub fn empty(title: impl Into<String>) -> Self {
        let mut window = Self::new(title, Element::new("div"));
        window.content = None;
        window
    }

    /// Builder: initial geometry.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.set_position(rect.x, rect.y);
        self.set_size(rect.width, rect.height);
        self
    }

    /// Builder: capability flags.
    pub fn with_flags(mut self, flags: WindowFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Builder: close callback, invoked at most once.
    pub fn on_close(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn mode(&self) -> WindowMode {
        self.mode
    }

    pub fn z_order(&self) -> u32 {
        self.z
    }

    pub(crate) fn set_z(&mut self, z: u32) {
        self.z = z;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_minimized(&self) -> bool {
        matches!(self.mode, WindowMode::Minimized { .. })
    }

    pub fn is_maximized(&self) -> bool {
        matches!(self.mode, WindowMode::Maximized { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn is_resizing(&self) -> bool {
        matches!(self.gesture, Gesture::Resizing { .. })
    }

    /// Content subtree, if any.
    pub fn content(&self) -> Option<&Element> {
        self.content.as_ref()
    }

    /// Mutable content subtree.
    pub fn content_mut(&mut self) -> Option<&mut Element> {
        self.content.as_mut()
    }

    /// Move the window. Non-finite and negative coordinates are clamped.
    /// Ignored while maximized: geometry is not user-editable until restore.
    pub fn set_position(&mut self, x: f32, y: f32) {
        if self.is_maximized() {
            return;
        }
        self.rect.x = sanitize(x).max(0.0);
        self.rect.y = sanitize(y).max(0.0);
    }

    /// Resize the window, floored at the 200×150 minimum. Ignored while
    /// maximized.
    pub fn set_size(&mut self, width: f32, height: f32) {
        if self.is_maximized() {
            return;
        }
        self.rect.width = sanitize(width).max(MIN_WINDOW_SIZE.width);
        self.rect.height = sanitize(height).max(MIN_WINDOW_SIZE.height);
    }

    /// Begin a drag. No-op while maximized, closed, or not draggable.
    pub fn start_drag(&mut self, pointer: Vec2) {
        if !self.open || !self.flags.draggable || self.is_maximized() {
            return;
        }
        self.gesture = Gesture::Dragging {
            offset: pointer - self.rect.position(),
        };
    }

    /// Begin a resize. No-op while maximized, minimized, closed, or not
    /// resizable.
    pub fn start_resize(&mut self, pointer: Vec2) {
        if !self.open || !self.flags.resizable || self.is_maximized() || self.is_minimized() {
            return;
        }
        self.gesture = Gesture::Resizing {
            start_pointer: pointer,
            start_size: self.rect.size(),
        };
    }

    /// Route a pointer-move into the active gesture. Drags clamp on every
    /// move so the window's bounding box stays within the viewport; resizes
    /// floor at the minimum size.
    pub fn pointer_move(&mut self, pointer: Vec2, viewport: Size) {
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging { offset } => {
                let target = pointer - offset;
                let max_x = (viewport.width - self.rect.width).max(0.0);
                let max_y = (viewport.height - self.rect.height).max(0.0);
                self.rect.x = sanitize(target.x).clamp(0.0, max_x);
                self.rect.y = sanitize(target.y).clamp(0.0, max_y);
            }
            Gesture::Resizing {
                start_pointer,
                start_size,
            } => {
                let delta = pointer - start_pointer;
                self.rect.width =
                    sanitize(start_size.width + delta.x).max(MIN_WINDOW_SIZE.width);
                self.rect.height =
                    sanitize(start_size.height + delta.y).max(MIN_WINDOW_SIZE.height);
            }
        }
    }

    /// End any active gesture. Unconditional and idempotent; safe to call
    /// on pointer-up, pointer-cancel, or close with no gesture running.
    pub fn end_gesture(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Toggle minimized. On minimize the current height is saved and the
    /// window collapses to its title bar; restore reapplies the saved
    /// height. Width is unaffected. A maximized window stays logically
    /// maximized and returns to the maximized rect on restore.
    pub fn toggle_minimize(&mut self) {
        if !self.flags.minimizable {
            return;
        }
        match self.mode {
            WindowMode::Normal => {
                self.mode = WindowMode::Minimized {
                    saved_height: self.rect.height,
                    from_maximized: None,
                };
                self.rect.height = CHROME.title_bar_height;
            }
            WindowMode::Maximized { saved } => {
                self.mode = WindowMode::Minimized {
                    saved_height: self.rect.height,
                    from_maximized: Some(saved),
                };
                self.rect.height = CHROME.title_bar_height;
            }
            WindowMode::Minimized {
                saved_height,
                from_maximized,
            } => {
                self.rect.height = saved_height;
                self.mode = match from_maximized {
                    Some(saved) => WindowMode::Maximized { saved },
                    None => WindowMode::Normal,
                };
            }
        }
    }

    /// Toggle maximized against the given viewport. On maximize the full
    /// rect is saved and the window fills the viewport; restore reapplies
    /// the saved rect exactly. Toggling while minimized restores the
    /// minimize first, then maximizes.
    pub fn toggle_maximize(&mut self, viewport: Size) {
        if !self.flags.maximizable {
            return;
        }
        if self.is_minimized() {
            self.toggle_minimize();
        }
        match self.mode {
            WindowMode::Normal => {
                self.mode = WindowMode::Maximized { saved: self.rect };
                self.rect = Rect::new(0.0, 0.0, viewport.width, viewport.height);
            }
            WindowMode::Maximized { saved } => {
                self.rect = saved;
                self.mode = WindowMode::Normal;
            }
            WindowMode::Minimized { .. } => unreachable!("restored above"),
        }
    }

    /// Close the window: detach the content subtree, zero out interaction
    /// state, and fire the close callback. Returns `true` the first time;
    /// every later call is a no-op returning `false`.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.end_gesture();
        if let Some(content) = &mut self.content {
            content.detach();
        }
        if let Some(callback) = self.on_close.take() {
            callback();
        }
        debug!(id = self.id, title = %self.title, "window closed");
        true
    }

    /// Pull the window back inside the viewport after a viewport resize.
    pub fn clamp_into(&mut self, viewport: Size) {
        if self.is_maximized() {
            self.rect = Rect::new(0.0, 0.0, viewport.width, viewport.height);
            return;
        }
        if self.rect.right() > viewport.width {
            self.rect.x = (viewport.width - self.rect.width).max(0.0);
        }
        if self.rect.bottom() > viewport.height {
            self.rect.y = (viewport.height - self.rect.height).max(0.0);
        }
    }

    /// Hit-test the window chrome. Returns `None` when the point is
    /// outside the window or the window is closed.
    pub fn region_at(&self, point: Vec2) -> Option<WindowRegion> {
        if !self.open || !self.rect.contains(point) {
            return None;
        }

        // Title bar band, buttons right-aligned: close, maximize, minimize
        // from the right edge inward.
        if point.y < self.rect.y + CHROME.title_bar_height {
            let button_top = self.rect.y + (CHROME.title_bar_height - CHROME.button_size) / 2.0;
            let in_button_band =
                point.y >= button_top && point.y < button_top + CHROME.button_size;
            if in_button_band {
                let mut right = self.rect.right() - CHROME.button_margin;
                let order = [
                    (self.flags.closeable, WindowRegion::CloseButton),
                    (self.flags.maximizable, WindowRegion::MaximizeButton),
                    (self.flags.minimizable, WindowRegion::MinimizeButton),
                ];
                for (enabled, region) in order {
                    if !enabled {
                        continue;
                    }
                    if point.x >= right - CHROME.button_size && point.x < right {
                        return Some(region);
                    }
                    right -= CHROME.button_size + CHROME.button_gap;
                }
            }
            return Some(WindowRegion::TitleBar);
        }

        // Resize handle in the bottom-right corner, only in normal mode.
        if self.flags.resizable && matches!(self.mode, WindowMode::Normal) {
            let handle = Rect::new(
                self.rect.right() - CHROME.resize_handle_size,
                self.rect.bottom() - CHROME.resize_handle_size,
                CHROME.resize_handle_size,
                CHROME.resize_handle_size,
            );
            if handle.contains(point) {
                return Some(WindowRegion::ResizeHandle);
            }
        }

        Some(WindowRegion::Content)
    }
}
