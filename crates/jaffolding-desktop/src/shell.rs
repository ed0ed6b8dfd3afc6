//! Shell: the composition root
//!
//! The shell owns the desktop, the app manager, and (below the mobile
//! breakpoint) the navigation history, and wires them together explicitly.
//! Window lifecycle flows one way: desktop operations push typed events
//! onto the queue, and [`Shell::pump`] drains it in FIFO order, forwarding
//! each event synchronously to the app manager and navigation. No
//! observer ever holds a reference into another; everything is passed in
//! per call.
//!
//! Every public entry point that can emit events pumps before returning,
//! so callers always observe a settled state.

use jaffolding_core::{WindowEvent, WindowId};
use tracing::info;

use crate::apps::{AppDefinition, AppManager};
use crate::desktop::Desktop;
use crate::navigation::MobileNavigation;
use crate::types::{Size, Vec2};
use crate::window::Window;

/// Top-level shell tying the desktop subsystems together.
pub struct Shell {
    desktop: Desktop,
    apps: AppManager,
    navigation: Option<MobileNavigation>,
}

impl std::fmt::Debug for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shell")
            .field("desktop", &self.desktop)
            .field("apps", &self.apps)
            .field("mobile", &self.navigation.is_some())
            .finish()
    }
}

impl Shell {
    /// Create a shell for the given viewport. The mobile navigation is
    /// present only while the viewport is below the breakpoint.
    pub fn new(viewport: Size) -> Self {
        let desktop = Desktop::new(viewport);
        let navigation = desktop.is_mobile().then(MobileNavigation::new);
        info!(
            width = viewport.width,
            height = viewport.height,
            mobile = navigation.is_some(),
            "shell initialized"
        );
        Self {
            desktop,
            apps: AppManager::new(),
            navigation,
        }
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut Desktop {
        &mut self.desktop
    }

    pub fn apps(&self) -> &AppManager {
        &self.apps
    }

    pub fn navigation(&self) -> Option<&MobileNavigation> {
        self.navigation.as_ref()
    }

    /// Register an app and rebuild the dock and desktop icons to match the
    /// registry.
    pub fn register_app(&mut self, app: AppDefinition) {
        self.apps.register(app);
        let descriptors = self.apps.descriptors();
        self.desktop.create_dock(&descriptors);
        self.desktop.create_desktop_icons(&descriptors);
    }

    /// Drain pending lifecycle events, oldest first, and forward each to
    /// the app manager and the navigation history.
    pub fn pump(&mut self) {
        while let Some(event) = self.desktop.take_event() {
            match event {
                WindowEvent::Opened { id } => {
                    if let Some(nav) = &mut self.navigation {
                        nav.record_open(id);
                    }
                }
                WindowEvent::Closed { id } => {
                    self.apps.handle_closed(id, &mut self.desktop);
                    if let Some(nav) = &mut self.navigation {
                        nav.handle_closed(id, &mut self.desktop);
                    }
                }
            }
        }
    }

    /// Launch an app by id. Unknown ids are a logged no-op.
    pub fn launch(&mut self, app_id: &str) -> Option<WindowId> {
        let id = self.apps.launch_app(app_id, &mut self.desktop);
        self.pump();
        id
    }

    /// Add a window that does not belong to a registered app.
    pub fn open_window(&mut self, window: Window) -> WindowId {
        let id = self.desktop.add_window(window);
        self.pump();
        id
    }

    pub fn close_window(&mut self, id: WindowId) {
        self.desktop.close_window(id);
        self.pump();
    }

    /// Dock click: focus the app when it is already running, otherwise
    /// launch a new instance.
    pub fn dock_clicked(&mut self, app_id: &str) {
        if self.apps.is_app_running(app_id) {
            self.apps.focus_app(app_id, &mut self.desktop);
        } else {
            self.apps.launch_app(app_id, &mut self.desktop);
        }
        self.pump();
    }

    /// Taskbar click: restore the window if minimized, then activate it.
    pub fn taskbar_clicked(&mut self, id: WindowId) {
        if let Some(window) = self.desktop.window_mut(id) {
            if window.is_minimized() {
                window.toggle_minimize();
            }
        }
        self.desktop.activate_window(id);
    }

    pub fn pointer_down(&mut self, pointer: Vec2) {
        self.desktop.pointer_down(pointer);
        self.pump();
    }

    pub fn pointer_move(&mut self, pointer: Vec2) {
        self.desktop.pointer_move(pointer);
    }

    pub fn pointer_up(&mut self) {
        self.desktop.pointer_up();
    }

    pub fn touch_start(&mut self, x: f32) {
        if let Some(nav) = &mut self.navigation {
            nav.touch_start(x);
        }
    }

    pub fn touch_end(&mut self, x: f32) {
        if let Some(nav) = &mut self.navigation {
            nav.touch_end(x, &mut self.desktop);
        }
    }

    pub fn navigate_back(&mut self) -> Option<WindowId> {
        self.navigation.as_mut()?.go_back(&mut self.desktop)
    }

    pub fn navigate_forward(&mut self) -> Option<WindowId> {
        self.navigation.as_mut()?.go_forward(&mut self.desktop)
    }

    pub fn navigate_home(&mut self) -> Option<WindowId> {
        self.navigation.as_mut()?.go_home(&mut self.desktop)
    }

    /// Apply a viewport resize. Crossing the mobile breakpoint installs or
    /// removes the navigation history; entering mobile seeds it with the
    /// windows already open, oldest first.
    pub fn resize(&mut self, viewport: Size) {
        if !self.desktop.resize_viewport(viewport) {
            return;
        }
        if self.desktop.is_mobile() {
            let mut nav = MobileNavigation::new();
            for window in self.desktop.windows() {
                nav.record_open(window.id());
            }
            info!("entering mobile layout");
            self.navigation = Some(nav);
        } else {
            info!("leaving mobile layout");
            self.navigation = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::AppDescriptor;
    use jaffolding_core::Element;

    const DESKTOP_VIEWPORT: Size = Size {
        width: 1280.0,
        height: 800.0,
    };
    const MOBILE_VIEWPORT: Size = Size {
        width: 390.0,
        height: 844.0,
    };

    fn shell_with_calc(viewport: Size) -> Shell {
        let mut shell = Shell::new(viewport);
        shell.register_app(AppDefinition::new(
            AppDescriptor::new("calc", "Calculator", "=", "#5294e2"),
            || Window::new("Calculator", Element::new("div")),
        ));
        shell
    }

    #[test]
    fn test_desktop_shell_has_no_navigation() {
        let shell = shell_with_calc(DESKTOP_VIEWPORT);
        assert!(shell.navigation().is_none());
        assert_eq!(shell.desktop().dock().len(), 1);
        assert_eq!(shell.desktop().icons().len(), 1);
    }

    #[test]
    fn test_dock_click_launches_then_focuses() {
        let mut shell = shell_with_calc(DESKTOP_VIEWPORT);

        shell.dock_clicked("calc");
        assert_eq!(shell.desktop().windows().len(), 1);

        // Second click focuses instead of launching another instance
        shell.dock_clicked("calc");
        assert_eq!(shell.desktop().windows().len(), 1);
    }

    #[test]
    fn test_close_clears_dock_marker_via_pump() {
        let mut shell = shell_with_calc(DESKTOP_VIEWPORT);
        let id = shell.launch("calc").unwrap();
        assert!(shell.desktop().dock()[0].running);

        shell.close_window(id);
        assert!(!shell.desktop().dock()[0].running);
        assert!(!shell.apps().is_app_running("calc"));
    }

    #[test]
    fn test_mobile_shell_records_history() {
        let mut shell = shell_with_calc(MOBILE_VIEWPORT);
        let a = shell.launch("calc").unwrap();
        let b = shell.launch("calc").unwrap();

        let nav = shell.navigation().unwrap();
        assert_eq!(nav.history(), &[a, b]);
        assert_eq!(nav.current(), Some(b));

        assert_eq!(shell.navigate_back(), Some(a));
        assert_eq!(shell.desktop().active_window(), Some(a));
    }

    #[test]
    fn test_closing_current_mobile_window_navigates_back() {
        let mut shell = shell_with_calc(MOBILE_VIEWPORT);
        let a = shell.launch("calc").unwrap();
        let b = shell.launch("calc").unwrap();

        shell.close_window(b);
        assert_eq!(shell.navigation().unwrap().current(), Some(a));
        assert_eq!(shell.desktop().active_window(), Some(a));
    }

    #[test]
    fn test_resize_across_breakpoint_toggles_navigation() {
        let mut shell = shell_with_calc(DESKTOP_VIEWPORT);
        let a = shell.launch("calc").unwrap();
        let b = shell.launch("calc").unwrap();
        assert!(shell.navigation().is_none());

        shell.resize(MOBILE_VIEWPORT);
        let nav = shell.navigation().unwrap();
        assert_eq!(nav.history(), &[a, b]);

        shell.resize(DESKTOP_VIEWPORT);
        assert!(shell.navigation().is_none());
    }

    #[test]
    fn test_taskbar_click_restores_minimized() {
        let mut shell = shell_with_calc(DESKTOP_VIEWPORT);
        let id = shell.launch("calc").unwrap();
        shell
            .desktop_mut()
            .window_mut(id)
            .unwrap()
            .toggle_minimize();

        shell.taskbar_clicked(id);
        let window = shell.desktop().window(id).unwrap();
        assert!(!window.is_minimized());
        assert_eq!(shell.desktop().active_window(), Some(id));
    }

    #[test]
    fn test_swipe_navigates_history() {
        let mut shell = shell_with_calc(MOBILE_VIEWPORT);
        let a = shell.launch("calc").unwrap();
        let _b = shell.launch("calc").unwrap();

        shell.touch_start(50.0);
        shell.touch_end(200.0);
        assert_eq!(shell.desktop().active_window(), Some(a));
    }
}
