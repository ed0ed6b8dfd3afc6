//! App registry and launcher
//!
//! Apps register a descriptor plus a window factory. Launching runs the
//! factory and hands the window to the desktop the caller passes in; the
//! manager keeps the app-to-windows map so the dock's running markers track
//! open instances. The manager never reaches for global state, it only
//! operates on the desktop it is given.

use std::collections::HashMap;

use jaffolding_core::WindowId;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::desktop::Desktop;
use crate::window::Window;

/// Static metadata for a registered app, shown in the dock and on desktop
/// icons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl AppDescriptor {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            color: color.into(),
        }
    }
}

/// A registered app: descriptor plus the factory that builds a fresh
/// window per launch.
pub struct AppDefinition {
    pub descriptor: AppDescriptor,
    pub factory: Box<dyn Fn() -> Window>,
}

impl AppDefinition {
    pub fn new(descriptor: AppDescriptor, factory: impl Fn() -> Window + 'static) -> Self {
        Self {
            descriptor,
            factory: Box::new(factory),
        }
    }
}

/// Registry of launchable apps and their running windows.
#[derive(Default)]
pub struct AppManager {
    // Registration order, preserved for dock layout
    apps: Vec<AppDefinition>,
    running: HashMap<String, Vec<WindowId>>,
}

impl std::fmt::Debug for AppManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppManager")
            .field("apps", &self.apps.len())
            .field("running", &self.running)
            .finish()
    }
}

impl AppManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an app. Re-registering an id silently replaces the earlier
    /// definition in place, keeping its dock position.
    pub fn register(&mut self, app: AppDefinition) {
        match self
            .apps
            .iter_mut()
            .find(|existing| existing.descriptor.id == app.descriptor.id)
        {
            Some(slot) => *slot = app,
            None => self.apps.push(app),
        }
    }

    /// Descriptors in registration order, for building the dock and icons.
    pub fn descriptors(&self) -> Vec<AppDescriptor> {
        self.apps.iter().map(|app| app.descriptor.clone()).collect()
    }

    pub fn is_registered(&self, app_id: &str) -> bool {
        self.apps.iter().any(|app| app.descriptor.id == app_id)
    }

    /// Whether the app has at least one open window.
    pub fn is_app_running(&self, app_id: &str) -> bool {
        self.running
            .get(app_id)
            .is_some_and(|windows| !windows.is_empty())
    }

    /// Open windows for an app, in launch order.
    pub fn windows_of(&self, app_id: &str) -> &[WindowId] {
        self.running
            .get(app_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Launch an app: run its factory, add the window to the desktop, and
    /// mark the dock entry running. Each launch opens a fresh instance.
    /// Unknown ids are a logged no-op, never a panic.
    pub fn launch_app(&mut self, app_id: &str, desktop: &mut Desktop) -> Option<WindowId> {
        let Some(app) = self.apps.iter().find(|app| app.descriptor.id == app_id) else {
            error!(app_id, "launch_app: no such app");
            return None;
        };
        let window = (app.factory)();
        let id = desktop.add_window(window);
        self.running.entry(app_id.to_string()).or_default().push(id);
        desktop.update_dock(app_id, true);
        debug!(app_id, window = id, "app launched");
        Some(id)
    }

    /// React to a window closing. When the last window of an app closes,
    /// its dock running marker is cleared.
    pub fn handle_closed(&mut self, window_id: WindowId, desktop: &mut Desktop) {
        for (app_id, windows) in &mut self.running {
            let before = windows.len();
            windows.retain(|&id| id != window_id);
            if windows.len() != before && windows.is_empty() {
                desktop.update_dock(app_id, false);
            }
        }
    }

    /// Bring every window of an app to the front, most recent launch
    /// topmost, and activate it.
    pub fn focus_app(&self, app_id: &str, desktop: &mut Desktop) {
        let Some(windows) = self.running.get(app_id) else {
            return;
        };
        for &id in windows {
            desktop.activate_window(id);
        }
    }
}
