//! Desktop shell for Jaffolding
//!
//! A browser-style window manager that runs entirely off-DOM: windows with
//! drag/resize/minimize/maximize chrome, a taskbar kept in lockstep with
//! the open windows, a dock with running markers, a mobile navigation
//! history, and an app registry. All state lives in plain structs so the
//! whole shell is testable on the host; the `jaffolding-web` crate renders
//! it into a real page.

pub mod apps;
pub mod desktop;
pub mod error;
pub mod navigation;
pub mod shell;
pub mod types;
pub mod window;

pub use apps::{AppDefinition, AppDescriptor, AppManager};
pub use desktop::{Desktop, DesktopIcon, DockEntry, TaskbarEntry};
pub use error::{DesktopError, DesktopResult};
pub use navigation::MobileNavigation;
pub use shell::Shell;
pub use types::{Rect, Size, Vec2, MIN_WINDOW_SIZE, MOBILE_BREAKPOINT, SWIPE_THRESHOLD};
pub use window::{Gesture, Window, WindowFlags, WindowMode, WindowRegion};
