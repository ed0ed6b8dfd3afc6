//! Desktop bootstrap
//!
//! Mounts the shell into a host element and installs the page-level input
//! listeners. Pointer listeners are global and installed exactly once; the
//! shell routes them by hit testing, so no per-gesture or per-window
//! listeners ever get added or removed.
//!
//! Rendering is deliberately naive: every state change rebuilds the shell's
//! subtree from the model. The demos are small enough that this stays well
//! under frame budget.

use std::cell::RefCell;
use std::rc::Rc;

use jaffolding_apps::default_apps;
use jaffolding_desktop::{Shell, Size, Vec2};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::dom;

struct App {
    shell: Shell,
    document: web_sys::Document,
    root: web_sys::Element,
}

/// Entry point exported to the host page.
#[wasm_bindgen]
pub struct DesktopApp {
    inner: Rc<RefCell<App>>,
}

#[wasm_bindgen]
impl DesktopApp {
    /// Mount the desktop into the element with the given id and start it.
    #[wasm_bindgen(constructor)]
    pub fn new(mount_id: &str) -> Result<DesktopApp, JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let root = document
            .get_element_by_id(mount_id)
            .ok_or_else(|| JsValue::from_str("mount element not found"))?;

        let mut shell = Shell::new(viewport_size(&window));
        for app in default_apps() {
            shell.register_app(app);
        }

        let inner = Rc::new(RefCell::new(App {
            shell,
            document,
            root,
        }));
        install_listeners(&inner)?;
        render(&mut inner.borrow_mut())?;
        Ok(DesktopApp { inner })
    }

    /// Launch an app by id, as if its dock entry were clicked.
    pub fn launch(&self, app_id: &str) -> Result<(), JsValue> {
        let mut app = self.inner.borrow_mut();
        app.shell.dock_clicked(app_id);
        render(&mut app)
    }

    /// Number of open windows, for host-page diagnostics.
    pub fn window_count(&self) -> usize {
        self.inner.borrow().shell.desktop().windows().len()
    }
}

fn viewport_size(window: &web_sys::Window) -> Size {
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1024.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(768.0);
    Size::new(width as f32, height as f32)
}

/// Install the page-level listeners. Called once per mount; the closures
/// are leaked on purpose because they live as long as the page.
fn install_listeners(inner: &Rc<RefCell<App>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = inner.borrow().document.clone();

    {
        let inner = inner.clone();
        let closure = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |e: web_sys::PointerEvent| {
            let mut app = inner.borrow_mut();
            app.shell
                .pointer_down(Vec2::new(e.client_x() as f32, e.client_y() as f32));
            let _ = render(&mut app);
        });
        document
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let inner = inner.clone();
        let closure = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |e: web_sys::PointerEvent| {
            let mut app = inner.borrow_mut();
            app.shell
                .pointer_move(Vec2::new(e.client_x() as f32, e.client_y() as f32));
            let _ = render(&mut app);
        });
        document
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let inner = inner.clone();
        let closure = Closure::<dyn FnMut(web_sys::PointerEvent)>::new(move |_e| {
            inner.borrow_mut().shell.pointer_up();
        });
        document
            .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let inner = inner.clone();
        let closure = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |e: web_sys::TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                inner.borrow_mut().shell.touch_start(touch.client_x() as f32);
            }
        });
        document
            .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let inner = inner.clone();
        let closure = Closure::<dyn FnMut(web_sys::TouchEvent)>::new(move |e: web_sys::TouchEvent| {
            if let Some(touch) = e.changed_touches().get(0) {
                let mut app = inner.borrow_mut();
                app.shell.touch_end(touch.client_x() as f32);
                let _ = render(&mut app);
            }
        });
        document
            .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let inner = inner.clone();
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            // Dock and taskbar entries carry their ids as data attributes
            let Some(element) = event
                .target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let mut app = inner.borrow_mut();
            if let Some(app_id) = element.get_attribute("data-app-id") {
                app.shell.dock_clicked(&app_id);
            } else if let Some(id) = element.get_attribute("data-window-id") {
                if let Ok(id) = id.parse() {
                    app.shell.taskbar_clicked(id);
                }
            } else {
                return;
            }
            let _ = render(&mut app);
        });
        document.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let inner = inner.clone();
        let resize_window = window.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut app = inner.borrow_mut();
            app.shell.resize(viewport_size(&resize_window));
            let _ = render(&mut app);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Rebuild the shell's DOM from the model.
fn render(app: &mut App) -> Result<(), JsValue> {
    app.root.set_text_content(None);

    for icon in app.shell.desktop().icons() {
        let node = app.document.create_element("div")?;
        node.set_attribute("class", "desktop-icon")?;
        node.set_attribute("data-app-id", &icon.app_id)?;
        node.set_text_content(Some(&format!("{} {}", icon.icon, icon.name)));
        app.root.append_child(&node)?;
    }

    // Windows in z order, lowest first, so document order matches stacking
    let mut windows: Vec<_> = app.shell.desktop().windows().iter().collect();
    windows.sort_by_key(|w| w.z_order());
    let active = app.shell.desktop().active_window();
    for window in windows {
        let frame = app.document.create_element("div")?;
        let class = if active == Some(window.id()) {
            "window active"
        } else {
            "window"
        };
        frame.set_attribute("class", class)?;
        dom::apply_rect(&frame, window.rect())?;

        let title_bar = app.document.create_element("div")?;
        title_bar.set_attribute("class", "title-bar")?;
        title_bar.set_text_content(Some(window.title()));
        frame.append_child(&title_bar)?;

        if !window.is_minimized() {
            if let Some(content) = window.content() {
                frame.append_child(&dom::mount(&app.document, content)?.into())?;
            }
        }
        app.root.append_child(&frame)?;
    }

    let taskbar = app.document.create_element("div")?;
    taskbar.set_attribute("class", "taskbar")?;
    for entry in app.shell.desktop().taskbar() {
        let button = app.document.create_element("button")?;
        button.set_attribute("data-window-id", &entry.window_id.to_string())?;
        button.set_attribute("title", &entry.title)?;
        button.set_text_content(Some(&entry.label));
        taskbar.append_child(&button)?;
    }
    app.root.append_child(&taskbar)?;

    let dock = app.document.create_element("div")?;
    dock.set_attribute("class", "dock")?;
    for entry in app.shell.desktop().dock() {
        let button = app.document.create_element("button")?;
        let class = if entry.running {
            "dock-entry running"
        } else {
            "dock-entry"
        };
        button.set_attribute("class", class)?;
        button.set_attribute("data-app-id", &entry.app_id)?;
        button.set_attribute("title", &entry.name)?;
        button.set_text_content(Some(&entry.icon));
        dock.append_child(&button)?;
    }
    app.root.append_child(&dock)?;

    schedule_canvas_fit(app)?;
    Ok(())
}

/// Canvas backing stores can only be sized after layout, so sizing runs on
/// a zero-delay timer. The callback re-checks that each canvas is still in
/// the document: a window may close between scheduling and firing.
fn schedule_canvas_fit(app: &App) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = app.document.clone();
    let closure = Closure::once(move || {
        let canvases = document.get_elements_by_tag_name("canvas");
        for i in 0..canvases.length() {
            let Some(canvas) = canvases.item(i) else {
                continue;
            };
            if !canvas.is_connected() {
                continue;
            }
            if let Some(parent) = canvas.parent_element() {
                let _ = canvas.set_attribute("width", &parent.client_width().to_string());
                let _ = canvas.set_attribute("height", &parent.client_height().to_string());
            }
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        0,
    )?;
    closure.forget();
    Ok(())
}
