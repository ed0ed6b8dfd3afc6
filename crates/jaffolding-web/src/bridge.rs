//! Native-bridge capability check
//!
//! A host page may expose a global `jaffoldingRegistry` object mapping
//! component names to constructor functions. When present, construction
//! goes through it; on absence or any failure the caller falls back to the
//! built-in implementation. The check is a capability probe, never an
//! error.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

const REGISTRY_GLOBAL: &str = "jaffoldingRegistry";

/// Look up a native constructor for a component name, if the host page
/// provides one.
pub fn native_constructor(name: &str) -> Option<js_sys::Function> {
    let window = web_sys::window()?;
    let registry = js_sys::Reflect::get(&window, &JsValue::from_str(REGISTRY_GLOBAL)).ok()?;
    if registry.is_undefined() || registry.is_null() {
        return None;
    }
    let ctor = js_sys::Reflect::get(&registry, &JsValue::from_str(name)).ok()?;
    ctor.dyn_into::<js_sys::Function>().ok()
}

/// Construct a component through the host registry. `None` means the
/// registry is absent, lacks the component, or its constructor threw;
/// callers use the local implementation in that case.
pub fn construct_native(name: &str) -> Option<JsValue> {
    let ctor = native_constructor(name)?;
    match js_sys::Reflect::construct(&ctor, &js_sys::Array::new()) {
        Ok(instance) => Some(instance.into()),
        Err(err) => {
            web_sys::console::warn_2(
                &JsValue::from_str(&format!("native {name} constructor failed, using fallback")),
                &err,
            );
            None
        }
    }
}
