//! DOM renderer for the element tree
//!
//! One-shot materialization: [`mount`] walks an [`Element`] and produces
//! the corresponding DOM subtree. Later changes are applied directly to
//! mounted nodes with the mutation helpers rather than by re-diffing.

use jaffolding_core::Element;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;

/// Build the DOM subtree for an element.
pub fn mount(
    document: &web_sys::Document,
    element: &Element,
) -> Result<web_sys::Element, JsValue> {
    let node = document.create_element(element.tag())?;

    if let Some(text) = element.text() {
        node.set_text_content(Some(text));
    }
    for (name, value) in element.attributes() {
        node.set_attribute(name, value)?;
    }
    apply_styles(&node, element.styles())?;

    for child in element.children() {
        let child_node = mount(document, child)?;
        node.append_child(&child_node)?;
    }
    Ok(node)
}

/// Write inline style properties onto a mounted node.
pub fn apply_styles<'a>(
    node: &web_sys::Element,
    styles: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<(), JsValue> {
    let Some(html) = node.dyn_ref::<web_sys::HtmlElement>() else {
        return Ok(());
    };
    let declaration = html.style();
    for (property, value) in styles {
        declaration.set_property(property, value)?;
    }
    Ok(())
}

/// Position a mounted node absolutely from a rect, in CSS pixels.
pub fn apply_rect(
    node: &web_sys::Element,
    rect: jaffolding_desktop::Rect,
) -> Result<(), JsValue> {
    let styles = [
        ("position".to_string(), "absolute".to_string()),
        ("left".to_string(), format!("{}px", rect.x)),
        ("top".to_string(), format!("{}px", rect.y)),
        ("width".to_string(), format!("{}px", rect.width)),
        ("height".to_string(), format!("{}px", rect.height)),
    ];
    apply_styles(node, styles.iter().map(|(k, v)| (k.as_str(), v.as_str())))
}

/// Replace a mounted node's text.
pub fn set_text(node: &web_sys::Element, text: &str) {
    node.set_text_content(Some(text));
}
