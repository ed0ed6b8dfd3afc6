//! Browser-side renderer checks, run with `wasm-pack test --headless`.

#![cfg(all(target_arch = "wasm32", feature = "wasm"))]

use jaffolding_core::Element;
use jaffolding_web::dom;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn mount_builds_matching_subtree() {
    let tree = Element::new("div")
        .with_attribute("id", "panel")
        .with_style("background-color", "#2e3440")
        .with_child(Element::new("span").with_text("hello"))
        .with_child(Element::new("button").with_text("ok"));

    let node = dom::mount(&document(), &tree).unwrap();
    assert_eq!(node.tag_name().to_lowercase(), "div");
    assert_eq!(node.get_attribute("id").as_deref(), Some("panel"));
    assert_eq!(node.children().length(), 2);
    assert_eq!(
        node.first_element_child().unwrap().text_content().as_deref(),
        Some("hello")
    );
}

#[wasm_bindgen_test]
fn apply_rect_writes_pixel_styles() {
    let node = document().create_element("div").unwrap();
    dom::apply_rect(&node, jaffolding_desktop::Rect::new(10.0, 20.0, 300.0, 200.0)).unwrap();

    let style = node
        .dyn_ref::<web_sys::HtmlElement>()
        .map(|h| h.style())
        .unwrap();
    assert_eq!(style.get_property_value("left").unwrap(), "10px");
    assert_eq!(style.get_property_value("width").unwrap(), "300px");
}

#[wasm_bindgen_test]
fn native_constructor_absent_by_default() {
    assert!(jaffolding_web::bridge::native_constructor("Button").is_none());
}
