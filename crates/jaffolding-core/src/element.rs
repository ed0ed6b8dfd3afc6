//! Retained element tree
//!
//! An [`Element`] wraps one on-screen node: tag, text, attributes, inline
//! styles, children, and event bindings. The tree is a plain value; a
//! renderer walks it once to materialize real nodes and then applies
//! further mutations directly. Handlers are referenced by id so the tree
//! itself stays free of closures and can be inspected in tests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifies a handler registered with the renderer.
pub type HandlerId = u64;

/// An event type bound to a handler id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBinding {
    /// Event type, e.g. `"click"` or `"pointerdown"`
    pub event: String,
    /// Handler registered with the renderer
    pub handler: HandlerId,
}

/// One node of the visual tree.
///
/// Mutation is legal both before and after the element is attached;
/// [`Element::attach`] and [`Element::detach`] only flip the bookkeeping
/// flag that tells consumers whether the node is part of the visible tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    text: Option<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    children: Vec<Element>,
    bindings: Vec<EventBinding>,
    attached: bool,
}

impl Element {
    /// Create an element with the given tag name.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Text content, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Set the text content. Usable before and after attach.
    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    /// Builder form of [`Element::set_text`].
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Look up an attribute.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Remove an attribute. Unknown names are ignored.
    pub fn remove_attribute(&mut self, name: &str) -> &mut Self {
        self.attributes.remove(name);
        self
    }

    /// All attributes in name order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Look up an inline style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Set an inline style property.
    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    /// Builder form of [`Element::set_style`].
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_style(property, value);
        self
    }

    /// All inline styles in property order.
    pub fn styles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.styles.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append a child. If this element is attached the child subtree is
    /// marked attached as well.
    pub fn push_child(&mut self, mut child: Element) -> &mut Self {
        if self.attached {
            child.attach();
        }
        self.children.push(child);
        self
    }

    /// Builder form of [`Element::push_child`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Child nodes.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Mutable access to child nodes.
    pub fn children_mut(&mut self) -> &mut [Element] {
        &mut self.children
    }

    /// Remove all children.
    pub fn clear_children(&mut self) -> &mut Self {
        for child in &mut self.children {
            child.detach();
        }
        self.children.clear();
        self
    }

    /// Bind an event type to a handler id.
    pub fn bind(&mut self, event: impl Into<String>, handler: HandlerId) -> &mut Self {
        self.bindings.push(EventBinding {
            event: event.into(),
            handler,
        });
        self
    }

    /// Builder form of [`Element::bind`].
    pub fn with_binding(mut self, event: impl Into<String>, handler: HandlerId) -> Self {
        self.bind(event, handler);
        self
    }

    /// Event bindings in registration order.
    pub fn bindings(&self) -> &[EventBinding] {
        &self.bindings
    }

    /// Whether the node is currently part of the visible tree.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Mark this subtree as part of the visible tree.
    pub fn attach(&mut self) {
        self.attached = true;
        for child in &mut self.children {
            child.attach();
        }
    }

    /// Mark this subtree as detached. Safe to call repeatedly.
    pub fn detach(&mut self) {
        self.attached = false;
        for child in &mut self.children {
            child.detach();
        }
    }

    /// Total number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Element::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let el = Element::new("div")
            .with_text("hello")
            .with_style("color", "#eceff4")
            .with_attribute("id", "greeting")
            .with_child(Element::new("span").with_text("!"));

        assert_eq!(el.tag(), "div");
        assert_eq!(el.text(), Some("hello"));
        assert_eq!(el.style("color"), Some("#eceff4"));
        assert_eq!(el.attribute("id"), Some("greeting"));
        assert_eq!(el.children().len(), 1);
    }

    #[test]
    fn test_mutation_after_attach() {
        let mut el = Element::new("div");
        el.attach();
        el.set_text("updated").set_style("display", "none");

        assert!(el.is_attached());
        assert_eq!(el.text(), Some("updated"));
        assert_eq!(el.style("display"), Some("none"));
    }

    #[test]
    fn test_attach_propagates_to_children() {
        let mut el = Element::new("div").with_child(Element::new("span"));
        el.attach();
        assert!(el.children()[0].is_attached());

        // Children added after attach come up attached too
        el.push_child(Element::new("p"));
        assert!(el.children()[1].is_attached());

        el.detach();
        assert!(!el.children()[0].is_attached());
        assert!(!el.children()[1].is_attached());
    }

    #[test]
    fn test_detach_is_idempotent() {
        let mut el = Element::new("div");
        el.detach();
        el.detach();
        assert!(!el.is_attached());
    }

    #[test]
    fn test_remove_attribute() {
        let mut el = Element::new("input").with_attribute("disabled", "true");
        el.remove_attribute("disabled");
        el.remove_attribute("never-set");
        assert_eq!(el.attribute("disabled"), None);
    }

    #[test]
    fn test_clear_children_detaches() {
        let mut el = Element::new("div").with_child(Element::new("span"));
        el.attach();
        el.clear_children();
        assert!(el.children().is_empty());
        assert_eq!(el.node_count(), 1);
    }

    #[test]
    fn test_tree_serializes_for_snapshots() {
        let el = Element::new("div")
            .with_text("hi")
            .with_child(Element::new("span"));
        let json = serde_json::to_string(&el).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, el);
    }

    #[test]
    fn test_event_bindings() {
        let el = Element::new("button")
            .with_binding("click", 7)
            .with_binding("pointerdown", 8);
        assert_eq!(el.bindings().len(), 2);
        assert_eq!(el.bindings()[0].event, "click");
        assert_eq!(el.bindings()[0].handler, 7);
    }
}
