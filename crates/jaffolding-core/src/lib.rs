//! Core building blocks for the Jaffolding framework
//!
//! This crate provides the pieces everything else is assembled from:
//!
//! - [`Element`]: a retained node tree (tag, text, attributes, styles,
//!   children, event bindings) that can be mutated before and after it is
//!   attached to the visible tree
//! - [`State`]: a single mutable value with change subscription, used to
//!   drive table/chart refresh without a rendering engine
//! - [`WindowEvent`] / [`EventQueue`]: typed window-lifecycle notifications
//!   dispatched synchronously by the desktop shell
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: no browser dependencies, testable without a DOM
//! 2. **Direct Mutation**: there is no diffing or batching; a renderer
//!    applies mutations as they happen
//! 3. **Typed Events**: lifecycle notifications carry typed payloads so
//!    consumers depend on an interface, not a DOM mechanism

pub mod element;
pub mod events;
pub mod state;

pub use element::{Element, EventBinding, HandlerId};
pub use events::{EventQueue, WindowEvent, WindowId};
pub use state::{State, SubscriptionId};
