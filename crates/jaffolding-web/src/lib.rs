//! Browser bindings for the Jaffolding shell
//!
//! Everything here is gated behind the `wasm` feature so the workspace
//! builds and tests on the host without a browser toolchain. With the
//! feature enabled the crate exports [`bootstrap::DesktopApp`], the DOM
//! renderer, the fetch glue, and the native-bridge capability probe.

#[cfg(feature = "wasm")]
pub mod bootstrap;
#[cfg(feature = "wasm")]
pub mod bridge;
#[cfg(feature = "wasm")]
pub mod dom;
#[cfg(feature = "wasm")]
pub mod net;

#[cfg(feature = "wasm")]
pub use bootstrap::DesktopApp;
