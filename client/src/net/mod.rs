//! Browser adapters for the `stores` HTTP seams.
//!
//! SYSTEM CONTEXT
//! ==============
//! `browser` implements the transport, persisted storage, and navigator
//! traits on top of `gloo-net`, `localStorage`, and `window.location`.

pub mod browser;
