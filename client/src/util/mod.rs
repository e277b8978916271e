//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate routing concerns from page and component logic
//! so the decisions stay testable without a browser.

pub mod guard;
