//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render shared chrome while reading/writing store state from
//! Leptos context providers.

pub mod nav_bar;
