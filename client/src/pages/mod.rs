//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page installs the route guard for its route, pulls the stores it
//! needs from context, and delegates all server work to them.

pub mod login;
pub mod not_found;
pub mod posts;
pub mod tasks;
