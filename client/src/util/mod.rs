//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns from page and component
//! logic. `browser` adapts web storage and history; `auth` wires the gate into
//! Leptos.

pub mod auth;
pub mod browser;
