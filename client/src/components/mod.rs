//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the shared session and notice signals from Leptos context.
//! `AuthHost` renders nothing; it installs the auth gate and route guard.

pub mod auth_host;
pub mod toasts;
