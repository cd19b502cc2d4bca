//! Reactive application state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each state struct is wrapped in an `RwSignal` by `app::App`. The auth
//! host writes them; pages and components read them.

pub mod notices;
pub mod session;
