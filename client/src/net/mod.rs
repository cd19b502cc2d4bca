//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gotrue` talks to the hosted identity service and is the only
//! `IdentityProvider` implementation the browser build uses.

pub mod gotrue;
