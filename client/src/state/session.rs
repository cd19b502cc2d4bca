//! Published session as seen by the UI.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mirrors `SessionReconciler`'s published session. Route guards and
//! user-aware components read it; only the auth host writes it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use authgate::{AuthenticatedUser, Session};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: Option<AuthenticatedUser>,
    /// `true` until the startup fetch has resolved.
    pub loading: bool,
    /// Bumped when a suppression window ends so the guard runs again.
    pub guard_tick: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self { user: None, loading: true, guard_tick: 0 }
    }
}

impl SessionState {
    /// Replace the user from a published session.
    pub fn apply(&mut self, session: &Session, loading: bool) {
        self.user = session.user().cloned();
        self.loading = loading;
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user.as_ref().map_or("Guest", |u| u.display_name.as_str())
    }

    pub fn bump_guard(&mut self) {
        self.guard_tick = self.guard_tick.wrapping_add(1);
    }
}
