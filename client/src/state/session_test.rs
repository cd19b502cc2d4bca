use authgate::ProviderUser;

use super::*;

fn user() -> AuthenticatedUser {
    AuthenticatedUser::from_provider(&ProviderUser {
        id: "u1".to_owned(),
        email: Some("ada@example.com".to_owned()),
        user_metadata: authgate::UserMetadata::default(),
        confirmed_at: None,
    })
}

#[test]
fn default_is_loading_and_signed_out() {
    let state = SessionState::default();
    assert!(state.loading);
    assert!(!state.is_signed_in());
    assert_eq!(state.display_name(), "Guest");
}

#[test]
fn apply_present_session_sets_user_and_ends_loading() {
    let mut state = SessionState::default();
    state.apply(&Session::Present(user()), false);
    assert!(!state.loading);
    assert_eq!(state.display_name(), "ada");
}

#[test]
fn apply_none_clears_user() {
    let mut state = SessionState::default();
    state.apply(&Session::Present(user()), false);
    state.apply(&Session::None, false);
    assert!(!state.is_signed_in());
    assert!(!state.loading);
}

#[test]
fn event_before_startup_keeps_loading() {
    let mut state = SessionState::default();
    state.apply(&Session::Present(user()), true);
    assert!(state.loading);
    assert!(state.is_signed_in());
}

#[test]
fn bump_guard_increments() {
    let mut state = SessionState::default();
    state.bump_guard();
    state.bump_guard();
    assert_eq!(state.guard_tick, 2);
}
