use super::*;
use authgate::{AuthenticatedUser, Session};

fn signed_in_state(loading: bool) -> SessionState {
    let user = AuthenticatedUser {
        id: "u1".to_owned(),
        display_name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        role: "User".to_owned(),
        avatar_url: String::new(),
    };
    let mut state = SessionState::default();
    state.apply(&Session::Present(user), loading);
    state
}

#[test]
fn redirect_for_only_follows_login_redirects() {
    let redirect = GuardDecision::RedirectToLogin { to: "/login".to_owned() };
    assert_eq!(redirect_for(&redirect), Some("/login"));
    assert_eq!(redirect_for(&GuardDecision::Allow), None);
    assert_eq!(redirect_for(&GuardDecision::Pending), None);
    assert_eq!(redirect_for(&GuardDecision::Suppressed), None);
}

#[test]
fn auth_redirects_replace_history() {
    assert!(replace_options().replace);
}

#[test]
fn invalid_config_falls_back_to_defaults() {
    let parsed = GuardConfig::from_lookup(|key| (key == "AUTHGATE_SUPPRESSION_WINDOW_MS").then(|| "soon".to_owned()));
    assert!(parsed.is_err());
    assert_eq!(config_or_default(parsed), GuardConfig::default());
}

#[test]
fn valid_config_is_kept() {
    let parsed = GuardConfig::from_lookup(|key| (key == "AUTHGATE_SUPPRESSION_WINDOW_MS").then(|| "500".to_owned()));
    assert_eq!(config_or_default(parsed).suppression_window_ms, 500);
}

#[test]
fn signed_in_user_leaves_auth_pages_once_loaded() {
    assert!(settled_signed_in(&signed_in_state(false)));
}

#[test]
fn auth_pages_stay_while_loading_or_signed_out() {
    assert!(!settled_signed_in(&signed_in_state(true)));
    assert!(!settled_signed_in(&SessionState::default()));
    let mut signed_out = SessionState::default();
    signed_out.apply(&Session::None, false);
    assert!(!settled_signed_in(&signed_out));
}

#[test]
fn signed_in_destination_defaults_to_landing_path() {
    assert_eq!(signed_in_destination(), load_config().routes.landing_path);
}
