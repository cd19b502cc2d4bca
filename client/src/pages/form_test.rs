use super::*;
use authgate::{CredentialError, ProviderError};

#[test]
fn validation_errors_are_shown_inline() {
    let err = AuthError::Invalid(CredentialError::PasswordTooShort);
    assert_eq!(form_error(&err).as_deref(), Some("Password must be at least 6 characters"));
}

#[test]
fn provider_and_busy_errors_stay_in_toasts() {
    assert_eq!(form_error(&AuthError::Busy), None);
    let err = AuthError::Provider(ProviderError::Rejected { status: Some(400), message: "nope".to_owned() });
    assert_eq!(form_error(&err), None);
}

#[test]
fn confirm_error_checks_length_before_match() {
    assert_eq!(confirm_error("abc", "xyz").as_deref(), Some("Password must be at least 6 characters"));
    assert_eq!(confirm_error("secret1", "secret2").as_deref(), Some("Passwords do not match"));
    assert_eq!(confirm_error("secret1", "secret1"), None);
}

#[test]
fn submit_label_tracks_busy() {
    assert_eq!(submit_label(false, "Sign in", "Signing in..."), "Sign in");
    assert_eq!(submit_label(true, "Sign in", "Signing in..."), "Signing in...");
}
