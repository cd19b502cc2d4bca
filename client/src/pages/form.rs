//! Shared helpers for the auth form pages.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use authgate::AuthError;
use authgate::credentials::validate_new_password;

/// Inline message for a failed action.
///
/// Provider failures already raised a toast, and `Busy` means another request
/// owns the form, so only validation errors are shown next to the fields.
pub fn form_error(err: &AuthError) -> Option<String> {
    match err {
        AuthError::Invalid(e) => Some(e.to_string()),
        AuthError::Busy | AuthError::Provider(_) => None,
    }
}

/// Confirmation check run before a sign-up leaves the page.
pub fn confirm_error(password: &str, confirmation: &str) -> Option<String> {
    validate_new_password(password, confirmation).err().map(|e| e.to_string())
}

/// Label for a submit button that switches while a request is in flight.
pub fn submit_label(busy: bool, idle: &'static str, working: &'static str) -> &'static str {
    if busy { working } else { idle }
}
