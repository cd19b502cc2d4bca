//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its form state and calls the reconciler through the
//! installed gate. Redirects are left to the route guard except after a
//! successful sign-in, sign-up or password reset.

pub mod dashboard;
pub mod forgot_password;
pub(crate) mod form;
pub mod home;
pub mod login;
pub mod register;
pub mod reset_password;
