//! Invisible component that installs the auth gate inside the router.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::notices::NoticeState;
use crate::state::session::SessionState;
use crate::util::auth::{install_auth_gate, install_route_guard};

/// Must be rendered inside `<Router>`: both installs need the router's
/// location and navigate handle.
#[component]
pub fn AuthHost() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    install_auth_gate(session, notices, navigate.clone());
    install_route_guard(session, navigate);
}
