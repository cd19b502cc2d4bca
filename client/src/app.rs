//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment, WildcardSegment,
    components::{Route, Router, Routes},
};

use crate::components::auth_host::AuthHost;
use crate::components::toasts::Toasts;
use crate::pages::{
    dashboard::DashboardPage, forgot_password::ForgotPasswordPage, home::HomePage, login::LoginPage,
    register::RegisterPage, reset_password::ResetPasswordPage,
};
use crate::state::{notices::NoticeState, session::SessionState};

/// Root application component.
///
/// Provides the shared session and notice contexts and sets up client-side
/// routing. `AuthHost` sits inside the router so it can observe and replace
/// the current location.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionState::default());
    let notices = RwSignal::new(NoticeState::default());
    provide_context(session);
    provide_context(notices);

    view! {
        <Title text="BusinessOS"/>

        <Router>
            <AuthHost/>
            <Toasts/>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("forgot-password") view=ForgotPasswordPage/>
                <Route path=StaticSegment("reset-password") view=ResetPasswordPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
                <Route path=(StaticSegment("dashboard"), WildcardSegment("section")) view=DashboardPage/>
            </Routes>
        </Router>
    }
}
