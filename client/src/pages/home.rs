//! Public landing page.

use leptos::prelude::*;

use crate::state::session::SessionState;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let signed_in = move || session.get().is_signed_in();

    view! {
        <div class="home-page">
            <h1>"BusinessOS"</h1>
            <p class="home-page__tagline">"Plan, run and review your business flows in one place."</p>
            <div class="home-page__actions">
                <Show
                    when=signed_in
                    fallback=|| {
                        view! {
                            <a class="auth-button" href="/login">"Sign in"</a>
                            <a class="auth-button auth-button--secondary" href="/register">"Create an account"</a>
                        }
                    }
                >
                    <a class="auth-button" href="/dashboard">"Open dashboard"</a>
                </Show>
            </div>
        </div>
    }
}
