//! Email + password sign-in page.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::pages::form::{form_error, submit_label};
use crate::state::session::SessionState;
use crate::util::auth::install_signed_in_redirect;

#[component]
pub fn LoginPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let session = expect_context::<RwSignal<SessionState>>();
    install_signed_in_redirect(session, use_navigate());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        let password_value = password.get();
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let Some(gate) = crate::util::auth::gate() else {
                    busy.set(false);
                    return;
                };
                let result = gate.reconciler().sign_in(&email_value, &password_value).await;
                busy.set(false);
                // Success republishes the session; the signed-in redirect moves on.
                if let Err(e) = result {
                    error.set(form_error(&e));
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email_value, password_value, form_error);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"BusinessOS"</h1>
                <p class="auth-card__subtitle">"Sign in to your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        {move || submit_label(busy.get(), "Sign in", "Signing in...")}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="auth-links">
                    <a href="/forgot-password">"Forgot your password?"</a>
                    <a href="/register">"Create an account"</a>
                </div>
            </div>
        </div>
    }
}
