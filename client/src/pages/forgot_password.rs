//! Request a password reset email.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::pages::form::{form_error, submit_label};
use crate::state::session::SessionState;
use crate::util::auth::install_signed_in_redirect;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let sent = RwSignal::new(false);
    let session = expect_context::<RwSignal<SessionState>>();
    install_signed_in_redirect(session, use_navigate());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            let Some(gate) = crate::util::auth::gate() else {
                busy.set(false);
                return;
            };
            let origin = crate::util::browser::origin();
            let result = gate.reconciler().request_password_reset(&email_value, &origin).await;
            busy.set(false);
            match result {
                Ok(()) => sent.set(true),
                Err(e) => error.set(form_error(&e)),
            }
        });
        #[cfg(not(feature = "csr"))]
        {
            let _ = (email_value, form_error, sent);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Reset password"</h1>
                <Show
                    when=move || sent.get()
                    fallback=move || {
                        view! {
                            <p class="auth-card__subtitle">"We will email you a reset link."</p>
                            <form class="auth-form" on:submit=on_submit>
                                <input
                                    class="auth-input"
                                    type="email"
                                    placeholder="you@example.com"
                                    autocomplete="email"
                                    prop:value=move || email.get()
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                />
                                <button class="auth-button" type="submit" disabled=move || busy.get()>
                                    {move || submit_label(busy.get(), "Send reset link", "Sending...")}
                                </button>
                            </form>
                        }
                    }
                >
                    <p class="auth-message">"Check your inbox for the reset link."</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="auth-links">
                    <a href="/login">"Back to sign in"</a>
                </div>
            </div>
        </div>
    }
}
