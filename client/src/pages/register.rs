//! Account registration page.
//!
//! Depending on provider settings a sign-up either signs in straight away or
//! waits for the user to confirm their email.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::pages::form::{confirm_error, form_error, submit_label};
use crate::state::session::SessionState;
use crate::util::auth::install_signed_in_redirect;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let awaiting_confirmation = RwSignal::new(false);
    let session = expect_context::<RwSignal<SessionState>>();
    install_signed_in_redirect(session, use_navigate());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let password_value = password.get();
        if let Some(message) = confirm_error(&password_value, &confirm.get()) {
            error.set(Some(message));
            return;
        }
        let name_value = name.get();
        let email_value = email.get();
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let Some(gate) = crate::util::auth::gate() else {
                    busy.set(false);
                    return;
                };
                let result = gate.reconciler().sign_up(&name_value, &email_value, &password_value).await;
                busy.set(false);
                match result {
                    // The signed-in redirect takes it from here.
                    Ok(authgate::SignUpOutcome::SignedIn(_)) => {}
                    Ok(authgate::SignUpOutcome::ConfirmationRequired(_)) => awaiting_confirmation.set(true),
                    Err(e) => error.set(form_error(&e)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (name_value, email_value, password_value, form_error, awaiting_confirmation);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"BusinessOS"</h1>
                <Show
                    when=move || awaiting_confirmation.get()
                    fallback=move || {
                        view! {
                            <p class="auth-card__subtitle">"Create your account"</p>
                            <form class="auth-form" on:submit=on_submit>
                                <input
                                    class="auth-input"
                                    type="text"
                                    placeholder="Full name"
                                    autocomplete="name"
                                    prop:value=move || name.get()
                                    on:input=move |ev| name.set(event_target_value(&ev))
                                />
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
                                    autocomplete="new-password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                />
                                <input
                                    class="auth-input"
                                    type="password"
                                    placeholder="Confirm password"
                                    autocomplete="new-password"
                                    prop:value=move || confirm.get()
                                    on:input=move |ev| confirm.set(event_target_value(&ev))
                                />
                                <button class="auth-button" type="submit" disabled=move || busy.get()>
                                    {move || submit_label(busy.get(), "Create account", "Creating account...")}
                                </button>
                            </form>
                        }
                    }
                >
                    <p class="auth-message">
                        "Check your email to confirm your account, then sign in."
                    </p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <div class="auth-links">
                    <a href="/login">"Already have an account? Sign in"</a>
                </div>
            </div>
        </div>
    }
}
