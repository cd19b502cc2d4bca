//! Set a new password after following a recovery link.
//!
//! The auth host adopts the recovery tokens from the URL fragment before this
//! page submits, so `update_password` runs against the recovered session.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::pages::form::{confirm_error, form_error, submit_label};
use crate::util::auth::replace_options;

/// Delay before leaving the page after a successful reset.
pub const RESET_REDIRECT_DELAY_MS: u32 = 3_000;

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let done = RwSignal::new(false);
    let destination = RwSignal::new(None::<String>);
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(to) = destination.get() {
            destination.set(None);
            navigate(&to, replace_options());
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let password_value = password.get();
        let confirm_value = confirm.get();
        if let Some(message) = confirm_error(&password_value, &confirm_value) {
            error.set(Some(message));
            return;
        }
        busy.set(true);
        error.set(None);

        #[cfg(feature = "csr")]
        {
            leptos::task::spawn_local(async move {
                let Some(gate) = crate::util::auth::gate() else {
                    busy.set(false);
                    return;
                };
                let result = gate.reconciler().update_password(&password_value, &confirm_value).await;
                busy.set(false);
                match result {
                    Ok(()) => {
                        done.set(true);
                        let login = gate.table().login_path.clone();
                        gloo_timers::callback::Timeout::new(RESET_REDIRECT_DELAY_MS, move || {
                            destination.set(Some(login));
                        })
                        .forget();
                    }
                    Err(e) => error.set(form_error(&e)),
                }
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (destination, confirm_value, form_error, done);
        }
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <h1>"Choose a new password"</h1>
                <Show
                    when=move || done.get()
                    fallback=move || {
                        view! {
                            <form class="auth-form" on:submit=on_submit>
                                <input
                                    class="auth-input"
                                    type="password"
                                    placeholder="New password"
                                    autocomplete="new-password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| password.set(event_target_value(&ev))
                                />
                                <input
                                    class="auth-input"
                                    type="password"
                                    placeholder="Confirm new password"
                                    autocomplete="new-password"
                                    prop:value=move || confirm.get()
                                    on:input=move |ev| confirm.set(event_target_value(&ev))
                                />
                                <button class="auth-button" type="submit" disabled=move || busy.get()>
                                    {move || submit_label(busy.get(), "Update password", "Updating...")}
                                </button>
                            </form>
                        }
                    }
                >
                    <p class="auth-message">"Password updated. Taking you to sign in..."</p>
                </Show>
                <Show when=move || error.get().is_some()>
                    <p class="auth-message auth-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
