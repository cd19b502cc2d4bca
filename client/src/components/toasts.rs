//! Toast stack for reconciler notices.

use leptos::prelude::*;

use crate::state::notices::NoticeState;

#[component]
pub fn Toasts() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="toasts" role="status" aria-live="polite">
            <For each=move || notices.get().toasts key=|toast| toast.id let:toast>
                {
                    let id = toast.id;
                    view! {
                        <div class=toast.css_class()>
                            <span class="toast__message">{toast.message.clone()}</span>
                            <button
                                class="toast__dismiss"
                                title="Dismiss"
                                on:click=move |_| notices.update(|state| state.dismiss(id))
                            >
                                "x"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
