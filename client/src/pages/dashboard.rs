//! Authenticated dashboard shell.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every `/dashboard/*` path renders here, so the route guard and the
//! persisted route store see the full nested path. The page itself never
//! redirects; `install_route_guard` owns that.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::state::session::SessionState;

const SECTIONS: [(&str, &str); 4] = [
    ("", "Overview"),
    ("flows", "Flows"),
    ("reports", "Reports"),
    ("settings", "Settings"),
];

/// Heading for the wildcard `section` segment. Unknown sections keep their raw name.
pub fn section_title(section: Option<&str>) -> String {
    let key = section.unwrap_or_default().trim_matches('/');
    let first = key.split('/').next().unwrap_or_default();
    SECTIONS
        .iter()
        .find(|(slug, _)| *slug == first)
        .map_or_else(|| first.to_owned(), |(_, title)| (*title).to_owned())
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionState>>();
    let params = use_params_map();
    let busy = RwSignal::new(false);

    let title = move || section_title(params.read().get("section").as_deref());
    let name = move || session.get().display_name().to_owned();
    let role = move || session.get().user.map(|u| u.role).unwrap_or_default();

    let on_sign_out = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);
        #[cfg(feature = "csr")]
        leptos::task::spawn_local(async move {
            if let Some(gate) = crate::util::auth::gate() {
                // Failure raises a toast; success republishes and the guard redirects.
                let _ = gate.reconciler().sign_out().await;
            }
            busy.set(false);
        });
    };

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>"BusinessOS"</h1>
                <nav class="dashboard-nav">
                    {SECTIONS
                        .iter()
                        .map(|(slug, label)| {
                            let href = if slug.is_empty() { "/dashboard".to_owned() } else { format!("/dashboard/{slug}") };
                            view! { <a href=href>{*label}</a> }
                        })
                        .collect_view()}
                </nav>
                <div class="dashboard-user">
                    <span class="dashboard-user__name">{name}</span>
                    <span class="dashboard-user__role">{role}</span>
                    <button class="auth-button" on:click=on_sign_out disabled=move || busy.get()>
                        "Sign out"
                    </button>
                </div>
            </header>
            <main class="dashboard-main">
                <h2>{title}</h2>
            </main>
        </div>
    }
}
