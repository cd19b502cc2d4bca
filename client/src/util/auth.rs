//! Browser glue between Leptos and the `authgate` core.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthHost` calls `install_auth_gate` once inside the router. It builds the
//! `AuthGate`, keeps it in a thread-local slot for pages to reach, mirrors the
//! published session into the `SessionState` signal, and forwards
//! `visibilitychange` and `beforeunload` into the suppressor and guard.
//! `install_route_guard` re-runs the guard on every path or session change.
//!
//! DESIGN
//! ======
//! The suppression pin is applied inside the `visibilitychange` handler with
//! `history.replaceState` before anything else runs, then handed to the
//! router with a replacing navigation so the pinned page renders. The guard
//! is suppressed at that point, so that navigation cannot redirect.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use authgate::{ConfigError, GuardConfig, GuardDecision};
use leptos::prelude::*;
use leptos_router::NavigateOptions;

#[cfg(feature = "csr")]
use std::cell::RefCell;
#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use authgate::{AuthGate, SuppressionWindow};
#[cfg(feature = "csr")]
use gloo_timers::callback::Timeout;
#[cfg(feature = "csr")]
use tracing::{debug, info, warn};

#[cfg(feature = "csr")]
use crate::net::gotrue::{GoTrueConfig, GoTrueProvider, parse_fragment};
use crate::state::notices::NoticeState;
use crate::state::session::SessionState;
#[cfg(feature = "csr")]
use crate::util::browser;

#[cfg(feature = "csr")]
pub type Gate = AuthGate<GoTrueProvider>;

/// Poll interval for the token refresh loop while no session is stored.
#[cfg(feature = "csr")]
const IDLE_REFRESH_POLL_MS: u64 = 60_000;

#[cfg(feature = "csr")]
thread_local! {
    static GATE: RefCell<Option<Rc<Gate>>> = const { RefCell::new(None) };
    static WINDOW_TIMER: RefCell<Option<Timeout>> = const { RefCell::new(None) };
    static SUBSCRIPTION: RefCell<Option<authgate::Unsubscribe>> = const { RefCell::new(None) };
}

/// The installed gate, if `install_auth_gate` has run.
#[cfg(feature = "csr")]
pub fn gate() -> Option<Rc<Gate>> {
    GATE.with(|slot| slot.borrow().clone())
}

/// Navigation options for every auth-driven redirect: replace, never push.
pub fn replace_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Path to navigate to for `decision`, if any.
pub fn redirect_for(decision: &GuardDecision) -> Option<&str> {
    decision.redirect_target()
}

/// `true` once startup has settled on a signed-in user.
pub fn settled_signed_in(state: &SessionState) -> bool {
    state.is_signed_in() && !state.loading
}

/// Where a signed-in user goes from an auth page: the attempted path, else the landing path.
pub fn signed_in_destination() -> String {
    #[cfg(feature = "csr")]
    {
        if let Some(gate) = gate() {
            return gate.guard().post_login_destination();
        }
    }
    load_config().routes.landing_path
}

/// Send a signed-in user away from the sign-in, sign-up and forgot-password pages.
///
/// The guard allows every public path, so the pages opt in to this themselves.
pub fn install_signed_in_redirect<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + 'static,
{
    Effect::new(move || {
        if settled_signed_in(&session.get()) {
            navigate(&signed_in_destination(), replace_options());
        }
    });
}

/// Build-time configuration lookup for `GuardConfig::from_lookup`.
fn build_env(key: &str) -> Option<String> {
    let value = match key {
        "AUTHGATE_SUPPRESSION_WINDOW_MS" => option_env!("AUTHGATE_SUPPRESSION_WINDOW_MS"),
        "AUTHGATE_STARTUP_TIMEOUT_MS" => option_env!("AUTHGATE_STARTUP_TIMEOUT_MS"),
        "AUTHGATE_STORAGE_PREFIX" => option_env!("AUTHGATE_STORAGE_PREFIX"),
        "AUTHGATE_LOGIN_PATH" => option_env!("AUTHGATE_LOGIN_PATH"),
        "AUTHGATE_LANDING_PATH" => option_env!("AUTHGATE_LANDING_PATH"),
        "AUTHGATE_PUBLIC_PATHS" => option_env!("AUTHGATE_PUBLIC_PATHS"),
        _ => None,
    };
    value.map(str::to_owned)
}

/// Guard configuration for this build, falling back to defaults on bad values.
pub fn load_config() -> GuardConfig {
    config_or_default(GuardConfig::from_lookup(build_env))
}

fn config_or_default(parsed: Result<GuardConfig, ConfigError>) -> GuardConfig {
    parsed.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid auth configuration; using defaults");
        GuardConfig::default()
    })
}

/// Build the gate and wire it to the browser. Call once, inside the router.
pub fn install_auth_gate<F>(session: RwSignal<SessionState>, notices: RwSignal<NoticeState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    #[cfg(feature = "csr")]
    {
        if gate().is_some() {
            return;
        }
        let config = load_config();
        let clock: Rc<dyn authgate::Clock> = Rc::new(browser::BrowserClock);
        let local: Rc<dyn authgate::KeyValueStore> = Rc::new(browser::LocalStorageStore);
        let provider = GoTrueProvider::new(
            GoTrueConfig::from_build_env(),
            Rc::clone(&local),
            config.storage_key("provider-session"),
            Rc::clone(&clock),
        );
        let gate = Rc::new(AuthGate::new(config, provider, local, Rc::new(browser::SessionStorageStore), clock));
        GATE.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&gate)));

        gate.reconciler().on_notice(move |notice| {
            let mut id = 0;
            notices.update(|state| id = state.push(notice));
            Timeout::new(crate::state::notices::TOAST_TTL_MS, move || {
                notices.update(|state| state.dismiss(id));
            })
            .forget();
        });

        let (subscription, pump) = gate.reconciler().subscribe(move |published| {
            let loading = self::gate().is_some_and(|g| g.reconciler().is_loading());
            session.update(|state| state.apply(published, loading));
        });
        SUBSCRIPTION.with(|slot| *slot.borrow_mut() = Some(subscription));
        leptos::task::spawn_local(pump);

        install_visibility_listener(session, navigate.clone());
        install_unload_listener();
        spawn_boot(Rc::clone(&gate), navigate);
        spawn_refresh_loop();
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (session, notices, navigate);
    }
}

/// Run the guard whenever the path, the session, or the guard tick changes.
pub fn install_route_guard<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let location = leptos_router::hooks::use_location();
    Effect::new(move || {
        let path = location.pathname.get();
        session.track();
        #[cfg(feature = "csr")]
        {
            let Some(gate) = gate() else {
                return;
            };
            let decision = gate.decide(&path);
            if let Some(to) = redirect_for(&decision) {
                navigate(to, replace_options());
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (&path, &navigate);
        }
    });
}

#[cfg(feature = "csr")]
fn spawn_boot<F>(gate: Rc<Gate>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    leptos::task::spawn_local(async move {
        // Recovery and confirmation links carry their tokens in the fragment.
        if let Some(tokens) = parse_fragment(&browser::fragment()) {
            if let Err(e) = gate.reconciler().provider().adopt_fragment(&tokens).await {
                warn!(error = %e, "could not adopt session from link");
            }
            browser::replace_path(&browser::current_path());
        }

        let timeout = gloo_timers::future::sleep(std::time::Duration::from_millis(gate.config().startup_timeout_ms));
        let boot = gate.boot(timeout, &browser::current_path()).await;
        if let Some(to) = boot.restore_to.as_deref() {
            navigate(to, replace_options());
        }
    });
}

#[cfg(feature = "csr")]
fn spawn_refresh_loop() {
    leptos::task::spawn_local(async move {
        loop {
            let Some(gate) = gate() else {
                break;
            };
            let delay = gate
                .reconciler()
                .provider()
                .refresh_delay_ms()
                .unwrap_or(IDLE_REFRESH_POLL_MS)
                .max(1_000);
            gloo_timers::future::sleep(std::time::Duration::from_millis(delay)).await;
            if let Err(e) = gate.reconciler().provider().refresh_if_due().await {
                warn!(error = %e, "token refresh failed; will retry");
            }
        }
    });
}

#[cfg(feature = "csr")]
fn install_visibility_listener<F>(session: RwSignal<SessionState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    use wasm_bindgen::{JsCast, closure::Closure};

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let on_change = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        let Some(gate) = gate() else {
            return;
        };
        let path = browser::current_path();
        if browser::document_hidden() {
            gate.on_hidden(&path);
            return;
        }
        let resume = gate.on_visible(&path);
        if let Some(pin) = resume.pin.as_deref() {
            browser::replace_path(pin);
            navigate(pin, replace_options());
        }
        arm_window_timer(resume.window, session);
    }) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(e) = document.add_event_listener_with_callback("visibilitychange", on_change.as_ref().unchecked_ref()) {
        warn!(error = ?e, "could not listen for visibility changes");
        return;
    }
    on_change.forget();
}

#[cfg(feature = "csr")]
fn install_unload_listener() {
    use wasm_bindgen::{JsCast, closure::Closure};

    let Some(window) = web_sys::window() else {
        return;
    };
    let on_unload = Closure::wrap(Box::new(move |_ev: web_sys::Event| {
        if let Some(gate) = gate() {
            gate.on_before_unload(&browser::current_path());
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    if let Err(e) = window.add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref()) {
        warn!(error = ?e, "could not listen for beforeunload");
        return;
    }
    on_unload.forget();
}

/// Arm the timer that ends `window`. Replacing the slot drops, and so cancels, the previous timer.
#[cfg(feature = "csr")]
fn arm_window_timer(window: SuppressionWindow, session: RwSignal<SessionState>) {
    let generation = window.generation;
    let delay = u32::try_from(window.duration_ms.saturating_add(1)).unwrap_or(u32::MAX);
    let timer = Timeout::new(delay, move || {
        if gate().is_some_and(|g| g.on_window_elapsed(generation)) {
            debug!(generation, "suppression window over; re-running guard");
            session.update(SessionState::bump_guard);
        }
    });
    WINDOW_TIMER.with(|slot| *slot.borrow_mut() = Some(timer));
    info!(generation, "suppression window armed");
}
