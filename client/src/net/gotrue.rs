//! GoTrue REST implementation of `authgate::IdentityProvider`.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`, with the provider
//! session persisted in `localStorage` and events fanned out through an
//! `AuthEventChannel`. The request/response helpers below are pure so they
//! can be unit tested natively.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to `ProviderError::Network`, non-2xx responses to
//! `ProviderError::Rejected` with the service's own message, and bodies that
//! do not parse to `ProviderError::Malformed`. A rejected refresh token is not
//! an error for `get_current_session`: the stored session is dropped and the
//! user is simply signed out.

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod gotrue_test;

#[cfg(any(test, feature = "csr"))]
use authgate::{ProviderError, ProviderSession, ProviderUser, SignUpOutcome};
#[cfg(any(test, feature = "csr"))]
use serde::Deserialize;

#[cfg(feature = "csr")]
use std::rc::Rc;

#[cfg(feature = "csr")]
use authgate::{AuthEvent, AuthEventChannel, AuthEvents, Clock, IdentityProvider, KeyValueStore, UserMetadata};
#[cfg(feature = "csr")]
use tracing::{debug, info, warn};

/// Refresh this many seconds before the access token expires.
pub const REFRESH_MARGIN_SECS: u64 = 60;
const DEFAULT_PROVIDER_URL: &str = "http://localhost:9999";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoTrueConfig {
    /// Project base URL; endpoints live under `/auth/v1`.
    pub url: String,
    /// Public anon key sent as the `apikey` header.
    pub anon_key: String,
}

impl GoTrueConfig {
    #[must_use]
    pub fn new(url: &str, anon_key: &str) -> Self {
        Self { url: url.trim().trim_end_matches('/').to_owned(), anon_key: anon_key.trim().to_owned() }
    }

    /// Values baked in at build time.
    ///
    /// - `AUTHGATE_PROVIDER_URL`: default `http://localhost:9999`
    /// - `AUTHGATE_PROVIDER_ANON_KEY`: default empty
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("AUTHGATE_PROVIDER_URL").unwrap_or(DEFAULT_PROVIDER_URL),
            option_env!("AUTHGATE_PROVIDER_ANON_KEY").unwrap_or_default(),
        )
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{path}", self.url)
    }
}

// =============================================================================
// Wire helpers
// =============================================================================

#[cfg(any(test, feature = "csr"))]
fn token_endpoint(config: &GoTrueConfig, grant_type: &str) -> String {
    config.endpoint(&format!("/token?grant_type={grant_type}"))
}

#[cfg(any(test, feature = "csr"))]
fn recover_endpoint(config: &GoTrueConfig, redirect_url: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect_to", redirect_url)
        .finish();
    config.endpoint(&format!("/recover?{query}"))
}

#[cfg(any(test, feature = "csr"))]
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    expires_at: Option<u64>,
    user: ProviderUser,
}

#[cfg(any(test, feature = "csr"))]
impl TokenResponse {
    fn into_session(self, now_secs: u64) -> ProviderSession {
        let expires_at = self.expires_at.or_else(|| self.expires_in.map(|secs| now_secs.saturating_add(secs)));
        ProviderSession { access_token: self.access_token, refresh_token: self.refresh_token, expires_at, user: self.user }
    }
}

#[cfg(any(test, feature = "csr"))]
fn malformed(e: &serde_json::Error) -> ProviderError {
    ProviderError::Malformed(e.to_string())
}

/// Parse a `/token` response.
#[cfg(any(test, feature = "csr"))]
fn parse_session(body: &str, now_secs: u64) -> Result<ProviderSession, ProviderError> {
    let token: TokenResponse = serde_json::from_str(body).map_err(|e| malformed(&e))?;
    Ok(token.into_session(now_secs))
}

/// `/signup` returns a token response when auto-confirm is on, otherwise the bare user.
#[cfg(any(test, feature = "csr"))]
fn parse_sign_up(body: &str, now_secs: u64) -> Result<SignUpOutcome, ProviderError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| malformed(&e))?;
    if value.get("access_token").is_some() {
        let token: TokenResponse = serde_json::from_value(value).map_err(|e| malformed(&e))?;
        return Ok(SignUpOutcome::SignedIn(token.into_session(now_secs)));
    }
    let user_value = value.get("user").cloned().unwrap_or(value);
    let user: ProviderUser = serde_json::from_value(user_value).map_err(|e| malformed(&e))?;
    Ok(SignUpOutcome::ConfirmationRequired(user))
}

#[cfg(any(test, feature = "csr"))]
fn parse_user(body: &str) -> Result<ProviderUser, ProviderError> {
    serde_json::from_str(body).map_err(|e| malformed(&e))
}

/// Build the rejection for a non-2xx response, preferring the service's own wording.
#[cfg(any(test, feature = "csr"))]
fn rejection(status: u16, body: &str) -> ProviderError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(serde_json::Value::as_str).map(str::to_owned))
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"));
    ProviderError::Rejected { status: Some(status), message }
}

/// A session is due for refresh once it is inside the refresh margin.
#[cfg(any(test, feature = "csr"))]
fn is_expired(session: &ProviderSession, now_secs: u64) -> bool {
    session.expires_at.is_some_and(|at| at <= now_secs.saturating_add(REFRESH_MARGIN_SECS))
}

/// Seconds until the next refresh, `None` when the session never expires.
#[cfg(any(test, feature = "csr"))]
fn refresh_delay_secs(session: &ProviderSession, now_secs: u64) -> Option<u64> {
    session.expires_at.map(|at| at.saturating_sub(REFRESH_MARGIN_SECS).saturating_sub(now_secs))
}

/// Tokens delivered in the URL fragment by recovery and confirmation links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FragmentTokens {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<u64>,
    /// `recovery`, `signup`, `magiclink`, ...
    pub kind: Option<String>,
}

impl FragmentTokens {
    #[must_use]
    pub fn is_recovery(&self) -> bool {
        self.kind.as_deref() == Some("recovery")
    }
}

/// Parse `#access_token=...&refresh_token=...&type=recovery`. Values come back decoded.
#[must_use]
pub fn parse_fragment(fragment: &str) -> Option<FragmentTokens> {
    let mut access_token = None;
    let mut refresh_token = None;
    let mut expires_in = None;
    let mut kind = None;
    for (key, value) in url::form_urlencoded::parse(fragment.trim_start_matches('#').as_bytes()) {
        match key.as_ref() {
            "access_token" if !value.is_empty() => access_token = Some(value.into_owned()),
            "refresh_token" if !value.is_empty() => refresh_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse().ok(),
            "type" => kind = Some(value.into_owned()),
            _ => {}
        }
    }
    Some(FragmentTokens { access_token: access_token?, refresh_token, expires_in, kind })
}

// =============================================================================
// Provider
// =============================================================================

/// GoTrue-backed identity provider.
#[cfg(feature = "csr")]
pub struct GoTrueProvider {
    config: GoTrueConfig,
    store: Rc<dyn KeyValueStore>,
    key: String,
    clock: Rc<dyn Clock>,
    channel: AuthEventChannel,
}

#[cfg(feature = "csr")]
impl GoTrueProvider {
    pub fn new(config: GoTrueConfig, store: Rc<dyn KeyValueStore>, key: impl Into<String>, clock: Rc<dyn Clock>) -> Self {
        Self { config, store, key: key.into(), clock, channel: AuthEventChannel::new() }
    }

    fn now_secs(&self) -> u64 {
        self.clock.now_ms() / 1_000
    }

    fn stored(&self) -> Option<ProviderSession> {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "failed to read provider session");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "ignoring unreadable provider session");
                None
            }
        }
    }

    fn save(&self, session: &ProviderSession) {
        let Ok(raw) = serde_json::to_string(session) else {
            return;
        };
        if let Err(e) = self.store.set(&self.key, &raw) {
            warn!(error = %e, "failed to persist provider session");
        }
    }

    fn forget(&self) {
        if let Err(e) = self.store.remove(&self.key) {
            warn!(error = %e, "failed to clear provider session");
        }
    }

    /// Stored session that is not yet inside the refresh margin.
    fn live_session(&self) -> Option<ProviderSession> {
        self.stored().filter(|s| !is_expired(s, self.now_secs()))
    }

    async fn send(
        &self,
        method: gloo_net::http::Method,
        url: &str,
        body: Option<&serde_json::Value>,
        bearer: Option<&str>,
    ) -> Result<String, ProviderError> {
        let network = |e: gloo_net::Error| ProviderError::Network(e.to_string());
        let mut builder = gloo_net::http::RequestBuilder::new(url)
            .method(method)
            .header("apikey", &self.config.anon_key);
        if let Some(token) = bearer {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder.json(body).map_err(network)?,
            None => builder.build().map_err(network)?,
        };
        let resp = request.send().await.map_err(network)?;
        let status = resp.status();
        let text = resp.text().await.map_err(network)?;
        if resp.ok() {
            Ok(text)
        } else {
            debug!(url, status, "provider rejected request");
            Err(rejection(status, &text))
        }
    }

    async fn refresh(&self, refresh_token: &str) -> Result<ProviderSession, ProviderError> {
        let url = token_endpoint(&self.config, "refresh_token");
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let text = self.send(gloo_net::http::Method::POST, &url, Some(&body), None).await?;
        let session = parse_session(&text, self.now_secs())?;
        self.save(&session);
        info!(user_id = %session.user.id, "refreshed provider session");
        Ok(session)
    }

    /// Refresh the stored session when it is due, publishing the outcome.
    ///
    /// A rejected refresh token signs the user out.
    pub async fn refresh_if_due(&self) -> Result<Option<ProviderSession>, ProviderError> {
        let Some(stored) = self.stored() else {
            return Ok(None);
        };
        if !is_expired(&stored, self.now_secs()) {
            return Ok(Some(stored));
        }
        let Some(refresh_token) = stored.refresh_token.clone() else {
            self.forget();
            self.channel.publish(&AuthEvent::SignedOut);
            return Ok(None);
        };
        match self.refresh(&refresh_token).await {
            Ok(session) => {
                self.channel.publish(&AuthEvent::TokenRefreshed(session.clone()));
                Ok(Some(session))
            }
            Err(e @ ProviderError::Rejected { .. }) => {
                warn!(error = %e, "refresh token rejected; signing out");
                self.forget();
                self.channel.publish(&AuthEvent::SignedOut);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Milliseconds until the stored session should be refreshed.
    #[must_use]
    pub fn refresh_delay_ms(&self) -> Option<u64> {
        let session = self.stored()?;
        refresh_delay_secs(&session, self.now_secs()).map(|secs| secs.saturating_mul(1_000))
    }

    /// Turn fragment tokens from an email link into a stored session.
    pub async fn adopt_fragment(&self, tokens: &FragmentTokens) -> Result<ProviderSession, ProviderError> {
        let url = self.config.endpoint("/user");
        let text = self.send(gloo_net::http::Method::GET, &url, None, Some(&tokens.access_token)).await?;
        let user = parse_user(&text)?;
        let session = ProviderSession {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_at: tokens.expires_in.map(|secs| self.now_secs().saturating_add(secs)),
            user,
        };
        self.save(&session);
        info!(user_id = %session.user.id, kind = ?tokens.kind, "adopted session from link");
        self.channel.publish(&AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }
}

#[cfg(feature = "csr")]
impl IdentityProvider for GoTrueProvider {
    async fn get_current_session(&self) -> Result<Option<ProviderSession>, ProviderError> {
        self.refresh_if_due().await
    }

    fn subscribe(&self) -> AuthEvents {
        self.channel.subscribe(self.live_session())
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<ProviderSession, ProviderError> {
        let url = token_endpoint(&self.config, "password");
        let body = serde_json::json!({ "email": email, "password": password });
        let text = self.send(gloo_net::http::Method::POST, &url, Some(&body), None).await?;
        let session = parse_session(&text, self.now_secs())?;
        self.save(&session);
        self.channel.publish(&AuthEvent::SignedIn(session.clone()));
        Ok(session)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        metadata: &UserMetadata,
    ) -> Result<SignUpOutcome, ProviderError> {
        let url = self.config.endpoint("/signup");
        let body = serde_json::json!({ "email": email, "password": password, "data": metadata });
        let text = self.send(gloo_net::http::Method::POST, &url, Some(&body), None).await?;
        let outcome = parse_sign_up(&text, self.now_secs())?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.save(session);
            self.channel.publish(&AuthEvent::SignedIn(session.clone()));
        }
        Ok(outcome)
    }

    async fn sign_out(&self) -> Result<(), ProviderError> {
        if let Some(stored) = self.stored() {
            let url = self.config.endpoint("/logout");
            match self.send(gloo_net::http::Method::POST, &url, None, Some(&stored.access_token)).await {
                Ok(_) => {}
                // The token is already dead server-side; finish locally.
                Err(ProviderError::Rejected { status: Some(401 | 403 | 404), .. }) => {}
                Err(e) => return Err(e),
            }
        }
        self.forget();
        self.channel.publish(&AuthEvent::SignedOut);
        Ok(())
    }

    async fn send_password_reset(&self, email: &str, redirect_url: &str) -> Result<(), ProviderError> {
        let url = recover_endpoint(&self.config, redirect_url);
        let body = serde_json::json!({ "email": email });
        self.send(gloo_net::http::Method::POST, &url, Some(&body), None).await?;
        Ok(())
    }

    async fn update_password(&self, new_password: &str) -> Result<ProviderUser, ProviderError> {
        let Some(mut stored) = self.stored() else {
            return Err(ProviderError::Rejected { status: None, message: "Your reset link has expired.".to_owned() });
        };
        let url = self.config.endpoint("/user");
        let body = serde_json::json!({ "password": new_password });
        let text = self.send(gloo_net::http::Method::PUT, &url, Some(&body), Some(&stored.access_token)).await?;
        let user = parse_user(&text)?;
        stored.user = user.clone();
        self.save(&stored);
        Ok(user)
    }
}
