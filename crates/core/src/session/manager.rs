//! Session manager
//!
//! Drives the session lifecycle:
//! - One-shot restoration at startup (OAuth callback token, else silent
//!   refresh via the ambient refresh cookie)
//! - Interactive login adoption
//! - Best-effort logout with unconditional local teardown

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use reelview_domain::{Result, RouteConfig, UserProfile};
use tokio::sync::watch;
use tracing::{debug, info, warn};
use url::Url;

use super::ports::{AccessTokenStore, AuthBackend, Navigator};
use super::state::{SessionPhase, SessionSnapshot, SessionState};

/// Origin used to resolve path-only locations; never rendered back out.
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// Single source of truth for authentication state.
///
/// Restoration runs at most once per instance, so after the loading flag
/// clears `is_logged_in` only changes through `login`, `logout`, or the HTTP
/// layer tearing the session down.
pub struct SessionManager<B, N>
where
    B: AuthBackend + ?Sized,
    N: Navigator + ?Sized,
{
    state: Arc<SessionState>,
    backend: Arc<B>,
    navigator: Arc<N>,
    routes: RouteConfig,
    restore_started: AtomicBool,
}

impl<B, N> SessionManager<B, N>
where
    B: AuthBackend + ?Sized,
    N: Navigator + ?Sized,
{
    /// Create a new session manager
    ///
    /// # Arguments
    /// * `state` - Session state, shared with the HTTP layer as its token store
    /// * `backend` - Auth endpoints used for restoration and logout
    /// * `navigator` - Client-side navigation
    /// * `routes` - Sign-in path and OAuth callback parameter name
    #[must_use]
    pub fn new(
        state: Arc<SessionState>,
        backend: Arc<B>,
        navigator: Arc<N>,
        routes: RouteConfig,
    ) -> Self {
        Self { state, backend, navigator, routes, restore_started: AtomicBool::new(false) }
    }

    /// Restore a session at startup.
    ///
    /// An access token in the OAuth callback parameter takes precedence; the
    /// refresh cookie is only tried when it is absent. Failures resolve to an
    /// anonymous session and are not returned. The loading flag is cleared on
    /// every path. Calls after the first return the current snapshot without
    /// doing anything.
    pub async fn restore_session(&self) -> SessionSnapshot {
        if self.restore_started.swap(true, Ordering::SeqCst) {
            debug!("session restoration already ran; skipping");
            return self.state.snapshot();
        }

        let location = self.navigator.current_location();
        let outcome =
            match take_query_param(&location, &self.routes.oauth_token_param) {
                Some((token, cleaned)) => self.restore_from_callback(token, &cleaned).await,
                None => self.restore_from_refresh().await,
            };

        if let Err(err) = outcome {
            debug!(error = %err, kind = err.label(), "no session restored");
            self.state.clear();
        }

        self.state.finish_loading();

        let snapshot = self.state.snapshot();
        info!(logged_in = snapshot.is_logged_in(), "session restoration complete");
        snapshot
    }

    async fn restore_from_callback(&self, token: String, cleaned_location: &str) -> Result<()> {
        debug!("adopting access token from OAuth callback");
        self.state.set_access_token(Some(token));
        // Strip the token before the profile fetch. A reload never replays it,
        // and a sign-in redirect raised during the fetch is the last navigation.
        self.navigator.replace_location(cleaned_location);

        let user = self.backend.current_user().await?;
        self.state.set_user(user);
        Ok(())
    }

    async fn restore_from_refresh(&self) -> Result<()> {
        let token = self.backend.refresh().await?;
        self.state.set_access_token(Some(token));

        let user = self.backend.current_user().await?;
        self.state.set_user(user);
        Ok(())
    }

    /// Adopt a token/profile pair obtained from an interactive sign-in.
    ///
    /// The token is immediately visible to the HTTP layer through the shared
    /// store. No network call is made.
    pub fn login(&self, token: String, user: UserProfile) {
        self.state.authenticate(token, user);
        info!("user logged in");
    }

    /// Log out.
    ///
    /// The backend call is best effort; local state is cleared and the
    /// navigator sent to the sign-in view even if it fails.
    pub async fn logout(&self) {
        if let Err(err) = self.backend.logout().await {
            warn!(error = %err, "backend logout failed; clearing local session anyway");
        }

        self.state.clear();
        self.navigator.redirect(&self.routes.sign_in_path);
        info!("user logged out");
    }

    /// Whether an access token is held
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in()
    }

    /// Whether startup restoration is still pending
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Profile of the signed-in user
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.state.user()
    }

    /// Current bearer token
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state.access_token()
    }

    /// Copy of the current session
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.snapshot()
    }

    /// Lifecycle phase of the current session
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.snapshot().phase()
    }

    /// Receiver notified on every session change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// Wait for restoration to settle; see [`SessionState::ready`].
    pub async fn ready(&self) -> SessionSnapshot {
        self.state.ready().await
    }

    /// Shared state handle, for wiring the HTTP layer's token store
    #[must_use]
    pub fn state(&self) -> &Arc<SessionState> {
        &self.state
    }
}

/// Remove `param` from the query of `location`.
///
/// Returns the (non-empty) parameter value together with the location
/// rewritten without it. Path-only locations stay path-only.
fn take_query_param(location: &str, param: &str) -> Option<(String, String)> {
    let (url, relative) = match Url::parse(location) {
        Ok(url) => (url, false),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            (Url::parse(PLACEHOLDER_ORIGIN).ok()?.join(location).ok()?, true)
        }
        Err(_) => return None,
    };

    let mut value = None;
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter_map(|(key, val)| {
            if key == param {
                if value.is_none() {
                    value = Some(val.into_owned());
                }
                None
            } else {
                Some((key.into_owned(), val.into_owned()))
            }
        })
        .collect();

    let token = value.filter(|token| !token.is_empty())?;

    let mut cleaned = url;
    if kept.is_empty() {
        cleaned.set_query(None);
    } else {
        cleaned.query_pairs_mut().clear().extend_pairs(&kept);
    }

    let rendered = if relative {
        let mut out = cleaned.path().to_string();
        if let Some(query) = cleaned.query() {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = cleaned.fragment() {
            out.push('#');
            out.push_str(fragment);
        }
        out
    } else {
        cleaned.to_string()
    };

    Some((token, rendered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_param_from_absolute_url() {
        let (token, cleaned) =
            take_query_param("http://localhost:5173/?access=abc.def", "access").unwrap();

        assert_eq!(token, "abc.def");
        assert_eq!(cleaned, "http://localhost:5173/");
    }

    #[test]
    fn keeps_other_params_and_fragment() {
        let (token, cleaned) =
            take_query_param("/browse?tab=anime&access=T1#top", "access").unwrap();

        assert_eq!(token, "T1");
        assert_eq!(cleaned, "/browse?tab=anime#top");
    }

    #[test]
    fn ignores_missing_or_empty_param() {
        assert!(take_query_param("http://localhost:5173/?tab=tv", "access").is_none());
        assert!(take_query_param("/?access=", "access").is_none());
        assert!(take_query_param("/", "access").is_none());
    }
}
