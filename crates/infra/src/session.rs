//! Session wiring
//!
//! Builds one independent session: state, authorizing client, auth adapter
//! and manager, all sharing the same token store.

use std::sync::Arc;

use reelview_core::{AccessTokenStore, Navigator, SessionManager, SessionState};
use reelview_domain::{ClientConfig, ReelviewError, Result};
use tracing::debug;

use crate::api::{ApiClient, ApiClientConfig, AuthApi};

/// Session manager as wired by [`build_session`]
pub type AppSessionManager = SessionManager<AuthApi, dyn Navigator>;

/// Everything one client session needs, sharing a single token store
#[derive(Clone)]
pub struct SessionHandle {
    pub state: Arc<SessionState>,
    pub client: Arc<ApiClient>,
    pub auth: Arc<AuthApi>,
    pub manager: Arc<AppSessionManager>,
}

/// Build a session around `navigator`.
///
/// Each call yields a fresh state; nothing is shared between handles.
///
/// # Errors
/// Returns `ReelviewError::Config` if the HTTP client cannot be built.
pub fn build_session(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<SessionHandle> {
    let state = Arc::new(SessionState::new());
    let tokens: Arc<dyn AccessTokenStore> = state.clone();

    let client = ApiClient::new(ApiClientConfig::from(config), tokens, navigator.clone())
        .map_err(ReelviewError::from)?;
    let client = Arc::new(client);

    let auth = Arc::new(AuthApi::new(client.clone()));
    let manager = Arc::new(SessionManager::new(
        state.clone(),
        auth.clone(),
        navigator,
        config.routes.clone(),
    ));

    debug!(base_url = %config.api.base_url, "session wired");
    Ok(SessionHandle { state, client, auth, manager })
}
