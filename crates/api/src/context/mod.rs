//! Application context - dependency injection container

use std::sync::Arc;

use reelview_core::{Navigator, SessionSnapshot};
use reelview_domain::{
    ClientConfig, RegisterResponse, RegistrationForm, ReelviewError, Result, UserProfile,
};
use reelview_infra::{build_session, SessionHandle};
use tracing::info;

/// Application context - owns the configuration and one session
pub struct AppContext {
    pub config: ClientConfig,
    pub session: SessionHandle,
}

impl AppContext {
    /// Wire a context around `navigator`.
    ///
    /// # Errors
    /// Returns `ReelviewError::Config` if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let session = build_session(&config, navigator)?;
        info!(base_url = %config.api.base_url, "application context created");
        Ok(Self { config, session })
    }

    /// Run startup session restoration. Later calls return the current
    /// snapshot.
    pub async fn start(&self) -> SessionSnapshot {
        self.session.manager.restore_session().await
    }

    /// Sign in with email and password and adopt the resulting session.
    ///
    /// # Errors
    /// Returns the backend's message on rejection; the session is left as it
    /// was.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserProfile> {
        let response = self.session.auth.login(email, password).await.map_err(ReelviewError::from)?;
        self.session.manager.login(response.access, response.user.clone());
        Ok(response.user)
    }

    /// Create an account. Does not sign in.
    ///
    /// # Errors
    /// `ReelviewError::InvalidInput` for local validation failures, else the
    /// backend's message.
    pub async fn sign_up(&self, form: &RegistrationForm) -> Result<RegisterResponse> {
        self.session.auth.register(form).await.map_err(ReelviewError::from)
    }

    /// Authorization URL to start a Google sign-in.
    ///
    /// # Errors
    /// Transport or backend failure.
    pub async fn google_login_url(&self) -> Result<String> {
        self.session.auth.google_login_url().await.map_err(ReelviewError::from)
    }

    /// Log out; always succeeds locally.
    pub async fn sign_out(&self) {
        self.session.manager.logout().await;
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.manager.snapshot()
    }
}
