//! Shared test helpers for `reelview-core` integration tests.
//!
//! Lightweight port mocks so the session tests can focus on behaviour.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use reelview_core::{AccessTokenStore, AuthBackend, Navigator, SessionState};
use reelview_domain::{ReelviewError, Result, UserProfile};

pub fn user(email: &str) -> UserProfile {
    serde_json::from_value(serde_json::json!({ "email": email, "name": "Test User" })).unwrap()
}

/// Backend with canned results and call counters
pub struct MockBackend {
    refresh_result: Result<String>,
    user_result: Result<UserProfile>,
    logout_result: Result<()>,
    observed_state: OnceLock<Arc<SessionState>>,
    pub refresh_calls: AtomicUsize,
    pub user_calls: AtomicUsize,
    pub logout_calls: AtomicUsize,
    /// Token held by the session at each `current_user` call
    pub tokens_seen_by_me: Mutex<Vec<Option<String>>>,
}

impl MockBackend {
    /// No refresh cookie: refresh and `/me` both fail
    pub fn anonymous() -> Self {
        Self::new(
            Err(ReelviewError::Auth("no refresh cookie".into())),
            Err(ReelviewError::Auth("not authenticated".into())),
        )
    }

    /// Valid refresh cookie yielding `token`
    pub fn with_refresh(token: &str, user: UserProfile) -> Self {
        Self::new(Ok(token.to_string()), Ok(user))
    }

    pub fn new(refresh_result: Result<String>, user_result: Result<UserProfile>) -> Self {
        Self {
            refresh_result,
            user_result,
            logout_result: Ok(()),
            observed_state: OnceLock::new(),
            refresh_calls: AtomicUsize::new(0),
            user_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            tokens_seen_by_me: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_logout(mut self) -> Self {
        self.logout_result = Err(ReelviewError::Network("connection reset".into()));
        self
    }

    /// Record the session's token whenever `/me` is called
    pub fn observe(&self, state: Arc<SessionState>) {
        let _ = self.observed_state.set(state);
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthBackend for MockBackend {
    async fn refresh(&self) -> Result<String> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_result.clone()
    }

    async fn current_user(&self) -> Result<UserProfile> {
        self.user_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(state) = self.observed_state.get() {
            self.tokens_seen_by_me.lock().unwrap().push(state.access_token());
        }
        self.user_result.clone()
    }

    async fn logout(&self) -> Result<()> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout_result.clone()
    }
}

/// Navigator that records every location change
pub struct RecordingNavigator {
    location: Mutex<String>,
    pub replaced: Mutex<Vec<String>>,
    pub redirects: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn at(location: &str) -> Self {
        Self {
            location: Mutex::new(location.to_string()),
            replaced: Mutex::new(Vec::new()),
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn replaced(&self) -> Vec<String> {
        self.replaced.lock().unwrap().clone()
    }

    pub fn redirects(&self) -> Vec<String> {
        self.redirects.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn current_location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    fn replace_location(&self, location: &str) {
        *self.location.lock().unwrap() = location.to_string();
        self.replaced.lock().unwrap().push(location.to_string());
    }

    fn redirect(&self, location: &str) {
        *self.location.lock().unwrap() = location.to_string();
        self.redirects.lock().unwrap().push(location.to_string());
    }
}
