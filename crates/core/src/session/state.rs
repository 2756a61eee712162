//! Process-wide session state
//!
//! Holds the access token, user profile and loading flag behind a
//! `tokio::sync::watch` channel so consumers can read a consistent snapshot
//! synchronously or await changes.

use reelview_domain::UserProfile;
use tokio::sync::watch;
use tracing::debug;

use super::ports::AccessTokenStore;

/// Coarse lifecycle phase derived from a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup restoration has not settled yet
    Loading,
    /// Settled with an access token
    Authenticated,
    /// Settled without an access token
    Anonymous,
}

/// Point-in-time view of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Bearer token attached to outbound requests
    pub access_token: Option<String>,
    /// Profile of the signed-in user, once fetched
    pub user: Option<UserProfile>,
    /// True until the first restoration attempt settles
    pub loading: bool,
}

impl SessionSnapshot {
    fn initial() -> Self {
        Self { access_token: None, user: None, loading: true }
    }

    /// Whether an access token is held
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.access_token.is_some()
    }

    /// Lifecycle phase; `Loading` wins over the token state
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.is_logged_in() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}

/// Owner of the session snapshot.
///
/// Construct one per client process (or per test) and share it by `Arc`.
pub struct SessionState {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionState {
    /// Fresh state: no token, no user, loading
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::initial());
        Self { tx }
    }

    /// Copy of the current session
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every session change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    /// Wait until startup restoration has settled and return the snapshot at
    /// that point.
    pub async fn ready(&self) -> SessionSnapshot {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => snapshot.clone(),
            // The sender lives as long as `self`, so the channel cannot close here.
            Err(_) => self.snapshot(),
        };
        settled
    }

    /// Whether an access token is held
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.tx.borrow().is_logged_in()
    }

    /// Whether startup restoration is still pending
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.tx.borrow().loading
    }

    /// Profile of the signed-in user
    #[must_use]
    pub fn user(&self) -> Option<UserProfile> {
        self.tx.borrow().user.clone()
    }

    /// Adopt a token and profile in a single update
    pub fn authenticate(&self, token: String, user: UserProfile) {
        self.tx.send_modify(|session| {
            session.access_token = Some(token);
            session.user = Some(user);
        });
    }

    /// Replace the profile, keeping the token
    pub fn set_user(&self, user: UserProfile) {
        self.tx.send_modify(|session| session.user = Some(user));
    }

    /// Drop token and profile
    pub fn clear(&self) {
        self.tx.send_if_modified(|session| {
            let changed = session.access_token.is_some() || session.user.is_some();
            session.access_token = None;
            session.user = None;
            changed
        });
    }

    /// Clear the loading flag. Returns `false` if it was already cleared.
    pub fn finish_loading(&self) -> bool {
        let finished = self.tx.send_if_modified(|session| {
            let was_loading = session.loading;
            session.loading = false;
            was_loading
        });
        if finished {
            debug!("session loading flag cleared");
        }
        finished
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl AccessTokenStore for SessionState {
    fn access_token(&self) -> Option<String> {
        self.tx.borrow().access_token.clone()
    }

    fn set_access_token(&self, token: Option<String>) {
        self.tx.send_if_modified(|session| match token {
            Some(token) => {
                let changed = session.access_token.as_deref() != Some(token.as_str());
                session.access_token = Some(token);
                changed
            }
            None => {
                // Without a token there is no session; the profile goes with it.
                let changed = session.access_token.is_some() || session.user.is_some();
                session.access_token = None;
                session.user = None;
                changed
            }
        });
    }
}
