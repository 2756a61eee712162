//! Port interfaces for the session lifecycle
//!
//! These traits define the boundaries between the session manager and the
//! infrastructure it drives: the token store shared with the HTTP layer, the
//! auth backend, and client-side navigation.

use async_trait::async_trait;
use reelview_domain::{Result, UserProfile};

/// Getter/setter pair through which the HTTP layer reads and replaces the
/// current access token.
///
/// Both operations are synchronous so a caller can read the token and act on
/// it without an intervening suspension point.
pub trait AccessTokenStore: Send + Sync {
    /// Current access token, if any
    fn access_token(&self) -> Option<String>;

    /// Replace the access token. `None` ends the session.
    fn set_access_token(&self, token: Option<String>);
}

/// Auth calls the session manager performs on its own
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Exchange the ambient refresh credential for a new access token
    async fn refresh(&self) -> Result<String>;

    /// Fetch the profile belonging to the current access token
    async fn current_user(&self) -> Result<UserProfile>;

    /// Invalidate the refresh credential server-side
    async fn logout(&self) -> Result<()>;
}

/// Client-side navigation
pub trait Navigator: Send + Sync {
    /// Location currently displayed, absolute URL or path with query
    fn current_location(&self) -> String;

    /// Rewrite the visible location in place (history replace, no reload)
    fn replace_location(&self, location: &str);

    /// Hard navigation to `location`
    fn redirect(&self, location: &str);
}
