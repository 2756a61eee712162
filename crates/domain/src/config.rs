//! Configuration structures
//!
//! Loading lives in `reelview-infra::config`; these are the plain shapes it
//! produces.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_HOME_PATH, DEFAULT_OAUTH_TOKEN_PARAM, DEFAULT_SIGN_IN_PATH,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RouteConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root backend URL, e.g. `http://localhost:8000`
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ApiConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Client-side navigation targets used by the session lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Where the user lands after logout or an unrecoverable refresh failure
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
    #[serde(default = "default_home_path")]
    pub home_path: String,
    /// Query parameter carrying the access token on the OAuth redirect-back
    #[serde(default = "default_oauth_token_param")]
    pub oauth_token_param: String,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            sign_in_path: default_sign_in_path(),
            home_path: default_home_path(),
            oauth_token_param: default_oauth_token_param(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_sign_in_path() -> String {
    DEFAULT_SIGN_IN_PATH.to_string()
}

fn default_home_path() -> String {
    DEFAULT_HOME_PATH.to_string()
}

fn default_oauth_token_param() -> String {
    DEFAULT_OAUTH_TOKEN_PARAM.to_string()
}
