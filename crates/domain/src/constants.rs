//! Application constants
//!
//! Backend endpoint paths and client defaults shared by every crate.

// Auth endpoints (relative to the API base URL)
pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/auth/register";
pub const AUTH_REFRESH_PATH: &str = "/auth/refresh";
pub const AUTH_LOGOUT_PATH: &str = "/auth/logout";
pub const AUTH_ME_PATH: &str = "/auth/me";
pub const AUTH_GOOGLE_LOGIN_PATH: &str = "/auth/google/login";

// Client defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("reelview/", env!("CARGO_PKG_VERSION"));

// Navigation defaults
pub const DEFAULT_SIGN_IN_PATH: &str = "/login";
pub const DEFAULT_HOME_PATH: &str = "/";
pub const DEFAULT_OAUTH_TOKEN_PARAM: &str = "access";

// Fallback messages for interactive auth failures
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";
pub const SIGNUP_FAILED_MESSAGE: &str = "Signup failed";
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";
