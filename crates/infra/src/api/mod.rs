//! Backend API client
//!
//! Authorizing HTTP client with single-flight token refresh, and typed
//! wrappers for the auth endpoints.
//!
//! # Architecture
//!
//! - Uses [`crate::http::HttpClient`] for transport (no direct reqwest calls)
//! - Bearer token read from an injected [`reelview_core::AccessTokenStore`]
//! - One refresh at a time; requests failing meanwhile wait for its outcome
//! - Requests are plain data so they can be reissued after a refresh

pub mod auth;
pub mod client;
pub mod errors;
pub mod refresh;
pub mod request;

pub use auth::AuthApi;
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use refresh::{RefreshOutcome, RefreshQueue};
pub use request::{ApiRequest, FormPart, RequestBody};
