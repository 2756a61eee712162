//! # Reelview Infrastructure
//!
//! Infrastructure implementations of core session ports.
//!
//! This crate contains:
//! - HTTP transport with a cookie store for the refresh credential
//! - The authorizing API client and auth endpoint adapter
//! - Configuration loading
//! - A headless navigator and session wiring
//!
//! ## Architecture
//! - Implements traits defined in `reelview-core`
//! - Contains all "impure" code (network, environment, files)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod navigation;
pub mod session;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, AuthApi};
pub use errors::InfraError;
pub use http::*;
pub use navigation::InMemoryNavigator;
pub use session::{build_session, AppSessionManager, SessionHandle};
