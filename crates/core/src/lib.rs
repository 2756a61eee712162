//! # Reelview Core
//!
//! Session logic with no infrastructure dependencies.
//!
//! This crate contains:
//! - The session state and its lifecycle rules
//! - Port interfaces (traits) for the auth backend, token store, navigation
//! - The session manager use cases
//!
//! ## Architecture Principles
//! - Only depends on `reelview-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits

pub mod session;

pub use session::{
    AccessTokenStore, AuthBackend, Navigator, SessionManager, SessionPhase, SessionSnapshot,
    SessionState,
};
