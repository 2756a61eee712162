//! # Reelview Domain
//!
//! Domain types shared by every Reelview crate.
//!
//! This crate contains:
//! - Auth payloads and the user profile
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Endpoint paths and client defaults
//!
//! ## Architecture
//! - No dependencies on other Reelview crates
//! - Only external dependencies allowed

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
