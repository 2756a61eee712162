//! # Reelview App
//!
//! Application layer - context wiring and the `reelview` command line.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Tracing setup
//! - Main entry point
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod context;
pub mod utils;

pub use context::*;
