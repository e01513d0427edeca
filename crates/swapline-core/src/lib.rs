//! Swapline-core: Shared types, errors, and protocol configuration
//!
//! This crate provides the foundational types used across the Swapline workspace.

pub mod config;
pub mod errors;
pub mod types;
pub mod version;

pub use config::*;
pub use errors::*;
pub use types::*;
pub use version::*;
