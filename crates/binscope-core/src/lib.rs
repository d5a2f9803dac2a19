//! # binscope-core
//!
//! Core types shared across all binscope crates.
//!
//! This crate provides:
//! - BinscopeError enum for unified error handling
//! - ScopeQuery, a validated npm scope string
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `error`: Error types and result aliases
//! - `types`: Core data types (ScopeQuery)

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{BinscopeError, BinscopeResult};
pub use types::ScopeQuery;
