//! npm registry client and scope discovery for binscope
//!
//! This crate fetches search results and package metadata from an npm
//! registry with per-attempt timeouts and fixed-delay retry, fans out over
//! the packages of a scope concurrently, and normalizes every package that
//! declares executable commands.

pub mod api;
pub mod client;
pub mod discover;
pub mod normalize;

// Re-export main types
pub use api::{PackageDocument, RepositoryInfo, SearchResponse, VersionMetadata};
pub use client::{FetchConfig, RegistryClient, DEFAULT_REGISTRY_URL};
pub use discover::discover;
pub use normalize::{NormalizedPackage, PackageLinks};

use binscope_core::error::BinscopeError;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, BinscopeError>;
