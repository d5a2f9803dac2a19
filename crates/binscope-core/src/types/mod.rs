//! Core data types.
//!
//! Defines the validated scope query used to drive discovery.

use std::fmt;

use crate::error::{BinscopeError, BinscopeResult};

/// A validated npm scope, e.g. `@modelcontextprotocol`.
///
/// Construction guarantees the string starts with `@` and has a non-empty
/// name after the marker. No network shape is implied, this is purely the
/// caller-supplied namespace to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeQuery(String);

impl ScopeQuery {
    /// Validate and wrap a raw scope string
    pub fn parse(scope: &str) -> BinscopeResult<Self> {
        let valid = scope.starts_with('@') && scope.len() > 1;
        if !valid {
            return Err(BinscopeError::InvalidScope {
                scope: scope.to_string(),
            });
        }
        Ok(Self(scope.to_string()))
    }

    /// The raw scope string, marker included
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a package name belongs to this scope.
    ///
    /// This is a case-sensitive prefix match on the raw name, which is what
    /// separates true scope members from text-relevance near-matches the
    /// search endpoint also returns.
    pub fn matches(&self, package_name: &str) -> bool {
        package_name.starts_with(&self.0)
    }
}

impl fmt::Display for ScopeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
