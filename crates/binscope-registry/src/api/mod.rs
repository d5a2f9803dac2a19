//! npm registry API response types
//!
//! Typed views over the two endpoints binscope consumes: full-text search
//! and the per-package metadata document. Decoding is structural only, so
//! fields whose absence is a per-package condition rather than a protocol
//! violation are modeled as `Option`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from the registry search endpoint (`/-/v1/search`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Search hits in the registry's relevance order
    pub objects: Vec<SearchObject>,
    /// Total number of matches known to the registry
    #[serde(default)]
    pub total: Option<u64>,
    /// Server-side timestamp of the search
    #[serde(default)]
    pub time: Option<String>,
}

/// One search hit wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchObject {
    pub package: SearchPackage,
}

/// Abbreviated package record inside a search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchPackage {
    /// Full package name, scope included
    pub name: String,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Package metadata document from the per-package endpoint.
///
/// `dist-tags` and `versions` are required for a document to be usable,
/// but a document missing them is skipped rather than treated as a decode
/// failure, hence the `Option` wrappers.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageDocument {
    #[serde(default)]
    pub name: Option<String>,
    /// Named version pointers, `latest` being the one binscope reads
    #[serde(rename = "dist-tags", default)]
    pub dist_tags: Option<HashMap<String, String>>,
    /// All published versions keyed by version string.
    ///
    /// Kept as raw JSON: only `versions[dist-tags.latest]` is ever decoded,
    /// so a historical version with an odd shape (old npm published `bin`
    /// as a bare string, for one) cannot disqualify the package.
    #[serde(default)]
    pub versions: Option<HashMap<String, Value>>,
}

/// Metadata for a specific package version
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Declared executable commands, command name to entry point
    #[serde(default)]
    pub bin: Option<HashMap<String, String>>,
    #[serde(default)]
    pub scripts: Option<HashMap<String, String>>,
    #[serde(default)]
    pub dependencies: Option<HashMap<String, String>>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    /// Repository reference. Registries also serve a string shorthand
    /// here, which carries no URL and is treated as absent.
    #[serde(default, deserialize_with = "lenient_repository")]
    pub repository: Option<RepositoryInfo>,
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Repository information
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RepositoryInfo {
    /// Repository type (usually "git")
    #[serde(rename = "type", default)]
    pub repo_type: Option<String>,
    /// Repository URL
    #[serde(default)]
    pub url: Option<String>,
}

/// Accept the object form of `repository` and treat any other shape as
/// absent, the link is optional metadata and never worth a decode failure
fn lenient_repository<'de, D>(deserializer: D) -> Result<Option<RepositoryInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}
