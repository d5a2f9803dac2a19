//! Executable-package classification and output normalization

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use crate::api::VersionMetadata;

/// Web host for the links.npm template
const NPM_WEB_URL: &str = "https://www.npmjs.com/package";

/// A package that declares executable commands, in display-ready form.
///
/// Immutable after construction and owned by the caller, the discovery
/// phase keeps no reference to it.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedPackage {
    /// Full package name, scope included
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The version the `latest` dist-tag points to
    pub version: String,
    /// Declared executable commands, non-empty for every package returned
    /// by discovery
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<HashMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Related web pages
    pub links: PackageLinks,
    /// The full registry document, untouched, for caller introspection
    pub original: Value,
}

/// Related links for a normalized package
#[derive(Debug, Clone, Serialize)]
pub struct PackageLinks {
    /// Package page on the registry's web front end
    pub npm: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
}

/// True iff the version declares at least one executable command.
///
/// A present-but-empty `bin` mapping does not qualify.
pub fn is_executable(version: &VersionMetadata) -> bool {
    version.bin.as_ref().is_some_and(|bin| !bin.is_empty())
}

/// Map a version record into the normalized output shape
pub fn normalize(
    name: &str,
    latest: &str,
    version: &VersionMetadata,
    original: Value,
) -> NormalizedPackage {
    let repository = version
        .repository
        .as_ref()
        .and_then(|repo| repo.url.as_deref())
        .map(clean_repository_url);

    NormalizedPackage {
        name: name.to_string(),
        description: version.description.clone(),
        version: latest.to_string(),
        bin: version.bin.clone(),
        dependencies: version.dependencies.clone(),
        scripts: version.scripts.clone(),
        keywords: version.keywords.clone(),
        links: PackageLinks {
            npm: format!("{}/{}", NPM_WEB_URL, name),
            repository,
            homepage: version.homepage.clone(),
        },
        original,
    }
}

/// Strip the VCS prefix and archive suffix from a repository URL.
///
/// Removes at most one leading `git+` and one trailing `.git`, so
/// `git+https://github.com/x/y.git` becomes `https://github.com/x/y`.
/// Anything else passes through unchanged.
pub fn clean_repository_url(url: &str) -> String {
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.to_string()
}
