//! Scope discovery: search, concurrent fan-out and per-package settlement
//!
//! Discovery runs in two strictly ordered phases. Phase one searches the
//! registry for the scope and filters the hits down to true scope members;
//! any failure here is fatal. Phase two fetches every candidate's metadata
//! document concurrently and waits for all of them to settle, so one
//! package's failure never costs the others their place in the result.

use std::collections::HashSet;

use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use binscope_core::error::BinscopeError;
use binscope_core::types::ScopeQuery;

use crate::api::{SearchResponse, VersionMetadata};
use crate::client::{FetchConfig, RegistryClient};
use crate::normalize::{is_executable, normalize, NormalizedPackage};
use crate::RegistryResult;

/// Find all packages in `scope` that declare at least one executable command.
///
/// Fails for an invalid scope or an unrecoverable search failure. Individual
/// package lookups that fail after retries are logged and dropped from the
/// result instead of failing the call.
pub async fn discover(scope: &str, config: FetchConfig) -> RegistryResult<Vec<NormalizedPackage>> {
    let client = RegistryClient::with_config(config)?;
    client.discover(scope).await
}

impl RegistryClient {
    /// Scope discovery against this client's registry
    pub async fn discover(&self, scope: &str) -> RegistryResult<Vec<NormalizedPackage>> {
        let scope = ScopeQuery::parse(scope)?;

        // Phase 1: search, fatal on failure
        let search = self.search(scope.as_str()).await?;
        let names = scope_package_names(&search, &scope);
        info!(scope = %scope, candidates = names.len(), "search phase complete");

        if names.is_empty() {
            return Ok(Vec::new());
        }

        // Phase 2: one concurrent detail fetch per candidate
        let mut fetches = JoinSet::new();
        for name in names {
            let client = self.clone();
            fetches.spawn(async move {
                let outcome = client.fetch_package(&name).await;
                (name, outcome)
            });
        }

        // Every fetch settles before the result is produced, in whatever
        // order completions arrive
        let mut packages = Vec::new();
        while let Some(settled) = fetches.join_next().await {
            let (name, outcome) = match settled {
                Ok(pair) => pair,
                Err(join_error) => {
                    warn!(%join_error, "package fetch task failed to settle");
                    continue;
                }
            };

            match resolve_latest(&name, outcome) {
                Ok((latest, version, raw)) => {
                    if is_executable(&version) {
                        packages.push(normalize(&name, &latest, &version, raw));
                    } else {
                        debug!(package = %name, "skipped: no executable commands");
                    }
                }
                Err(error) => warn!(package = %name, %error, "skipped package"),
            }
        }

        Ok(packages)
    }
}

/// Names of the search hits that truly belong to the scope, deduplicated,
/// in the registry's relevance order
fn scope_package_names(search: &SearchResponse, scope: &ScopeQuery) -> Vec<String> {
    let mut seen = HashSet::new();
    search
        .objects
        .iter()
        .map(|object| object.package.name.as_str())
        .filter(|name| scope.matches(name))
        .filter(|name| seen.insert(name.to_string()))
        .map(str::to_string)
        .collect()
}

/// Extract the latest version record from a settled fetch outcome.
///
/// Maps every way a document can be unusable (fetch failure, missing
/// dist-tags or versions, dangling `latest` tag, malformed latest record)
/// to a per-package resolution error for the caller to report. Only the
/// latest version is decoded, other versions may have any shape.
fn resolve_latest(
    name: &str,
    outcome: RegistryResult<(crate::api::PackageDocument, Value)>,
) -> RegistryResult<(String, VersionMetadata, Value)> {
    let (document, raw) =
        outcome.map_err(|e| BinscopeError::resolution(name, e.to_string()))?;

    let dist_tags = document
        .dist_tags
        .ok_or_else(|| BinscopeError::resolution(name, "document has no dist-tags"))?;
    let mut versions = document
        .versions
        .ok_or_else(|| BinscopeError::resolution(name, "document has no versions"))?;

    let latest = dist_tags
        .get("latest")
        .ok_or_else(|| BinscopeError::resolution(name, "no 'latest' dist-tag"))?
        .clone();
    let raw_version = versions.remove(&latest).ok_or_else(|| {
        BinscopeError::resolution(name, format!("version '{}' is not published", latest))
    })?;
    let version: VersionMetadata = serde_json::from_value(raw_version).map_err(|e| {
        BinscopeError::resolution(name, format!("invalid metadata for version '{}': {}", latest, e))
    })?;

    Ok((latest, version, raw))
}
