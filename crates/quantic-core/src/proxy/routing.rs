//! Local / Proxied routing decision.
//!
//! Rules, first match wins:
//! 1. path starts with the reserved prefix (`/api/`)      -> Local
//! 2. path is on the local-asset allow-list               -> Local
//! 3. last segment has a static extension                 -> Local*
//! 4. anything else                                       -> Proxied
//!
//! *With [`AssetPrecedence::ExistingFile`] rule 3 additionally requires the
//! file to be present in the startup [`LocalFileIndex`]; otherwise the path
//! falls through to the upstream, whose own bundles use the same extensions.
//!
//! Matching is done on the raw request path. Percent-encoded names are not
//! decoded, so `/style%2Ecss` is not treated as `/style.css`.

use std::collections::HashSet;

use quantic_types::{AssetPrecedence, RouteDecision, RoutingConfig};

use super::file_index::LocalFileIndex;

/// Immutable routing policy built once at startup.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    reserved_prefix: String,
    local_assets: HashSet<String>,
    static_extensions: HashSet<String>,
    precedence: AssetPrecedence,
    index: LocalFileIndex,
}

impl RoutePolicy {
    pub fn new(config: &RoutingConfig, index: LocalFileIndex) -> Self {
        Self {
            reserved_prefix: config.reserved_prefix.clone(),
            local_assets: config.local_assets.iter().cloned().collect(),
            static_extensions: config
                .static_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
            precedence: config.precedence,
            index,
        }
    }

    pub fn precedence(&self) -> AssetPrecedence {
        self.precedence
    }

    pub fn is_reserved(&self, path: &str) -> bool {
        path.starts_with(&self.reserved_prefix)
    }

    /// Classify a request path.
    pub fn decide(&self, path: &str) -> RouteDecision {
        if self.is_reserved(path) || self.local_assets.contains(path) {
            return RouteDecision::Local;
        }

        if self.has_static_extension(path) {
            let local = match self.precedence {
                AssetPrecedence::LocalExtension => true,
                AssetPrecedence::ExistingFile => self.index.contains(path),
            };
            if local {
                return RouteDecision::Local;
            }
        }

        RouteDecision::Proxied
    }

    fn has_static_extension(&self, path: &str) -> bool {
        extension_of(path)
            .is_some_and(|ext| self.static_extensions.contains(&ext.to_ascii_lowercase()))
    }
}

/// Extension of the last path segment, without the dot.
pub fn extension_of(path: &str) -> Option<&str> {
    let segment = path.rsplit('/').next()?;
    let (_, ext) = segment.rsplit_once('.')?;
    (!ext.is_empty()).then_some(ext)
}
