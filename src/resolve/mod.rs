//! Resolved artifact graph loading and subsetting.
//!
//! Dependency resolution itself happens outside this crate; the resolver
//! hands over a JSON document listing every resolved artifact (remote URL,
//! optional local file, owning module) plus the ordered isolation targets.
//! This module loads that document once, validates it field by field, and
//! exposes the subset operations the composer consumes.

use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use url::Url;

use crate::bootstrap::isolation::ArtifactSource;
use crate::error::{CliError, Result};

/// Module identifier in the resolver's `group:name` form. Opaque here.
pub type ModuleId = String;

/// One resolved dependency file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Remote URL the artifact resolves to
    pub url: String,

    /// Locally materialized copy, present when the resolver downloaded it
    pub local_file: Option<PathBuf>,
}

/// A named isolation scope and the modules assigned to it.
///
/// Targets keep the order they appear in the graph document; that order
/// decides which target first claims a shared URL.
#[derive(Debug, Clone, Deserialize)]
pub struct IsolationTarget {
    /// Scope name, used in the generated archive entry names
    pub name: String,

    /// Modules whose artifacts belong to this scope
    #[serde(default)]
    pub modules: BTreeSet<ModuleId>,
}

/// An ordered selection of artifacts out of the graph.
#[derive(Debug, Clone, Default)]
pub struct ArtifactSubset {
    artifacts: Vec<Artifact>,
}

impl ArtifactSubset {
    /// Returns the selected artifacts in graph order.
    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Returns the selected remote URLs in graph order.
    pub fn urls(&self) -> Vec<String> {
        self.artifacts.iter().map(|a| a.url.clone()).collect()
    }
}

/// Raw graph document entry.
#[derive(Debug, Clone, Deserialize)]
struct ResolvedArtifact {
    url: String,

    #[serde(default)]
    file: Option<PathBuf>,

    module: ModuleId,
}

/// The resolver's output: every resolved artifact plus isolation targets.
#[derive(Debug, Deserialize)]
pub struct ResolvedGraph {
    #[serde(default)]
    artifacts: Vec<ResolvedArtifact>,

    #[serde(default)]
    isolation: Vec<IsolationTarget>,
}

impl ResolvedGraph {
    /// Load a resolved graph document from disk (single read + parse).
    ///
    /// # Errors
    ///
    /// Returns `CliError::InvalidGraph` when the file cannot be read or a
    /// field fails validation, and a JSON error when it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        // Step 1: Read file once
        let raw = std::fs::read_to_string(path).map_err(|e| CliError::InvalidGraph {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        // Step 2: Parse JSON once
        let graph: Self = serde_json::from_str(&raw)?;

        // Step 3: Validate fields (no additional I/O)
        graph.validate()?;

        if graph.artifacts.is_empty() {
            log::warn!("{} resolves to no artifacts", path.display());
        }

        Ok(graph)
    }

    /// Build a graph in memory, validating it like [`load`](Self::load).
    pub fn new(
        artifacts: Vec<(String, Option<PathBuf>, ModuleId)>,
        isolation: Vec<IsolationTarget>,
    ) -> Result<Self> {
        let graph = Self {
            artifacts: artifacts
                .into_iter()
                .map(|(url, file, module)| ResolvedArtifact { url, file, module })
                .collect(),
            isolation,
        };
        graph.validate()?;
        Ok(graph)
    }

    fn validate(&self) -> std::result::Result<(), CliError> {
        for artifact in &self.artifacts {
            Url::parse(&artifact.url).map_err(|e| CliError::InvalidGraph {
                reason: format!("artifact url '{}' is not a valid URL: {}", artifact.url, e),
            })?;

            if artifact.module.is_empty() {
                return Err(CliError::InvalidGraph {
                    reason: format!("artifact '{}' has an empty module id", artifact.url),
                });
            }
        }

        let mut seen = HashSet::new();
        for target in &self.isolation {
            if target.name.is_empty() {
                return Err(CliError::InvalidGraph {
                    reason: "isolation target with an empty name".to_string(),
                });
            }
            if !seen.insert(target.name.as_str()) {
                return Err(CliError::InvalidGraph {
                    reason: format!("duplicate isolation target '{}'", target.name),
                });
            }
        }

        Ok(())
    }

    /// Returns the isolation targets in document order.
    pub fn isolation_targets(&self) -> &[IsolationTarget] {
        &self.isolation
    }

    /// Returns the modules not claimed by any isolation target.
    pub fn main_modules(&self) -> BTreeSet<ModuleId> {
        let isolated = self.isolated_modules();
        self.artifacts
            .iter()
            .filter(|a| !isolated.contains(&a.module))
            .map(|a| a.module.clone())
            .collect()
    }

    /// Returns the main (non-isolated) artifact set in graph order.
    pub fn main_subset(&self) -> ArtifactSubset {
        let isolated = self.isolated_modules();
        self.select(|module| !isolated.contains(module))
    }

    fn isolated_modules(&self) -> BTreeSet<&ModuleId> {
        self.isolation.iter().flat_map(|t| t.modules.iter()).collect()
    }

    fn select(&self, keep: impl Fn(&ModuleId) -> bool) -> ArtifactSubset {
        ArtifactSubset {
            artifacts: self
                .artifacts
                .iter()
                .filter(|a| keep(&a.module))
                .map(|a| Artifact {
                    url: a.url.clone(),
                    local_file: a.file.clone(),
                })
                .collect(),
        }
    }
}

impl ArtifactSource for ResolvedGraph {
    fn subset(&self, modules: &BTreeSet<ModuleId>) -> ArtifactSubset {
        self.select(|module| modules.contains(module))
    }

    fn fetch(&self, modules: &BTreeSet<ModuleId>) -> crate::bootstrap::Result<Vec<PathBuf>> {
        self.artifacts
            .iter()
            .filter(|a| modules.contains(&a.module))
            .map(|a| {
                a.file
                    .clone()
                    .ok_or_else(|| crate::bootstrap::Error::MissingArtifactFile {
                        url: a.url.clone(),
                    })
            })
            .collect()
    }
}
