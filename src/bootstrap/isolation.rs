//! Isolation group partitioning.
//!
//! Splits the resolved artifact set into per-target groups so the launcher
//! can give each plugin scope its own classloader. Targets are processed in
//! caller order and a URL claimed by an earlier target is never reported
//! again by a later one; that keeps the embedded/remote artifact lists
//! disjoint across groups, so the launcher never loads the same jar under
//! two scopes.

use std::collections::{BTreeSet, HashSet};
use std::path::PathBuf;

use super::error::Result;
use crate::resolve::{ArtifactSubset, IsolationTarget, ModuleId};

/// The external resolver, seen from the composer.
///
/// Implementations own the resolved dependency graph; the composer only ever
/// asks for module subsets and, in standalone mode, their materialized files.
pub trait ArtifactSource {
    /// Selects the artifacts belonging to `modules`, in resolution order.
    fn subset(&self, modules: &BTreeSet<ModuleId>) -> ArtifactSubset;

    /// Materialized local files for `modules`.
    ///
    /// # Errors
    ///
    /// Fails when an artifact in the subset was never downloaded.
    fn fetch(&self, modules: &BTreeSet<ModuleId>) -> Result<Vec<PathBuf>>;
}

/// One isolation target's share of the artifact set.
///
/// Thin groups carry the target's not-yet-claimed URLs; standalone groups
/// carry the target's full file list instead. Owned by the composer for the
/// duration of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationGroup {
    /// Target name, used in the generated archive entry names
    pub name: String,

    /// Remote URLs first claimed by this target (thin mode)
    pub urls: Vec<String>,

    /// Materialized files for the whole target subset (standalone mode)
    pub files: Vec<PathBuf>,
}

/// Partition the artifact set over the ordered isolation targets.
///
/// An explicit fold: the set of already-claimed URLs is threaded through an
/// ordered pass over `targets`. For each target the subset's URLs are
/// filtered against the claimed set (order preserved, first target wins) and
/// the claimed set is extended with the survivors. In standalone mode the
/// group's files are re-fetched for the full target subset; the claimed-URL
/// filter only governs which URLs the group reports, never which files it
/// owns. A target with no modules still yields an (empty) group, keeping the
/// generated metadata complete for scripting consumers.
pub fn partition(
    source: &dyn ArtifactSource,
    targets: &[IsolationTarget],
    standalone: bool,
) -> Result<Vec<IsolationGroup>> {
    let mut claimed: HashSet<String> = HashSet::new();
    let mut groups = Vec::with_capacity(targets.len());

    for target in targets {
        let subset = source.subset(&target.modules);
        let fresh: Vec<String> = subset
            .urls()
            .into_iter()
            .filter(|url| !claimed.contains(url))
            .collect();

        let group = if standalone {
            IsolationGroup {
                name: target.name.clone(),
                urls: Vec::new(),
                files: source.fetch(&target.modules)?,
            }
        } else {
            IsolationGroup {
                name: target.name.clone(),
                urls: fresh.clone(),
                files: Vec::new(),
            }
        };

        log::debug!(
            "isolation target '{}': {} urls ({} new), {} files",
            target.name,
            subset.artifacts().len(),
            fresh.len(),
            group.files.len()
        );

        claimed.extend(fresh);
        groups.push(group);
    }

    Ok(groups)
}
