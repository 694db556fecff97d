//! Live editor session over one workspace.
//!
//! Every edit replaces a file's whole subtree. Resolution is deferred to
//! [`WorkspaceSession::refresh`], which drains the tree's notifications,
//! re-resolves the references they name and republishes diagnostics.

use crate::config::SessionConfig;
use crate::diagnostics::Diagnostic;
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use typescope_core::metrics::{HealthCounters, HealthSnapshot};
use typescope_core::model::{FileSource, NodeId, ResolutionOrigin, ResolutionStatus, TypeRefId};
use typescope_core::tree::{Subscriber, TreeEvent};
use typescope_core::{Result, SymbolTree, TypescopeError};
use typescope_java::Resolver;

pub struct WorkspaceSession {
    tree: SymbolTree,
    metrics: HealthCounters,
    config: SessionConfig,
    sources: HashMap<PathBuf, FileSource>,
    /// Files the editor has open; only these publish diagnostics.
    open: HashSet<PathBuf>,
    diagnostics: HashMap<PathBuf, Vec<Diagnostic>>,
    /// Files to resolve on the next refresh.
    pending: IndexSet<PathBuf>,
    /// Files whose diagnostics were dropped since the last refresh.
    cleared: IndexSet<PathBuf>,
    /// The tree gained nodes since the last refresh.
    grown: bool,
}

impl Default for WorkspaceSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl WorkspaceSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            tree: SymbolTree::new(),
            metrics: HealthCounters::new(),
            config,
            sources: HashMap::new(),
            open: HashSet::new(),
            diagnostics: HashMap::new(),
            pending: IndexSet::new(),
            cleared: IndexSet::new(),
            grown: false,
        }
    }

    pub fn tree(&self) -> &SymbolTree {
        &self.tree
    }

    pub fn health(&self) -> HealthSnapshot {
        self.metrics.snapshot()
    }

    pub fn is_open(&self, path: &Path) -> bool {
        self.open.contains(path)
    }

    pub fn source(&self, path: &Path) -> Option<&FileSource> {
        self.sources.get(path)
    }

    /// Index `source` and start publishing its diagnostics.
    pub fn open(&mut self, source: FileSource) -> Result<NodeId> {
        let path = source.path.clone();
        let id = self.replace(source)?;
        self.open.insert(path);
        Ok(id)
    }

    /// Re-index a file after an edit.
    pub fn change(&mut self, source: FileSource) -> Result<NodeId> {
        self.replace(source)
    }

    /// Stop publishing diagnostics for `path`. The file stays indexed since
    /// it still exists in the workspace.
    pub fn close(&mut self, path: &Path) -> bool {
        if !self.open.remove(path) {
            return false;
        }
        self.drop_diagnostics(path);
        true
    }

    /// Move a file: its old subtree goes away and the stored source is
    /// re-indexed under `to`.
    pub fn rename(&mut self, from: &Path, to: &Path) -> Result<NodeId> {
        let mut source = self.sources.remove(from).ok_or_else(|| {
            TypescopeError::InvalidInput(format!("{} is not indexed", from.display()))
        })?;
        self.tree.remove_file(from)?;
        self.pending.shift_remove(from);
        self.drop_diagnostics(from);
        let was_open = self.open.remove(from);

        source.path = to.to_path_buf();
        let id = self.replace(source)?;
        if was_open {
            self.open.insert(to.to_path_buf());
        }
        info!("renamed {} -> {}", from.display(), to.display());
        Ok(id)
    }

    /// Remove a file from the workspace. Returns `false` if it was unknown.
    pub fn delete(&mut self, path: &Path) -> Result<bool> {
        let known = self.sources.remove(path).is_some();
        let removed = self.tree.remove_file(path)?.is_some();
        self.open.remove(path);
        self.pending.shift_remove(path);
        self.drop_diagnostics(path);
        Ok(known || removed)
    }

    fn replace(&mut self, source: FileSource) -> Result<NodeId> {
        let path = source.path.clone();
        self.tree.remove_file(&path)?;
        let id = self.tree.insert_file(&source)?;
        self.sources.insert(path.clone(), source);
        self.pending.insert(path);
        self.grown = true;
        Ok(id)
    }

    fn drop_diagnostics(&mut self, path: &Path) {
        if let Some(previous) = self.diagnostics.remove(path) {
            if !previous.is_empty() {
                self.cleared.insert(path.to_path_buf());
            }
        }
    }

    /// Published diagnostics for `path`; empty for files that are not open.
    pub fn diagnostics(&self, path: &Path) -> &[Diagnostic] {
        self.diagnostics
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Bring resolution and diagnostics up to date with every edit made
    /// since the previous refresh. Returns the files whose published
    /// diagnostics changed, sorted.
    pub fn refresh(&mut self) -> Vec<PathBuf> {
        let stale = self.invalidate_notified();
        for path in stale {
            self.pending.insert(path);
        }
        if std::mem::take(&mut self.grown) {
            for path in self.files_with_failures() {
                self.pending.insert(path);
            }
        }

        let pending: Vec<PathBuf> = self.pending.drain(..).collect();
        let resolver = Resolver::new(&self.tree, &self.metrics);
        for path in &pending {
            match self.tree.file_id(path) {
                Some(file) => {
                    let resolved = resolver.resolve_all_in_file(file);
                    debug!("resolved {} method(s) in {}", resolved.len(), path.display());
                }
                None => warn!("refresh: {} is no longer indexed", path.display()),
            }
        }

        let mut changed: Vec<PathBuf> = self.cleared.drain(..).collect();
        for path in pending {
            if !self.open.contains(&path) {
                continue;
            }
            let fresh = self.compute_diagnostics(&path);
            let previous = self.diagnostics.insert(path.clone(), fresh);
            if previous.as_ref() != self.diagnostics.get(&path) {
                changed.push(path);
            }
        }
        changed.sort();
        changed.dedup();
        changed
    }

    /// Reset every reference named by a pending notification and return the
    /// files that own them.
    fn invalidate_notified(&self) -> IndexSet<PathBuf> {
        let notifications = self.tree.take_notifications();
        let mut stale = IndexSet::new();
        for notification in notifications {
            let Subscriber::Reference(reference) = notification.subscriber else {
                continue;
            };
            if let TreeEvent::Removed { node } = notification.event {
                debug!("{}: target {} left the tree", reference, node);
            }
            if !self.tree.invalidate(reference) {
                continue;
            }
            if let Some(path) = self.owning_path(reference) {
                stale.insert(path);
            }
        }
        stale
    }

    fn owning_path(&self, reference: TypeRefId) -> Option<PathBuf> {
        let file = self.tree.file_of(reference.owner)?;
        let code = self.tree.element(file)?.as_file()?;
        Some(code.source_path.clone())
    }

    /// Indexed files holding a method return type whose last attempt failed.
    fn files_with_failures(&self) -> Vec<PathBuf> {
        let mut out: Vec<PathBuf> = self
            .tree
            .files()
            .filter(|(_, file)| {
                self.tree.methods_under(*file).into_iter().any(|m| {
                    self.tree
                        .type_ref(TypeRefId::return_type(m))
                        .is_some_and(|r| r.status() == ResolutionStatus::Failed)
                })
            })
            .map(|(path, _)| path.to_path_buf())
            .collect();
        out.sort();
        out
    }

    fn compute_diagnostics(&self, path: &Path) -> Vec<Diagnostic> {
        let Some(file) = self.tree.file_id(path) else {
            return Vec::new();
        };
        self.tree
            .methods_under(file)
            .into_iter()
            .filter_map(|m| {
                let reference = self.tree.type_ref(TypeRefId::return_type(m))?;
                let method = self.tree.path(m)?.to_string();
                if !reference.is_resolved() {
                    return Some(Diagnostic::unresolved(
                        path.to_path_buf(),
                        method,
                        reference.name(),
                    ));
                }
                if self.config.report_dependency_imports
                    && reference.origin() == Some(ResolutionOrigin::Dependency)
                {
                    return Some(Diagnostic::dependency(
                        path.to_path_buf(),
                        method,
                        reference.name(),
                        &reference.canonical_name(),
                    ));
                }
                None
            })
            .collect()
    }
}
