use super::classify::TypeClassifier;
use crate::config::PipelineConfig;
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};
use typescope_core::SymbolTree;
use typescope_core::metrics::{HealthCounters, HealthSnapshot};
use typescope_core::model::{NodeId, TypeRefId};
use typescope_java::{ResolveOptions, Resolver};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRecord {
    /// Dotted path of the method.
    pub method: String,
    pub file: PathBuf,
    /// The return type as written.
    pub return_type: String,
    pub canonical: Option<String>,
    pub is_array: bool,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReport {
    /// Sorted by method path.
    pub records: Vec<MethodRecord>,
    /// Record count per group, every known group listed.
    pub groups: IndexMap<String, usize>,
    pub health: HealthSnapshot,
}

pub struct DatasetPipeline {
    classifier: TypeClassifier,
    config: PipelineConfig,
}

impl DatasetPipeline {
    pub fn new(classifier: TypeClassifier, config: PipelineConfig) -> Self {
        Self { classifier, config }
    }

    /// Resolve every method return type in `tree` once and classify it.
    ///
    /// Runs with batch options, so the tree ends up with no subscriptions.
    /// A sub-resolution never leaves the file that owns its anchor, which
    /// makes files independent units of parallel work.
    pub fn run(&self, tree: &SymbolTree) -> DatasetReport {
        let started = Instant::now();
        let metrics = HealthCounters::new();
        let resolver = Resolver::new(tree, &metrics).with_options(ResolveOptions::batch());

        let mut files: Vec<(&Path, NodeId)> = tree.files().collect();
        files.sort();

        let per_file: Vec<Vec<MethodRecord>> = if self.config.parallel {
            files
                .par_iter()
                .map(|(path, file)| self.records_for(&resolver, path, *file))
                .collect()
        } else {
            files
                .iter()
                .map(|(path, file)| self.records_for(&resolver, path, *file))
                .collect()
        };

        let mut records: Vec<MethodRecord> = per_file.into_iter().flatten().collect();
        records.sort_by(|a, b| a.method.cmp(&b.method));

        let mut groups: IndexMap<String, usize> = self
            .classifier
            .group_names()
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();
        for record in &records {
            *groups.entry(record.group.clone()).or_default() += 1;
        }

        let health = metrics.snapshot();
        info!(
            "classified {} method(s) from {} file(s) in {:?} ({} unresolved lookups, {} dependency imports)",
            records.len(),
            files.len(),
            started.elapsed(),
            health.failures,
            health.dependency_imports
        );
        DatasetReport {
            records,
            groups,
            health,
        }
    }

    fn records_for(&self, resolver: &Resolver<'_>, path: &Path, file: NodeId) -> Vec<MethodRecord> {
        let tree = resolver.tree();
        let records: Vec<MethodRecord> = resolver
            .resolve_all_in_file(file)
            .into_iter()
            .filter_map(|(method, resolution)| {
                let reference = tree.type_ref(TypeRefId::return_type(method))?;
                let canonical = resolution.canonical().map(str::to_string);
                let group = self
                    .classifier
                    .classify(canonical.as_deref(), reference.is_array())
                    .to_string();
                Some(MethodRecord {
                    method: tree.path(method)?.to_string(),
                    file: path.to_path_buf(),
                    return_type: reference.name().to_string(),
                    canonical,
                    is_array: reference.is_array(),
                    group,
                })
            })
            .collect();
        debug!("{}: {} record(s)", path.display(), records.len());
        records
    }
}
