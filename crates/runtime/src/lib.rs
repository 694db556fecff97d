//! Consumers of the resolver: a live editor session and a batch dataset
//! pipeline, plus their configuration.

pub mod config;
pub mod dataset;
pub mod diagnostics;
pub mod session;

pub use config::{PipelineConfig, SessionConfig, TypeClassConfig, TypeGroup};
pub use dataset::{
    DatasetPipeline, DatasetReport, HierarchyDescription, MethodRecord, TypeClassifier,
    load_hierarchy,
};
pub use diagnostics::{Diagnostic, Severity};
pub use session::WorkspaceSession;

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(typescope_core::logging::init_logging(component, to_stderr))
}
