//! Batch consumer: load a flat class hierarchy, resolve every method return
//! type once and bucket the results.

pub mod classify;
pub mod hierarchy;
pub mod pipeline;

pub use classify::TypeClassifier;
pub use hierarchy::{HierarchyDescription, TypeEntry, load_hierarchy};
pub use pipeline::{DatasetPipeline, DatasetReport, MethodRecord};
