mod common;

use common::*;
use std::io::Write;
use typescope_runtime::{
    DatasetPipeline, HierarchyDescription, PipelineConfig, TypeClassConfig, TypeClassifier,
    load_hierarchy,
};

fn pipeline(parallel: bool) -> DatasetPipeline {
    let classifier = TypeClassifier::new(TypeClassConfig::from_json(GROUPS).unwrap()).unwrap();
    DatasetPipeline::new(classifier, PipelineConfig { parallel })
}

fn description() -> HierarchyDescription {
    serde_json::from_str(HIERARCHY).unwrap()
}

#[test]
fn test_report_groups_every_method() {
    let tree = load_hierarchy(&description()).unwrap();
    let report = pipeline(true).run(&tree);

    let methods: Vec<(&str, Option<&str>, &str)> = report
        .records
        .iter()
        .map(|r| (r.method.as_str(), r.canonical.as_deref(), r.group.as_str()))
        .collect();
    assert_eq!(
        methods,
        vec![
            ("app.Service.client", Some("ext.Client"), "other"),
            ("app.Service.count", Some("int"), "primitive"),
            ("app.Service.items", Some("java.util.List"), "collections"),
            ("app.Service.missing", None, "other"),
            ("app.Service.name", Some("java.lang.String"), "text"),
            ("app.Service.node", Some("app.Base.Node"), "other"),
            ("app.Service.raw", Some("byte"), "array"),
            ("java.util.List.get", Some("java.lang.Object"), "other"),
        ]
    );

    let groups: Vec<(&str, usize)> = report
        .groups
        .iter()
        .map(|(name, count)| (name.as_str(), *count))
        .collect();
    assert_eq!(
        groups,
        vec![
            ("text", 1),
            ("collections", 1),
            ("array", 1),
            ("primitive", 1),
            ("other", 4),
        ]
    );
    assert_eq!(report.health.dependency_imports, 1);
    assert_eq!(report.health.failures, 1);
}

#[test]
fn test_batch_run_leaves_no_subscriptions() {
    let tree = load_hierarchy(&description()).unwrap();
    pipeline(true).run(&tree);
    assert_eq!(tree.subscriptions().registration_count(), 0);
    assert_eq!(tree.subscriptions().pending(), 0);
}

#[test]
fn test_parallel_and_sequential_runs_agree() {
    let parallel = pipeline(true).run(&load_hierarchy(&description()).unwrap());
    let sequential = pipeline(false).run(&load_hierarchy(&description()).unwrap());
    assert_eq!(parallel, sequential);
}

#[test]
fn test_hierarchy_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(HIERARCHY.as_bytes()).unwrap();

    let description = HierarchyDescription::from_path(file.path()).unwrap();
    assert_eq!(description.types.len(), 5);

    let tree = load_hierarchy(&description).unwrap();
    assert_eq!(tree.file_count(), 4);
    assert!(tree.lookup_type("app.Base.Node").is_some());
}

#[test]
fn test_failures_count_each_broken_reference_once() {
    let description: HierarchyDescription = serde_json::from_str(
        r#"{
          "types": [
            { "package": "java.lang", "name": "String" },
            { "package": "p", "name": "A",
              "supertypes": ["Missing"],
              "methods": [
                { "name": "count", "return_type": "int" },
                { "name": "name", "return_type": "String" },
                { "name": "foo", "return_type": "Foo" },
                { "name": "bar", "return_type": "Bar" }
              ] }
          ]
        }"#,
    )
    .unwrap();

    for parallel in [false, true] {
        let tree = load_hierarchy(&description).unwrap();
        let report = pipeline(parallel).run(&tree);
        let unresolved = report.records.iter().filter(|r| r.canonical.is_none()).count();
        assert_eq!(unresolved, 2);
        // Foo, Bar and the Missing supertype.
        assert_eq!(report.health.failures, 3, "parallel = {}", parallel);
    }
}
