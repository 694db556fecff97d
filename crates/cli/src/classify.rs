use std::path::Path;
use tracing::info;
use typescope_runtime::{
    DatasetPipeline, DatasetReport, HierarchyDescription, PipelineConfig, TypeClassConfig,
    TypeClassifier, load_hierarchy,
};

pub fn report(
    hierarchy: &Path,
    groups: &Path,
    parallel: bool,
) -> Result<DatasetReport, Box<dyn std::error::Error>> {
    let description = HierarchyDescription::from_path(hierarchy)?;
    let classifier = TypeClassifier::new(TypeClassConfig::from_path(groups)?)?;

    info!("Classifying {}...", hierarchy.display());
    let tree = load_hierarchy(&description)?;
    let pipeline = DatasetPipeline::new(classifier, PipelineConfig { parallel });
    Ok(pipeline.run(&tree))
}

pub fn run(
    hierarchy: &Path,
    groups: &Path,
    output: Option<&Path>,
    parallel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = report(hierarchy, groups, parallel)?;
    let json = serde_json::to_string_pretty(&report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!(
                "Wrote {} record(s) to {}",
                report.records.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let hierarchy = dir.path().join("types.json");
        let groups = dir.path().join("groups.json");
        let output = dir.path().join("report.json");
        std::fs::write(
            &hierarchy,
            r#"{"types": [{"package": "p", "name": "A", "methods": [
                {"name": "n", "return_type": "long"},
                {"name": "self", "return_type": "A"}
            ]}]}"#,
        )
        .unwrap();
        std::fs::write(&groups, r#"{"groups": [{"name": "local", "prefixes": ["p."]}]}"#).unwrap();

        run(&hierarchy, &groups, Some(&output), false).unwrap();

        let report: DatasetReport =
            serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.groups["local"], 1);
        assert_eq!(report.groups["primitive"], 1);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        assert!(report(&missing, &missing, true).is_err());
    }
}
