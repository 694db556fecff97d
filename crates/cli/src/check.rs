use std::path::{Path, PathBuf};
use tracing::info;
use typescope_core::model::FileSource;
use typescope_runtime::{Diagnostic, SessionConfig, WorkspaceSession};

fn read_source(path: &Path) -> Result<FileSource, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn diagnose(
    files: &[PathBuf],
    dependencies: bool,
) -> Result<Vec<Diagnostic>, Box<dyn std::error::Error>> {
    let mut session = WorkspaceSession::new(SessionConfig {
        report_dependency_imports: dependencies,
    });
    let mut opened = Vec::new();
    for file in files {
        let source = read_source(file)?;
        opened.push(source.path.clone());
        session.open(source)?;
    }
    session.refresh();

    let health = session.health();
    info!(
        "Checked {} file(s): {} failed lookup(s), {} dependency import(s)",
        opened.len(),
        health.failures,
        health.dependency_imports
    );
    Ok(opened
        .iter()
        .flat_map(|path| session.diagnostics(path).iter().cloned())
        .collect())
}

pub fn run(files: &[PathBuf], dependencies: bool) -> Result<(), Box<dyn std::error::Error>> {
    let diagnostics = diagnose(files, dependencies)?;
    for diagnostic in &diagnostics {
        println!("{}", diagnostic);
    }
    if diagnostics.is_empty() {
        println!("No problems found.");
    }
    Ok(())
}
