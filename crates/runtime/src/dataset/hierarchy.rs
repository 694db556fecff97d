use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use typescope_core::model::path;
use typescope_core::model::{
    ClassSource, FileSource, MethodSource, TypeParameterSource, TypeSource,
};
use typescope_core::{Result, SymbolTree, TypescopeError};

/// One type in a flat hierarchy listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(default)]
    pub package: String,
    /// Simple name, or dotted for nested types (`Outer.Inner`).
    pub name: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub supertypes: Vec<TypeSource>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSource>,
    #[serde(default)]
    pub methods: Vec<MethodSource>,
}

impl TypeEntry {
    /// Entries without a file share one with their top-level class.
    fn file_key(&self) -> PathBuf {
        match &self.file {
            Some(file) => file.clone(),
            None => {
                let mut key = PathBuf::from_iter(path::segments(&self.package));
                key.push(format!("{}.java", path::first_segment(&self.name)));
                key
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyDescription {
    #[serde(default)]
    pub types: Vec<TypeEntry>,
}

struct FileGroup {
    package: String,
    imports: IndexSet<String>,
    classes: Vec<ClassSource>,
}

/// The class at `segments` below `classes`, created empty where missing.
fn class_at<'a>(classes: &'a mut Vec<ClassSource>, segments: &[&str]) -> Option<&'a mut ClassSource> {
    let (first, rest) = segments.split_first()?;
    let index = match classes.iter().position(|c| c.name == *first) {
        Some(index) => index,
        None => {
            classes.push(ClassSource::new(*first));
            classes.len() - 1
        }
    };
    let class = &mut classes[index];
    if rest.is_empty() {
        Some(class)
    } else {
        class_at(&mut class.classes, rest)
    }
}

impl HierarchyDescription {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Group entries into files, in first-seen order.
    pub fn to_file_sources(&self) -> Result<Vec<FileSource>> {
        let mut groups: IndexMap<PathBuf, FileGroup> = IndexMap::new();

        for entry in &self.types {
            if entry.name.is_empty() || !path::is_valid(&entry.name) {
                return Err(TypescopeError::InvalidInput(format!(
                    "bad type name {:?}",
                    entry.name
                )));
            }
            let group = groups.entry(entry.file_key()).or_insert_with(|| FileGroup {
                package: entry.package.clone(),
                imports: IndexSet::new(),
                classes: Vec::new(),
            });
            if group.package != entry.package {
                return Err(TypescopeError::InvalidInput(format!(
                    "{} lists packages {:?} and {:?}",
                    entry.file_key().display(),
                    group.package,
                    entry.package
                )));
            }
            group.imports.extend(entry.imports.iter().cloned());

            let segments: Vec<&str> = path::segments(&entry.name).collect();
            let class = class_at(&mut group.classes, &segments).ok_or_else(|| {
                TypescopeError::InvalidInput(format!("bad type name {:?}", entry.name))
            })?;
            class.supertypes.extend(entry.supertypes.iter().cloned());
            class
                .type_parameters
                .extend(entry.type_parameters.iter().cloned());
            class.methods.extend(entry.methods.iter().cloned());
        }

        Ok(groups
            .into_iter()
            .map(|(file, group)| FileSource {
                path: file,
                package: group.package,
                imports: group.imports.into_iter().collect(),
                classes: group.classes,
            })
            .collect())
    }
}

/// Build a symbol tree holding one code file per group of entries.
pub fn load_hierarchy(description: &HierarchyDescription) -> Result<SymbolTree> {
    let mut tree = SymbolTree::new();
    for source in description.to_file_sources()? {
        tree.insert_file(&source)?;
    }
    info!(
        "loaded {} type(s) into {} file(s)",
        description.types.len(),
        tree.file_count()
    );
    Ok(tree)
}
