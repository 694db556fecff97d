//! JSON configuration for the session and the dataset pipeline.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use typescope_core::{Result, TypescopeError};

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        TypescopeError::Config(format!("{}: {}", path.display(), e))
    })
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Publish an Information diagnostic for every return type accepted
    /// through an import that names no indexed type.
    pub report_dependency_imports: bool,
}

impl SessionConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Resolve files on the rayon pool. Off means one file after another.
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl PipelineConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        load_json(path)
    }
}

/// A named bucket of canonical type names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeGroup {
    pub name: String,
    /// Exact canonical names.
    #[serde(default)]
    pub types: Vec<String>,
    /// Canonical name prefixes such as `java.util.`.
    #[serde(default)]
    pub prefixes: Vec<String>,
}

fn default_primitive_group() -> String {
    "primitive".to_string()
}

fn default_array_group() -> String {
    "array".to_string()
}

fn default_unknown_group() -> String {
    "unknown".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeClassConfig {
    #[serde(default)]
    pub groups: Vec<TypeGroup>,
    #[serde(default = "default_primitive_group")]
    pub primitive_group: String,
    #[serde(default = "default_array_group")]
    pub array_group: String,
    #[serde(default = "default_unknown_group")]
    pub unknown_group: String,
}

impl Default for TypeClassConfig {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            primitive_group: default_primitive_group(),
            array_group: default_array_group(),
            unknown_group: default_unknown_group(),
        }
    }
}

impl TypeClassConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TypescopeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Group names must be non-empty and distinct.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        let fallbacks = [&self.primitive_group, &self.array_group, &self.unknown_group];
        if fallbacks.iter().any(|name| name.is_empty()) {
            return Err(TypescopeError::Config(
                "fallback group names must not be empty".to_string(),
            ));
        }
        for group in &self.groups {
            if group.name.is_empty() {
                return Err(TypescopeError::Config("group without a name".to_string()));
            }
            if !seen.insert(group.name.as_str()) {
                return Err(TypescopeError::Config(format!(
                    "group {:?} is declared twice",
                    group.name
                )));
            }
        }
        Ok(())
    }
}
