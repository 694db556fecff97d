//! Serializable source descriptions: the structural output a parser hands
//! over. They carry no resolution state.

use super::element::{ClassElement, CodeFile, Import, MethodElement, TypeParameterElement};
use super::type_ref::TypeReference;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::PathBuf;

/// A written type: `"Foo"`, `"int[]"`, or `{ "name": "Foo", "array": true }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeSource {
    Text(String),
    Detailed {
        name: String,
        #[serde(default)]
        array: bool,
    },
}

impl TypeSource {
    pub fn to_reference(&self) -> TypeReference {
        match self {
            TypeSource::Text(raw) => TypeReference::parse(raw),
            TypeSource::Detailed { name, array } => {
                let parsed = TypeReference::parse(name);
                let is_array = *array || parsed.is_array();
                TypeReference::new(parsed.name(), is_array)
            }
        }
    }
}

impl From<&str> for TypeSource {
    fn from(raw: &str) -> Self {
        TypeSource::Text(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterSource {
    pub name: String,
    #[serde(default)]
    pub bounds: Vec<TypeSource>,
}

impl TypeParameterSource {
    pub fn to_element(&self) -> TypeParameterElement {
        TypeParameterElement {
            name: SmolStr::from(self.name.as_str()),
            bounds: self.bounds.iter().map(TypeSource::to_reference).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSource {
    pub name: String,
    pub return_type: TypeSource,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSource>,
}

impl MethodSource {
    pub fn to_element(&self) -> MethodElement {
        MethodElement {
            name: SmolStr::from(self.name.as_str()),
            return_type: self.return_type.to_reference(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSource {
    pub name: String,
    #[serde(default)]
    pub supertypes: Vec<TypeSource>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterSource>,
    #[serde(default)]
    pub methods: Vec<MethodSource>,
    /// Nested classes.
    #[serde(default)]
    pub classes: Vec<ClassSource>,
}

impl ClassSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supertypes: Vec::new(),
            type_parameters: Vec::new(),
            methods: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn to_element(&self) -> ClassElement {
        ClassElement {
            simple_name: SmolStr::from(self.name.as_str()),
            supertypes: self.supertypes.iter().map(TypeSource::to_reference).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSource {
    pub path: PathBuf,
    #[serde(default)]
    pub package: String,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub classes: Vec<ClassSource>,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            imports: Vec::new(),
            classes: Vec::new(),
        }
    }

    pub fn to_element(&self) -> CodeFile {
        CodeFile {
            source_path: self.path.clone(),
            package: self.package.clone(),
            imports: self.imports.iter().map(|i| Import::parse(i)).collect(),
        }
    }
}
