use super::type_ref::{RefSlot, TypeReference};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::path::{Path, PathBuf};

/// Prefix of the synthetic key a file is stored under. `<` never appears in
/// a Java identifier, so dotted lookups can never match it.
pub const FILE_MARKER: &str = "<file>";

pub fn file_marker_key(source_path: &Path) -> SmolStr {
    SmolStr::from(format!("{}{}", FILE_MARKER, source_path.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Root,
    /// Intermediate namespace segment created on demand.
    Package,
    File,
    Class,
    Method,
    TypeParameter,
}

impl NodeKind {
    /// Package segments are plain namespace; everything else takes observers.
    pub fn is_subscribable(&self) -> bool {
        !matches!(self, NodeKind::Package)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Dotted path without the trailing `.*`.
    pub path: String,
    pub is_wildcard: bool,
}

impl Import {
    pub fn single(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            is_wildcard: false,
        }
    }

    pub fn wildcard(package: impl Into<String>) -> Self {
        Self {
            path: package.into(),
            is_wildcard: true,
        }
    }

    /// `"x.y.*"` is a wildcard import of `x.y`; anything else is single.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim().trim_end_matches(';').trim();
        let raw = raw.strip_prefix("import ").unwrap_or(raw).trim();
        match raw.strip_suffix(".*") {
            Some(package) => Self::wildcard(package),
            None => Self::single(raw),
        }
    }

    /// Last dotted segment of a single import (`Foo` for `a.b.Foo`).
    pub fn simple_name(&self) -> &str {
        super::path::last_segment(&self.path)
    }
}

#[derive(Debug)]
pub struct CodeFile {
    pub source_path: PathBuf,
    pub package: String,
    pub imports: Vec<Import>,
}

#[derive(Debug)]
pub struct ClassElement {
    pub simple_name: SmolStr,
    pub supertypes: Vec<TypeReference>,
}

#[derive(Debug)]
pub struct MethodElement {
    pub name: SmolStr,
    pub return_type: TypeReference,
}

#[derive(Debug)]
pub struct TypeParameterElement {
    pub name: SmolStr,
    pub bounds: Vec<TypeReference>,
}

#[derive(Debug)]
pub enum Element {
    File(CodeFile),
    Class(ClassElement),
    Method(MethodElement),
    TypeParameter(TypeParameterElement),
}

impl Element {
    pub fn kind(&self) -> NodeKind {
        match self {
            Element::File(_) => NodeKind::File,
            Element::Class(_) => NodeKind::Class,
            Element::Method(_) => NodeKind::Method,
            Element::TypeParameter(_) => NodeKind::TypeParameter,
        }
    }

    /// The key this element is stored under in its parent.
    pub fn segment(&self) -> SmolStr {
        match self {
            Element::File(f) => file_marker_key(&f.source_path),
            Element::Class(c) => c.simple_name.clone(),
            Element::Method(m) => m.name.clone(),
            Element::TypeParameter(t) => t.name.clone(),
        }
    }

    pub fn type_ref(&self, slot: RefSlot) -> Option<&TypeReference> {
        match (self, slot) {
            (Element::Method(m), RefSlot::ReturnType) => Some(&m.return_type),
            (Element::Class(c), RefSlot::Supertype(i)) => c.supertypes.get(i as usize),
            (Element::TypeParameter(t), RefSlot::Bound(i)) => t.bounds.get(i as usize),
            _ => None,
        }
    }

    /// Every type reference held directly by this element, with its slot.
    pub fn type_refs(&self) -> Vec<(RefSlot, &TypeReference)> {
        match self {
            Element::File(_) => Vec::new(),
            Element::Method(m) => vec![(RefSlot::ReturnType, &m.return_type)],
            Element::Class(c) => c
                .supertypes
                .iter()
                .enumerate()
                .map(|(i, r)| (RefSlot::Supertype(i as u32), r))
                .collect(),
            Element::TypeParameter(t) => t
                .bounds
                .iter()
                .enumerate()
                .map(|(i, r)| (RefSlot::Bound(i as u32), r))
                .collect(),
        }
    }

    pub fn as_file(&self) -> Option<&CodeFile> {
        match self {
            Element::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&ClassElement> {
        match self {
            Element::Class(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&MethodElement> {
        match self {
            Element::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParameterElement> {
        match self {
            Element::TypeParameter(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_parse() {
        assert_eq!(Import::parse("java.util.*"), Import::wildcard("java.util"));
        assert_eq!(Import::parse("import a.b.Foo;"), Import::single("a.b.Foo"));
        assert_eq!(Import::parse("a.b.Foo").simple_name(), "Foo");
    }

    #[test]
    fn test_file_segment_is_marker() {
        let file = Element::File(CodeFile {
            source_path: PathBuf::from("src/p/Foo.java"),
            package: "p".to_string(),
            imports: vec![],
        });
        assert!(file.segment().starts_with(FILE_MARKER));
        assert!(!NodeKind::Package.is_subscribable());
        assert!(NodeKind::File.is_subscribable());
    }

    #[test]
    fn test_type_ref_slots() {
        let class = Element::Class(ClassElement {
            simple_name: SmolStr::from("A"),
            supertypes: vec![TypeReference::new("B", false), TypeReference::new("C", false)],
        });
        assert_eq!(class.type_ref(RefSlot::Supertype(1)).unwrap().name(), "C");
        assert!(class.type_ref(RefSlot::ReturnType).is_none());
        assert_eq!(class.type_refs().len(), 2);
    }
}
