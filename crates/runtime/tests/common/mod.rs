use typescope_core::model::{ClassSource, FileSource, MethodSource, TypeSource};

#[allow(dead_code)]
pub fn method(name: &str, return_type: &str) -> MethodSource {
    MethodSource {
        name: name.to_string(),
        return_type: TypeSource::from(return_type),
        type_parameters: vec![],
    }
}

/// A single-class file whose path follows the package layout.
#[allow(dead_code)]
pub fn source(package: &str, class: &str, imports: &[&str], methods: Vec<MethodSource>) -> FileSource {
    let mut c = ClassSource::new(class);
    c.methods = methods;
    FileSource {
        path: format!("{}/{}.java", package.replace('.', "/"), class).into(),
        package: package.to_string(),
        imports: imports.iter().map(|s| s.to_string()).collect(),
        classes: vec![c],
    }
}

#[allow(dead_code)]
pub const HIERARCHY: &str = r#"{
  "types": [
    { "package": "java.lang", "name": "String" },
    { "package": "java.util", "name": "List",
      "type_parameters": [{ "name": "E" }],
      "methods": [{ "name": "get", "return_type": "E" }] },
    { "package": "app", "name": "Service",
      "imports": ["java.util.List", "ext.Client"],
      "supertypes": ["Base"],
      "methods": [
        { "name": "name", "return_type": "String" },
        { "name": "items", "return_type": "List<String>" },
        { "name": "count", "return_type": "int" },
        { "name": "raw", "return_type": "byte[]" },
        { "name": "client", "return_type": "Client" },
        { "name": "node", "return_type": "Node" },
        { "name": "missing", "return_type": "Nope" }
      ] },
    { "package": "app", "name": "Base" },
    { "package": "app", "name": "Base.Node" }
  ]
}"#;

#[allow(dead_code)]
pub const GROUPS: &str = r#"{
  "groups": [
    { "name": "text", "types": ["java.lang.String"] },
    { "name": "collections", "prefixes": ["java.util."] }
  ],
  "unknown_group": "other"
}"#;
