use typescope_core::model::{ClassSource, FileSource, MethodSource, TypeSource};

#[allow(dead_code)]
pub fn class(name: &str, methods: &[(&str, &str)]) -> ClassSource {
    let mut c = ClassSource::new(name);
    c.methods = methods
        .iter()
        .map(|(name, ret)| MethodSource {
            name: name.to_string(),
            return_type: TypeSource::from(*ret),
            type_parameters: vec![],
        })
        .collect();
    c
}

#[allow(dead_code)]
pub fn file(path: &str, package: &str, classes: Vec<ClassSource>) -> FileSource {
    FileSource {
        path: path.into(),
        package: package.to_string(),
        imports: vec![],
        classes,
    }
}
