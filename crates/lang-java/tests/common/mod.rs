use typescope_core::SymbolTree;
use typescope_core::metrics::HealthCounters;
use typescope_core::model::{
    ClassSource, FileSource, MethodSource, NodeId, TypeParameterSource, TypeRefId, TypeSource,
};
use typescope_java::{Resolution, ResolveOptions, Resolver};

#[allow(dead_code)]
pub fn type_param(name: &str, bounds: &[&str]) -> TypeParameterSource {
    TypeParameterSource {
        name: name.to_string(),
        bounds: bounds.iter().map(|b| TypeSource::from(*b)).collect(),
    }
}

#[allow(dead_code)]
pub fn method(name: &str, return_type: &str) -> MethodSource {
    MethodSource {
        name: name.to_string(),
        return_type: TypeSource::from(return_type),
        type_parameters: vec![],
    }
}

#[allow(dead_code)]
pub fn generic_method(
    name: &str,
    return_type: &str,
    type_parameters: Vec<TypeParameterSource>,
) -> MethodSource {
    MethodSource {
        type_parameters,
        ..method(name, return_type)
    }
}

#[allow(dead_code)]
pub fn class(name: &str) -> ClassSource {
    ClassSource::new(name)
}

#[allow(dead_code)]
pub fn class_with(
    name: &str,
    supertypes: &[&str],
    methods: Vec<MethodSource>,
    nested: Vec<ClassSource>,
) -> ClassSource {
    ClassSource {
        name: name.to_string(),
        supertypes: supertypes.iter().map(|s| TypeSource::from(*s)).collect(),
        type_parameters: vec![],
        methods,
        classes: nested,
    }
}

#[allow(dead_code)]
pub fn file(path: &str, package: &str, imports: &[&str], classes: Vec<ClassSource>) -> FileSource {
    FileSource {
        path: path.into(),
        package: package.to_string(),
        imports: imports.iter().map(|s| s.to_string()).collect(),
        classes,
    }
}

/// A file holding one empty top-level class.
#[allow(dead_code)]
pub fn declare(tree: &mut SymbolTree, package: &str, name: &str) -> NodeId {
    let path = format!("{}/{}.java", package.replace('.', "/"), name);
    tree.insert_file(&file(&path, package, &[], vec![class(name)]))
        .unwrap()
}

#[allow(dead_code)]
pub fn build_tree(files: &[FileSource]) -> SymbolTree {
    let mut tree = SymbolTree::new();
    for f in files {
        tree.insert_file(f).unwrap();
    }
    tree
}

#[allow(dead_code)]
pub fn method_id(tree: &SymbolTree, path: &str) -> NodeId {
    tree.lookup(path)
        .unwrap_or_else(|| panic!("no method at {}", path))
}

#[allow(dead_code)]
pub fn resolve_return(tree: &SymbolTree, metrics: &HealthCounters, method_path: &str) -> Resolution {
    let m = method_id(tree, method_path);
    Resolver::new(tree, metrics).resolve(TypeRefId::return_type(m), None)
}

#[allow(dead_code)]
pub fn resolve_return_batch(
    tree: &SymbolTree,
    metrics: &HealthCounters,
    method_path: &str,
) -> Resolution {
    let m = method_id(tree, method_path);
    Resolver::new(tree, metrics)
        .with_options(ResolveOptions::batch())
        .resolve(TypeRefId::return_type(m), None)
}

#[allow(dead_code)]
pub fn resolved(name: &str) -> Resolution {
    Resolution::Resolved(name.to_string())
}
