mod common;

use common::*;
use std::path::{Path, PathBuf};
use typescope_core::model::{
    ClassSource, FileSource, MethodSource, ResolutionOrigin, TypeParameterSource, TypeRefId,
    TypeSource,
};
use typescope_runtime::{SessionConfig, Severity, WorkspaceSession};

fn user() -> typescope_core::model::FileSource {
    source("p", "User", &[], vec![method("foo", "Foo"), method("count", "int")])
}

fn foo() -> typescope_core::model::FileSource {
    source("p", "Foo", &[], vec![])
}

fn bounded(name: &str, bound: &str) -> TypeParameterSource {
    TypeParameterSource {
        name: name.to_string(),
        bounds: vec![TypeSource::from(bound)],
    }
}

fn file_with(package: &str, class: ClassSource) -> FileSource {
    FileSource {
        path: format!("{}/{}.java", package, class.name).into(),
        package: package.to_string(),
        imports: vec![],
        classes: vec![class],
    }
}

fn return_canonical(session: &WorkspaceSession, method: &str) -> Option<String> {
    let m = session.tree().lookup(method)?;
    session
        .tree()
        .type_ref(TypeRefId::return_type(m))?
        .cached_canonical()
}

const USER: &str = "p/User.java";
const FOO: &str = "p/Foo.java";

#[test]
fn test_unresolved_return_type_is_reported() {
    let mut session = WorkspaceSession::default();
    session
        .open(source("p", "User", &[], vec![method("m", "Missing"), method("n", "void")]))
        .unwrap();
    let changed = session.refresh();

    assert_eq!(changed, vec![PathBuf::from(USER)]);
    let diagnostics = session.diagnostics(Path::new(USER));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[0].method, "p.User.m");
    assert_eq!(diagnostics[0].message, "cannot resolve type 'Missing'");
}

#[test]
fn test_deleting_a_dependency_invalidates_its_users() {
    let mut session = WorkspaceSession::default();
    session.open(user()).unwrap();
    session.open(foo()).unwrap();
    session.refresh();
    assert!(session.diagnostics(Path::new(USER)).is_empty());

    assert!(session.delete(Path::new(FOO)).unwrap());
    let changed = session.refresh();

    assert_eq!(changed, vec![PathBuf::from(USER)]);
    assert_eq!(
        session.diagnostics(Path::new(USER))[0].message,
        "cannot resolve type 'Foo'"
    );
    assert!(!session.delete(Path::new(FOO)).unwrap());
}

#[test]
fn test_failed_reference_recovers_when_type_is_opened() {
    let mut session = WorkspaceSession::default();
    session.open(user()).unwrap();
    session.refresh();
    assert_eq!(session.diagnostics(Path::new(USER)).len(), 1);

    session.open(foo()).unwrap();
    let changed = session.refresh();

    assert!(changed.contains(&PathBuf::from(USER)));
    assert!(session.diagnostics(Path::new(USER)).is_empty());
}

#[test]
fn test_change_that_drops_a_type_is_noticed() {
    let mut session = WorkspaceSession::default();
    session.open(user()).unwrap();
    session.open(foo()).unwrap();
    session.refresh();

    let mut edited = foo();
    edited.classes[0].name = "Bar".to_string();
    session.change(edited).unwrap();
    session.refresh();

    assert_eq!(session.diagnostics(Path::new(USER)).len(), 1);
    assert!(session.tree().lookup_type("p.Bar").is_some());
}

#[test]
fn test_rename_keeps_references_resolved() {
    let mut session = WorkspaceSession::default();
    session.open(user()).unwrap();
    session.open(foo()).unwrap();
    session.refresh();

    let renamed = Path::new("src/p/Foo.java");
    let new_file = session.rename(Path::new(FOO), renamed).unwrap();
    session.refresh();

    assert!(session.tree().file_id(Path::new(FOO)).is_none());
    assert_eq!(session.tree().file_id(renamed), Some(new_file));
    assert!(session.is_open(renamed));
    assert!(session.diagnostics(Path::new(USER)).is_empty());

    let m = session.tree().lookup("p.User.foo").unwrap();
    let reference = session.tree().type_ref(TypeRefId::return_type(m)).unwrap();
    assert_eq!(reference.subscription(), Some(new_file));

    assert!(session.rename(Path::new("nowhere.java"), renamed).is_err());
}

#[test]
fn test_close_keeps_file_indexed() {
    let mut session = WorkspaceSession::default();
    session.open(user()).unwrap();
    session
        .open(source("p", "Broken", &[], vec![method("m", "Nope")]))
        .unwrap();
    session.refresh();
    assert_eq!(session.diagnostics(Path::new("p/Broken.java")).len(), 1);

    assert!(session.close(Path::new("p/Broken.java")));
    assert!(!session.close(Path::new("p/Broken.java")));
    assert!(session.diagnostics(Path::new("p/Broken.java")).is_empty());
    assert_eq!(session.refresh(), vec![PathBuf::from("p/Broken.java")]);
    assert!(session.tree().lookup_type("p.Broken").is_some());
}

#[test]
fn test_dependency_imports_reported_when_enabled() {
    let mut session = WorkspaceSession::new(SessionConfig {
        report_dependency_imports: true,
    });
    session
        .open(source("p", "User", &["ext.Lib"], vec![method("lib", "Lib")]))
        .unwrap();
    session.refresh();

    let diagnostics = session.diagnostics(Path::new(USER));
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, Severity::Information);
    assert_eq!(session.health().dependency_imports, 1);

    session.open(source("ext", "Lib", &[], vec![])).unwrap();
    let changed = session.refresh();
    assert!(changed.contains(&PathBuf::from(USER)));
    assert!(session.diagnostics(Path::new(USER)).is_empty());
}

/// `p.A` declares `<T extends B> T m()`; `p.B` lives in its own file.
fn generic_user() -> FileSource {
    let mut class = ClassSource::new("A");
    class.methods.push(MethodSource {
        name: "m".to_string(),
        return_type: TypeSource::from("T"),
        type_parameters: vec![bounded("T", "B")],
    });
    file_with("p", class)
}

#[test]
fn test_method_bound_follows_its_target_file() {
    let mut session = WorkspaceSession::default();
    session.open(generic_user()).unwrap();
    session.open(source("p", "B", &[], vec![])).unwrap();
    session.refresh();
    assert_eq!(return_canonical(&session, "p.A.m").as_deref(), Some("p.B"));

    let a = Path::new("p/A.java");
    let b_file = session.tree().file_id(Path::new("p/B.java")).unwrap();
    let m = session.tree().lookup("p.A.m").unwrap();
    let reference = session.tree().type_ref(TypeRefId::return_type(m)).unwrap();
    assert_eq!(reference.subscription(), Some(b_file));
    assert_eq!(reference.origin(), Some(ResolutionOrigin::TypeParameter));

    assert!(session.delete(Path::new("p/B.java")).unwrap());
    let changed = session.refresh();
    assert_eq!(changed, vec![PathBuf::from(a)]);
    assert_eq!(return_canonical(&session, "p.A.m"), None);
    assert_eq!(session.diagnostics(a)[0].message, "cannot resolve type 'T'");

    session.open(source("p", "B", &[], vec![])).unwrap();
    let changed = session.refresh();
    assert!(changed.contains(&PathBuf::from(a)));
    assert_eq!(return_canonical(&session, "p.A.m").as_deref(), Some("p.B"));
    assert!(session.diagnostics(a).is_empty());
}

#[test]
fn test_method_bound_notices_its_target_renamed() {
    let mut session = WorkspaceSession::default();
    session.open(generic_user()).unwrap();
    session.open(source("p", "B", &[], vec![])).unwrap();
    session.refresh();

    let mut edited = source("p", "B", &[], vec![]);
    edited.classes[0].name = "C".to_string();
    session.change(edited).unwrap();
    session.refresh();

    assert_eq!(return_canonical(&session, "p.A.m"), None);
    assert_eq!(session.diagnostics(Path::new("p/A.java")).len(), 1);
}

#[test]
fn test_class_bound_follows_its_target_file() {
    let mut class = ClassSource::new("Box");
    class.type_parameters.push(bounded("T", "Item"));
    class.methods.push(MethodSource {
        name: "get".to_string(),
        return_type: TypeSource::from("T"),
        type_parameters: vec![],
    });
    class.methods.push(MethodSource {
        name: "peek".to_string(),
        return_type: TypeSource::from("T"),
        type_parameters: vec![],
    });

    let mut session = WorkspaceSession::default();
    session.open(file_with("p", class)).unwrap();
    session.open(source("p", "Item", &[], vec![])).unwrap();
    session.refresh();
    assert_eq!(return_canonical(&session, "p.Box.get").as_deref(), Some("p.Item"));
    assert_eq!(return_canonical(&session, "p.Box.peek").as_deref(), Some("p.Item"));

    session.delete(Path::new("p/Item.java")).unwrap();
    let changed = session.refresh();

    assert_eq!(changed, vec![PathBuf::from("p/Box.java")]);
    assert_eq!(return_canonical(&session, "p.Box.get"), None);
    assert_eq!(return_canonical(&session, "p.Box.peek"), None);
    assert_eq!(session.diagnostics(Path::new("p/Box.java")).len(), 2);
}

#[test]
fn test_inherited_nested_type_follows_supertype_file() {
    let mut base = ClassSource::new("Base");
    base.classes.push(ClassSource::new("Node"));
    let mut sub = ClassSource::new("Sub");
    sub.supertypes.push(TypeSource::from("Base"));
    sub.methods.push(MethodSource {
        name: "node".to_string(),
        return_type: TypeSource::from("Node"),
        type_parameters: vec![],
    });

    let mut session = WorkspaceSession::default();
    session.open(file_with("p", sub)).unwrap();
    session.open(file_with("p", base)).unwrap();
    session.refresh();
    assert_eq!(
        return_canonical(&session, "p.Sub.node").as_deref(),
        Some("p.Base.Node")
    );

    session.delete(Path::new("p/Base.java")).unwrap();
    let changed = session.refresh();

    assert_eq!(changed, vec![PathBuf::from("p/Sub.java")]);
    assert_eq!(return_canonical(&session, "p.Sub.node"), None);
    assert_eq!(
        session.diagnostics(Path::new("p/Sub.java"))[0].message,
        "cannot resolve type 'Node'"
    );
}
