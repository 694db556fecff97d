use super::{Scope, ScopeHit};
use crate::naming::JAVA_LANG;
use crate::resolver::context::ResolveContext;
use typescope_core::model::path;
use typescope_core::model::{CodeFile, NodeId};

/// The compilation unit: single imports, own package, wildcard imports and
/// finally `java.lang`, in that order.
pub struct FileScope {
    pub file: NodeId,
}

impl FileScope {
    /// A single import whose simple name matches the reference's first
    /// segment. If the merged path is not indexed the import is trusted and
    /// the reference is taken to name an external dependency.
    fn single_import(&self, cx: &ResolveContext<'_, '_>, file: &CodeFile) -> Option<ScopeHit> {
        let first = cx.first_segment();
        let import = file
            .imports
            .iter()
            .find(|imp| !imp.is_wildcard && imp.simple_name() == first)?;
        let merged = path::replace_first_segment(cx.name, &import.path);
        Some(match cx.tree().lookup_type(&merged) {
            Some(found) => ScopeHit::Found(found),
            None => ScopeHit::Dependency(merged),
        })
    }

    fn package(&self, cx: &ResolveContext<'_, '_>, file: &CodeFile) -> Option<ScopeHit> {
        cx.tree()
            .lookup_type(&path::join(&file.package, cx.name))
            .map(ScopeHit::Found)
    }

    fn wildcard_imports(&self, cx: &ResolveContext<'_, '_>, file: &CodeFile) -> Option<ScopeHit> {
        file.imports
            .iter()
            .filter(|imp| imp.is_wildcard)
            .find_map(|imp| cx.tree().lookup_type(&path::join(&imp.path, cx.name)))
            .map(ScopeHit::Found)
    }

    fn java_lang(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit> {
        cx.tree()
            .lookup_type(&path::join(JAVA_LANG, cx.name))
            .map(ScopeHit::Found)
    }
}

impl Scope for FileScope {
    fn resolve(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit> {
        let file = cx.tree().element(self.file)?.as_file()?;

        self.single_import(cx, file)
            .or_else(|| self.package(cx, file))
            .or_else(|| self.wildcard_imports(cx, file))
            .or_else(|| self.java_lang(cx))
    }

    fn name(&self) -> &'static str {
        "File"
    }
}
