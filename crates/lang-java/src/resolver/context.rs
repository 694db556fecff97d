use super::Resolver;
use typescope_core::SymbolTree;
use typescope_core::model::path;
use typescope_core::model::TypeRefId;

/// What every scope sees while a single reference is being resolved.
pub struct ResolveContext<'a, 't> {
    pub resolver: &'a Resolver<'t>,
    pub target: TypeRefId,
    /// The raw dotted name as written.
    pub name: &'a str,
}

impl<'t> ResolveContext<'_, 't> {
    pub fn tree(&self) -> &'t SymbolTree {
        self.resolver.tree()
    }

    pub fn first_segment(&self) -> &str {
        path::first_segment(self.name)
    }

    pub fn is_simple_name(&self) -> bool {
        path::is_single_segment(self.name)
    }
}
