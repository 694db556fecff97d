use super::{Scope, ScopeHit};
use crate::naming::is_primitive;
use crate::resolver::context::ResolveContext;

/// Primitive keywords. Never touches the tree.
pub struct BuiltinScope;

impl Scope for BuiltinScope {
    fn resolve(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit> {
        (cx.is_simple_name() && is_primitive(cx.name))
            .then(|| ScopeHit::Primitive(cx.name.to_string()))
    }

    fn name(&self) -> &'static str {
        "Builtin"
    }
}

/// The raw name taken as an already fully-qualified path.
pub struct DirectScope;

impl Scope for DirectScope {
    fn resolve(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit> {
        cx.tree().lookup_type(cx.name).map(ScopeHit::Found)
    }

    fn name(&self) -> &'static str {
        "Direct"
    }
}
