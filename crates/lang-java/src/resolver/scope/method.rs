use super::{Scope, ScopeHit, match_type_parameter, match_type_parameters};
use crate::resolver::context::ResolveContext;
use typescope_core::model::NodeId;

/// A generic method's own type parameters.
pub struct MethodScope {
    pub method: NodeId,
}

impl Scope for MethodScope {
    fn resolve(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit> {
        let params = cx.tree().type_parameters(self.method);
        match_type_parameters(cx, &params)
    }

    fn name(&self) -> &'static str {
        "Method"
    }
}

/// Anchored on a type parameter itself (resolving one of its bounds).
pub struct TypeParameterScope {
    pub param: NodeId,
}

impl Scope for TypeParameterScope {
    fn resolve(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit> {
        match_type_parameter(cx, self.param)
    }

    fn name(&self) -> &'static str {
        "TypeParameter"
    }
}
