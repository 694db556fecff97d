use super::{Scope, ScopeHit, match_type_parameters};
use crate::resolver::Resolution;
use crate::resolver::context::ResolveContext;
use tracing::trace;
use typescope_core::model::path;
use typescope_core::model::{NodeId, RefSlot, TypeRefId};

/// An enclosing class: nested types, then type parameters, then members
/// inherited through direct supertypes.
pub struct ClassScope {
    pub class: NodeId,
}

impl ClassScope {
    /// `Outer.Inner` written inside `Outer` is searched from the enclosing
    /// scope; anything else is searched below this class.
    fn nested(&self, cx: &ResolveContext<'_, '_>, simple_name: &str, class_path: &str) -> Option<ScopeHit> {
        let base = if cx.first_segment() == simple_name {
            path::split_last(class_path).0
        } else {
            class_path
        };
        cx.tree()
            .lookup_type(&path::join(base, cx.name))
            .map(ScopeHit::Found)
    }

    /// Resolve each direct supertype from the enclosing scope and retry the
    /// reference beneath it. Keeps going until the reference itself resolves.
    fn inherited(&self, cx: &ResolveContext<'_, '_>, supertypes: usize) -> Option<ScopeHit> {
        let tree = cx.tree();
        let enclosing = tree.owner(self.class).unwrap_or_else(|| tree.root());
        (0..supertypes).find_map(|i| {
            let supertype = TypeRefId::new(self.class, RefSlot::Supertype(i as u32));
            match cx.resolver.sub_resolver().resolve(supertype, Some(enclosing)) {
                Resolution::Resolved(canonical) => {
                    let candidate = path::join(&canonical, cx.name);
                    trace!("{}: trying inherited {}", cx.target, candidate);
                    tree.lookup_type(&candidate).map(ScopeHit::Found)
                }
                _ => None,
            }
        })
    }
}

impl Scope for ClassScope {
    fn resolve(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit> {
        let tree = cx.tree();
        let class = tree.element(self.class)?.as_class()?;
        let class_path = tree.path(self.class)?;

        self.nested(cx, &class.simple_name, class_path)
            .or_else(|| match_type_parameters(cx, &tree.type_parameters(self.class)))
            .or_else(|| self.inherited(cx, class.supertypes.len()))
    }

    fn name(&self) -> &'static str {
        "Class"
    }
}
