//! One scope per step of the lookup order. Each scope either produces a hit
//! or lets the walk continue outward.

use super::Resolution;
use super::context::ResolveContext;
use crate::naming::JAVA_LANG_OBJECT;
use typescope_core::model::{NodeId, RefSlot, TypeRefId};

pub mod builtin;
pub mod class;
pub mod file;
pub mod method;

pub use builtin::{BuiltinScope, DirectScope};
pub use class::ClassScope;
pub use file::FileScope;
pub use method::{MethodScope, TypeParameterScope};

/// A successful match, before it is committed to the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeHit {
    /// A primitive keyword; names itself.
    Primitive(String),
    /// A declaration in the tree; its path is the canonical name.
    Found(NodeId),
    /// A type parameter, standing for its bound's canonical name. `watch`
    /// is the node the resolved bound is subscribed to.
    TypeParameter {
        param: NodeId,
        canonical: String,
        watch: Option<NodeId>,
    },
    /// A single import naming a type outside the indexed code.
    Dependency(String),
}

pub trait Scope {
    fn resolve(&self, cx: &ResolveContext<'_, '_>) -> Option<ScopeHit>;

    fn name(&self) -> &'static str;
}

/// Match a simple name against the type parameter `param`.
///
/// A match stands for the first declared bound, resolved from the parameter's
/// owner, or for `java.lang.Object` when there is no bound. A bound that does
/// not resolve (a cycle, or an unknown type) yields no hit.
pub(crate) fn match_type_parameter(
    cx: &ResolveContext<'_, '_>,
    param: NodeId,
) -> Option<ScopeHit> {
    let tree = cx.tree();
    let tp = tree.element(param)?.as_type_parameter()?;
    if !cx.is_simple_name() || tp.name != cx.name {
        return None;
    }
    if tp.bounds.is_empty() {
        return Some(ScopeHit::TypeParameter {
            param,
            canonical: JAVA_LANG_OBJECT.to_string(),
            watch: None,
        });
    }

    let bound = TypeRefId::new(param, RefSlot::Bound(0));
    match cx.resolver.sub_resolver().resolve(bound, tree.owner(param)) {
        Resolution::Resolved(canonical) => Some(ScopeHit::TypeParameter {
            param,
            canonical,
            watch: tree.type_ref(bound).and_then(|r| r.subscription()),
        }),
        _ => None,
    }
}

/// The first of `params` whose name matches wins, declaration order.
pub(crate) fn match_type_parameters(
    cx: &ResolveContext<'_, '_>,
    params: &[NodeId],
) -> Option<ScopeHit> {
    let tree = cx.tree();
    let matching = params.iter().copied().find(|p| {
        tree.element(*p)
            .and_then(|e| e.as_type_parameter())
            .is_some_and(|tp| tp.name == cx.name)
    })?;
    match_type_parameter(cx, matching)
}
