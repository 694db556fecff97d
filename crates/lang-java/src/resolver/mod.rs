//! The Resolver: maps a type reference to its canonical name by walking the
//! lexical scope chain and querying the symbol tree.
//!
//! One resolver is created per request. Bounds and supertypes are resolved by
//! nested sub-resolvers that share the caller's options. Cycles are cut by the
//! `InProgress` state each reference enters before any lookup.

pub mod context;
pub mod scope;

use context::ResolveContext;
use scope::{BuiltinScope, ClassScope, DirectScope, FileScope, MethodScope, Scope, ScopeHit};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;
use tracing::{debug, trace, warn};
use typescope_core::SymbolTree;
use typescope_core::metrics::ResolutionMetrics;
use typescope_core::model::{
    NodeId, NodeKind, ResolutionOrigin, ResolutionStatus, TypeRefId, TypeReference,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// One-shot mode: register no subscriptions. The tree is never mutated
    /// again, so there is nothing to invalidate.
    pub batch: bool,
}

impl ResolveOptions {
    pub fn live() -> Self {
        Self { batch: false }
    }

    pub fn batch() -> Self {
        Self { batch: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "canonical", rename_all = "snake_case")]
pub enum Resolution {
    /// Freshly resolved, or already resolved before this call.
    Resolved(String),
    /// The scope chain was exhausted.
    Unresolved,
    /// The reference is being resolved further up the call stack.
    InProgress,
    /// Malformed input: the reference or the start element does not exist.
    Skipped,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn canonical(&self) -> Option<&str> {
        match self {
            Resolution::Resolved(name) => Some(name),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Resolver<'t> {
    tree: &'t SymbolTree,
    metrics: &'t dyn ResolutionMetrics,
    options: ResolveOptions,
}

impl<'t> Resolver<'t> {
    pub fn new(tree: &'t SymbolTree, metrics: &'t dyn ResolutionMetrics) -> Self {
        Self {
            tree,
            metrics,
            options: ResolveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn tree(&self) -> &'t SymbolTree {
        self.tree
    }

    pub fn options(&self) -> ResolveOptions {
        self.options
    }

    /// A fresh resolver for a bound or supertype lookup. Options carry over,
    /// so a batch run stays free of subscriptions all the way down.
    pub fn sub_resolver(&self) -> Resolver<'t> {
        Resolver {
            tree: self.tree,
            metrics: self.metrics,
            options: self.options,
        }
    }

    /// Scopes searched for a reference anchored at `anchor`, in order:
    /// primitives, the raw path, then each enclosing element outward.
    fn scope_chain(&self, anchor: NodeId) -> Vec<Box<dyn Scope>> {
        let mut scopes: Vec<Box<dyn Scope>> = vec![Box::new(BuiltinScope), Box::new(DirectScope)];

        let frames = std::iter::successors(Some(anchor), |id| self.tree.owner(*id));
        for frame in frames {
            match self.tree.kind(frame) {
                Some(NodeKind::Method) => scopes.push(Box::new(MethodScope { method: frame })),
                Some(NodeKind::TypeParameter) => {
                    scopes.push(Box::new(scope::TypeParameterScope { param: frame }))
                }
                Some(NodeKind::Class) => scopes.push(Box::new(ClassScope { class: frame })),
                Some(NodeKind::File) => scopes.push(Box::new(FileScope { file: frame })),
                _ => {}
            }
        }
        scopes
    }

    /// Resolve `target`, searching outward from `start` (default: the element
    /// that owns the reference).
    pub fn resolve(&self, target: TypeRefId, start: Option<NodeId>) -> Resolution {
        let Some(reference) = self.tree.type_ref(target) else {
            warn!("resolve: no type reference at {}", target);
            return Resolution::Skipped;
        };
        if start.is_some_and(|s| !self.tree.contains(s)) || reference.name().is_empty() {
            warn!("resolve: malformed request for {}", target);
            return Resolution::Skipped;
        }

        // A batch tree never changes, so a failure stays a failure.
        if !reference.try_begin(!self.options.batch) {
            return match (reference.cached_canonical(), reference.status()) {
                (Some(canonical), _) => Resolution::Resolved(canonical),
                (None, ResolutionStatus::Failed) => Resolution::Unresolved,
                (None, _) => Resolution::InProgress,
            };
        }

        let name = reference.name();
        let anchor = start.unwrap_or(target.owner);
        let cx = ResolveContext {
            resolver: self,
            target,
            name,
        };

        let outcome = self
            .scope_chain(anchor)
            .into_iter()
            .try_fold((), |(), scope| match scope.resolve(&cx) {
                Some(hit) => ControlFlow::Break((scope.name(), hit)),
                None => {
                    trace!("{}: {} scope has no {:?}", target, scope.name(), name);
                    ControlFlow::Continue(())
                }
            });

        match outcome {
            ControlFlow::Break((scope_name, hit)) => {
                let canonical = self.commit(target, reference, hit);
                debug!("{}: {:?} -> {} ({} scope)", target, name, canonical, scope_name);
                Resolution::Resolved(canonical)
            }
            ControlFlow::Continue(()) => {
                reference.fail();
                self.metrics.record_failure(name);
                debug!("{}: {:?} unresolved", target, name);
                Resolution::Unresolved
            }
        }
    }

    /// Record a hit on the reference and register the matching subscription.
    fn commit(&self, target: TypeRefId, reference: &TypeReference, hit: ScopeHit) -> String {
        let (canonical, origin, watch) = match hit {
            ScopeHit::Primitive(name) => (name, ResolutionOrigin::Primitive, None),
            ScopeHit::Found(node) => {
                let canonical = self.tree.path(node).unwrap_or_default().to_string();
                let file = self.tree.file_of(node).unwrap_or(node);
                (canonical, ResolutionOrigin::Declared, Some(file))
            }
            // Follow the bound's target; an unbounded or primitive-bounded
            // parameter only changes with its own declaration.
            ScopeHit::TypeParameter {
                param,
                canonical,
                watch,
            } => {
                let watch = watch.or_else(|| self.tree.file_of(param));
                (canonical, ResolutionOrigin::TypeParameter, watch)
            }
            ScopeHit::Dependency(canonical) => {
                self.metrics.record_dependency_import(&canonical);
                (canonical, ResolutionOrigin::Dependency, Some(self.tree.root()))
            }
        };

        reference.complete(canonical.clone(), origin);

        if !self.options.batch {
            if let Some(node) = watch {
                if let Err(e) = self.tree.subscribe_reference(target, node) {
                    warn!("{}: cannot subscribe to {}: {}", target, node, e);
                }
            }
        }
        canonical
    }

    pub fn resolve_method(&self, method: NodeId) -> Resolution {
        self.resolve(TypeRefId::return_type(method), None)
    }

    /// Resolve the return type of every method declared in `file`.
    pub fn resolve_all_in_file(&self, file: NodeId) -> Vec<(NodeId, Resolution)> {
        self.tree
            .methods_under(file)
            .into_iter()
            .map(|method| (method, self.resolve_method(method)))
            .collect()
    }
}
