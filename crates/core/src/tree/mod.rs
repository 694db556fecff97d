//! Symbol tree: a mutable dotted-path namespace over element nodes.
//!
//! Nodes live in an id-keyed arena. Packages are created on demand as plain
//! namespace segments. Files hang under their package behind a marker key and
//! are transparent to lookups, so `p.Foo` finds class `Foo` declared in any file
//! of package `p`.

pub mod subscription;

use crate::error::{Result, TypescopeError};
use crate::model::path;
use crate::model::{
    ClassSource, Element, FileSource, MethodSource, NodeId, NodeKind, TypeRefId, TypeReference,
};
use smol_str::SmolStr;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

pub use subscription::{ListenerId, Notification, Subscriber, SubscriptionRegistry, TreeEvent};

#[derive(Debug)]
pub struct TreeNode {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Key under the parent: a simple name, or the marker key for files.
    pub segment: SmolStr,
    pub parent: Option<NodeId>,
    /// Full dotted path. A file's path is its package.
    pub path: String,
    pub element: Option<Element>,
    /// All children in insertion order.
    children: Vec<NodeId>,
    /// Visible children by segment. Files are not listed here.
    by_segment: HashMap<SmolStr, Vec<NodeId>>,
    /// Invisible file children.
    files: Vec<NodeId>,
}

impl TreeNode {
    fn new(id: NodeId, kind: NodeKind, segment: SmolStr, parent: Option<NodeId>, path: String) -> Self {
        Self {
            id,
            kind,
            segment,
            parent,
            path,
            element: None,
            children: Vec::new(),
            by_segment: HashMap::new(),
            files: Vec::new(),
        }
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

pub struct SymbolTree {
    nodes: HashMap<NodeId, TreeNode>,
    root: NodeId,
    next_id: u32,
    files: HashMap<PathBuf, NodeId>,
    subscriptions: SubscriptionRegistry,
}

impl Default for SymbolTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTree {
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            TreeNode::new(root, NodeKind::Root, SmolStr::default(), None, String::new()),
        );
        Self {
            nodes,
            root,
            next_id: 1,
            files: HashMap::new(),
            subscriptions: SubscriptionRegistry::new(),
        }
    }

    // ---- Read-only accessors ----

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(&id)?.element.as_ref()
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(&id).map(|n| n.kind)
    }

    pub fn path(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(&id).map(|n| n.path.as_str())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Element-model owner: the enclosing element. Files, packages and the
    /// root have none; a top-level class is owned by its file.
    pub fn owner(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(&id)?;
        match node.kind {
            NodeKind::Class | NodeKind::Method | NodeKind::TypeParameter => node.parent,
            NodeKind::Root | NodeKind::Package | NodeKind::File => None,
        }
    }

    /// Tree ancestors of `id`, nearest first, ending at the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(&id).and_then(|n| n.parent), move |cur| {
            self.nodes.get(cur).and_then(|n| n.parent)
        })
    }

    /// The file `id` belongs to (itself when `id` is a file).
    pub fn file_of(&self, id: NodeId) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| self.kind(*n) == Some(NodeKind::File))
    }

    pub fn file_id(&self, source_path: &Path) -> Option<NodeId> {
        self.files.get(source_path).copied()
    }

    pub fn files(&self) -> impl Iterator<Item = (&Path, NodeId)> {
        self.files.iter().map(|(p, id)| (p.as_path(), *id))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn type_ref(&self, id: TypeRefId) -> Option<&TypeReference> {
        self.element(id.owner)?.type_ref(id.slot)
    }

    /// Direct children of `id` with the given kind, in declaration order.
    pub fn children_of_kind(&self, id: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.nodes
            .get(&id)
            .map(|n| {
                n.children
                    .iter()
                    .copied()
                    .filter(|c| self.kind(*c) == Some(kind))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn type_parameters(&self, owner: NodeId) -> Vec<NodeId> {
        self.children_of_kind(owner, NodeKind::TypeParameter)
    }

    /// Every method under `id`, depth-first in declaration order.
    pub fn methods_under(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.nodes.get(&cur) else {
                continue;
            };
            if node.kind == NodeKind::Method {
                out.push(cur);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    pub fn methods(&self) -> Vec<NodeId> {
        self.methods_under(self.root)
    }

    /// Every type reference under `id` (return types, supertypes, bounds).
    pub fn type_refs_under(&self, id: NodeId) -> Vec<TypeRefId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let Some(node) = self.nodes.get(&cur) else {
                continue;
            };
            if let Some(element) = &node.element {
                out.extend(
                    element
                        .type_refs()
                        .into_iter()
                        .map(|(slot, _)| TypeRefId::new(cur, slot)),
                );
            }
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    // ---- Lookup ----

    /// Visible children of `id` named `segment`, looking through files.
    fn visible_children(&self, id: NodeId, segment: &str) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(&id) else {
            return Vec::new();
        };
        let mut found: Vec<NodeId> = node.by_segment.get(segment).cloned().unwrap_or_default();
        for file in &node.files {
            if let Some(hits) = self.nodes.get(file).and_then(|f| f.by_segment.get(segment)) {
                found.extend(hits.iter().copied());
            }
        }
        found
    }

    fn child_package(&self, id: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes
            .get(&id)?
            .by_segment
            .get(segment)?
            .iter()
            .copied()
            .find(|c| self.kind(*c) == Some(NodeKind::Package))
    }

    /// Every node at `path`. Several nodes can share a path (overloads, a
    /// package and a class of the same name), so the walk keeps all candidates.
    pub fn lookup_all(&self, path: &str) -> Vec<NodeId> {
        if path.is_empty() || !path::is_valid(path) {
            return Vec::new();
        }
        let mut current = vec![self.root];
        for segment in path::segments(path) {
            let next: Vec<NodeId> = current
                .iter()
                .flat_map(|id| self.visible_children(*id, segment))
                .collect();
            if next.is_empty() {
                return Vec::new();
            }
            current = next;
        }
        current
    }

    /// The node at `path`, if any. Absence is a normal outcome.
    pub fn lookup(&self, path: &str) -> Option<NodeId> {
        self.lookup_all(path).into_iter().next()
    }

    /// Like [`lookup`](Self::lookup) but only accepts a class.
    pub fn lookup_type(&self, path: &str) -> Option<NodeId> {
        self.lookup_all(path)
            .into_iter()
            .find(|id| self.kind(*id) == Some(NodeKind::Class))
    }

    // ---- Mutation ----

    /// Insert `element` at `path`, creating missing package segments and
    /// attaching under the nearest existing ancestor.
    ///
    /// For a file, `path` is its package. For any other element the last
    /// segment of `path` must be the element's own name.
    pub fn insert_at(&mut self, path: &str, element: Element) -> Result<NodeId> {
        if !path::is_valid(path) {
            return Err(TypescopeError::InvalidPath(path.to_string()));
        }
        let is_file = element.kind() == NodeKind::File;
        let parent_path = if is_file {
            path
        } else {
            let (parent_path, last) = path::split_last(path);
            if last != element.segment().as_str() {
                return Err(TypescopeError::InvalidPath(path.to_string()));
            }
            parent_path
        };

        let mut parent = self.root;
        for segment in path::segments(parent_path) {
            // A file always lives under packages, even where a class shares the name.
            let existing = if is_file {
                self.child_package(parent, segment)
            } else {
                self.visible_children(parent, segment).first().copied()
            };
            parent = match existing {
                Some(existing) => existing,
                None => self.attach(parent, NodeKind::Package, SmolStr::from(segment), None)?,
            };
        }
        self.insert_child(parent, element)
    }

    /// Attach `element` directly under `parent`.
    pub fn insert_child(&mut self, parent: NodeId, element: Element) -> Result<NodeId> {
        let kind = element.kind();
        let segment = element.segment();
        if segment.is_empty() {
            return Err(TypescopeError::InvalidInput(format!(
                "{:?} element without a name",
                kind
            )));
        }
        if let Element::File(file) = &element {
            if self.files.contains_key(&file.source_path) {
                return Err(TypescopeError::InvalidInput(format!(
                    "file {} is already indexed",
                    file.source_path.display()
                )));
            }
        }
        self.attach(parent, kind, segment, Some(element))
    }

    fn attach(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        segment: SmolStr,
        element: Option<Element>,
    ) -> Result<NodeId> {
        let parent_node = self
            .nodes
            .get(&parent)
            .ok_or(TypescopeError::UnknownNode(parent))?;
        let node_path = if kind == NodeKind::File {
            parent_node.path.clone()
        } else {
            path::join(&parent_node.path, &segment)
        };

        let id = NodeId(self.next_id);
        self.next_id += 1;

        if let Some(Element::File(file)) = &element {
            self.files.insert(file.source_path.clone(), id);
        }

        let mut node = TreeNode::new(id, kind, segment.clone(), Some(parent), node_path);
        node.element = element;
        trace!("attach {} {:?} at {:?}", id, kind, node.path);
        self.nodes.insert(id, node);

        if let Some(parent_node) = self.nodes.get_mut(&parent) {
            parent_node.children.push(id);
            if kind == NodeKind::File {
                parent_node.files.push(id);
            } else {
                parent_node.by_segment.entry(segment).or_default().push(id);
            }
        }

        self.bubble_added(id);
        Ok(id)
    }

    /// Notify every subscribable ancestor of `id` that it gained a descendant.
    fn bubble_added(&self, id: NodeId) {
        for scope in self.ancestors(id) {
            let subscribable = self.kind(scope).is_some_and(|k| k.is_subscribable());
            if subscribable && self.subscriptions.has_subscribers(scope) {
                self.subscriptions
                    .notify(scope, TreeEvent::Added { node: id, scope });
            }
        }
    }

    /// Insert a whole file subtree.
    pub fn insert_file(&mut self, source: &FileSource) -> Result<NodeId> {
        let file = self.insert_at(&source.package, Element::File(source.to_element()))?;
        for class in &source.classes {
            self.insert_class(file, class)?;
        }
        debug!(
            "indexed {} ({} top-level classes) into package {:?}",
            source.path.display(),
            source.classes.len(),
            source.package
        );
        Ok(file)
    }

    /// Insert a class and everything declared in it under `parent`.
    pub fn insert_class(&mut self, parent: NodeId, class: &ClassSource) -> Result<NodeId> {
        let id = self.insert_child(parent, Element::Class(class.to_element()))?;
        for tp in &class.type_parameters {
            self.insert_child(id, Element::TypeParameter(tp.to_element()))?;
        }
        for nested in &class.classes {
            self.insert_class(id, nested)?;
        }
        for method in &class.methods {
            self.insert_method(id, method)?;
        }
        Ok(id)
    }

    pub fn insert_method(&mut self, class: NodeId, method: &MethodSource) -> Result<NodeId> {
        let id = self.insert_child(class, Element::Method(method.to_element()))?;
        for tp in &method.type_parameters {
            self.insert_child(id, Element::TypeParameter(tp.to_element()))?;
        }
        Ok(id)
    }

    /// Detach `id` and its descendants. Subscribers of every removed node are
    /// notified of the removal, then cleared. Returns the removed ids.
    pub fn remove(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        if id == self.root {
            return Err(TypescopeError::InvalidInput(
                "the root cannot be removed".to_string(),
            ));
        }
        let node = self.nodes.get(&id).ok_or(TypescopeError::UnknownNode(id))?;
        let parent = node.parent;

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(n) = self.nodes.get(&cur) {
                stack.extend(n.children.iter().copied());
                removed.push(cur);
            }
        }

        for cur in &removed {
            self.subscriptions
                .notify(*cur, TreeEvent::Removed { node: *cur });
            self.subscriptions.clear(*cur);
        }
        for cur in &removed {
            self.release_references(*cur);
        }
        for cur in &removed {
            if let Some(TreeNode {
                element: Some(Element::File(file)),
                ..
            }) = self.nodes.remove(cur)
            {
                self.files.remove(&file.source_path);
            }
        }

        if let Some(parent) = parent {
            self.detach_from(parent, id);
            self.prune_empty_packages(parent);
        }
        debug!("removed {} node(s) rooted at {}", removed.len(), id);
        Ok(removed)
    }

    /// Drop the subscriptions held by the references of a departing node.
    fn release_references(&self, id: NodeId) {
        let Some(element) = self.element(id) else {
            return;
        };
        for (slot, reference) in element.type_refs() {
            if let Some(node) = reference.reset() {
                self.subscriptions
                    .unsubscribe(node, &Subscriber::Reference(TypeRefId::new(id, slot)));
            }
        }
    }

    /// Remove the file indexed under `source_path`, if any.
    pub fn remove_file(&mut self, source_path: &Path) -> Result<Option<Vec<NodeId>>> {
        match self.file_id(source_path) {
            Some(id) => self.remove(id).map(Some),
            None => Ok(None),
        }
    }

    fn detach_from(&mut self, parent: NodeId, child: NodeId) {
        let Some(node) = self.nodes.get_mut(&parent) else {
            return;
        };
        node.children.retain(|c| *c != child);
        node.files.retain(|c| *c != child);
        for ids in node.by_segment.values_mut() {
            ids.retain(|c| *c != child);
        }
        node.by_segment.retain(|_, ids| !ids.is_empty());
    }

    fn prune_empty_packages(&mut self, start: NodeId) {
        let mut current = start;
        loop {
            let Some(node) = self.nodes.get(&current) else {
                return;
            };
            if node.kind != NodeKind::Package || !node.is_empty() {
                return;
            }
            let Some(parent) = node.parent else {
                return;
            };
            self.nodes.remove(&current);
            self.detach_from(parent, current);
            current = parent;
        }
    }

    // ---- Subscriptions ----

    pub fn subscriptions(&self) -> &SubscriptionRegistry {
        &self.subscriptions
    }

    /// Register a narrow observer on `node` and its subtree.
    pub fn subscribe(&self, node: NodeId, subscriber: Subscriber) -> Result<()> {
        let kind = self.kind(node).ok_or(TypescopeError::UnknownNode(node))?;
        if !kind.is_subscribable() {
            return Err(TypescopeError::NotSubscribable(node));
        }
        self.subscriptions.subscribe(node, subscriber);
        Ok(())
    }

    /// Register a broad observer: notified about anything added anywhere.
    pub fn subscribe_root(&self, subscriber: Subscriber) {
        self.subscriptions.subscribe(self.root, subscriber);
    }

    pub fn unsubscribe(&self, node: NodeId, subscriber: &Subscriber) -> bool {
        self.subscriptions.unsubscribe(node, subscriber)
    }

    pub fn new_listener(&self) -> ListenerId {
        self.subscriptions.new_listener()
    }

    /// Subscribe a type reference to `node`, replacing any subscription the
    /// reference already holds.
    pub fn subscribe_reference(&self, reference: TypeRefId, node: NodeId) -> Result<()> {
        let target = self
            .type_ref(reference)
            .ok_or(TypescopeError::UnknownNode(reference.owner))?;
        self.subscribe(node, Subscriber::Reference(reference))?;
        if let Some(previous) = target.subscription() {
            if previous != node {
                self.subscriptions
                    .unsubscribe(previous, &Subscriber::Reference(reference));
            }
        }
        target.set_subscription(Some(node));
        Ok(())
    }

    /// Reset a reference to `Unresolved` and drop its subscription. Returns
    /// `false` when the reference no longer exists.
    pub fn invalidate(&self, reference: TypeRefId) -> bool {
        let Some(target) = self.type_ref(reference) else {
            return false;
        };
        if let Some(node) = target.reset() {
            self.subscriptions
                .unsubscribe(node, &Subscriber::Reference(reference));
        }
        true
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.subscriptions.take_notifications()
    }
}
