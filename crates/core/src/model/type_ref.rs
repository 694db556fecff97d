use super::NodeId;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a single resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStatus {
    Unresolved,
    /// Entered before any lookup; doubles as the cycle guard.
    InProgress,
    Resolved,
    /// The last attempt exhausted the scope chain. Retryable.
    Failed,
}

/// Which kind of declaration a resolved reference ended on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOrigin {
    Primitive,
    /// A type indexed in the tree.
    Declared,
    /// A type parameter, standing for its bound.
    TypeParameter,
    /// A single import of a type outside the indexed code.
    Dependency,
}

/// Where a type reference sits inside its owning element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefSlot {
    ReturnType,
    Supertype(u32),
    Bound(u32),
}

/// Stable address of a type reference: its owning node plus its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeRefId {
    pub owner: NodeId,
    pub slot: RefSlot,
}

impl TypeRefId {
    pub fn new(owner: NodeId, slot: RefSlot) -> Self {
        Self { owner, slot }
    }

    pub fn return_type(method: NodeId) -> Self {
        Self::new(method, RefSlot::ReturnType)
    }
}

impl fmt::Display for TypeRefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot {
            RefSlot::ReturnType => write!(f, "{}:return", self.owner),
            RefSlot::Supertype(i) => write!(f, "{}:super[{}]", self.owner, i),
            RefSlot::Bound(i) => write!(f, "{}:bound[{}]", self.owner, i),
        }
    }
}

#[derive(Debug)]
struct RefState {
    status: ResolutionStatus,
    canonical: Option<String>,
    origin: Option<ResolutionOrigin>,
    /// Node this reference is currently subscribed to, if any.
    subscription: Option<NodeId>,
}

/// A use of a type name, resolved in place.
///
/// State sits behind a mutex so resolution can run against a shared tree.
pub struct TypeReference {
    name: String,
    is_array: bool,
    state: Mutex<RefState>,
}

impl TypeReference {
    pub fn new(name: impl Into<String>, is_array: bool) -> Self {
        Self {
            name: name.into(),
            is_array,
            state: Mutex::new(RefState {
                status: ResolutionStatus::Unresolved,
                canonical: None,
                origin: None,
                subscription: None,
            }),
        }
    }

    /// Parse a written type: generic arguments are erased, trailing `[]` and
    /// varargs `...` mark an array.
    ///
    /// ```
    /// use typescope_core::model::TypeReference;
    /// let r = TypeReference::parse("java.util.List<String>[]");
    /// assert_eq!(r.name(), "java.util.List");
    /// assert!(r.is_array());
    /// ```
    pub fn parse(raw: &str) -> Self {
        let mut text = raw.trim();
        let mut is_array = false;
        loop {
            if let Some(rest) = text.strip_suffix("[]") {
                text = rest.trim_end();
                is_array = true;
            } else if let Some(rest) = text.strip_suffix("...") {
                text = rest.trim_end();
                is_array = true;
            } else {
                break;
            }
        }
        let head = match text.find('<') {
            Some(pos) => &text[..pos],
            None => text,
        };
        let name: String = head.chars().filter(|c| !c.is_whitespace()).collect();
        Self::new(name, is_array)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_array(&self) -> bool {
        self.is_array
    }

    pub fn status(&self) -> ResolutionStatus {
        self.state.lock().status
    }

    pub fn is_resolved(&self) -> bool {
        self.status() == ResolutionStatus::Resolved
    }

    /// The resolved canonical name, if any.
    pub fn cached_canonical(&self) -> Option<String> {
        let state = self.state.lock();
        match state.status {
            ResolutionStatus::Resolved => state.canonical.clone(),
            _ => None,
        }
    }

    /// Canonical name, falling back to the raw name when unresolved.
    pub fn canonical_name(&self) -> String {
        self.cached_canonical().unwrap_or_else(|| self.name.clone())
    }

    /// Canonical name with `[]` appended for arrays.
    pub fn display_name(&self) -> String {
        let base = self.canonical_name();
        if self.is_array {
            format!("{}[]", base)
        } else {
            base
        }
    }

    /// How the current resolution was reached; `None` unless resolved.
    pub fn origin(&self) -> Option<ResolutionOrigin> {
        let state = self.state.lock();
        match state.status {
            ResolutionStatus::Resolved => state.origin,
            _ => None,
        }
    }

    pub fn subscription(&self) -> Option<NodeId> {
        self.state.lock().subscription
    }

    /// Enter `InProgress`. Returns `false` (and changes nothing) when the
    /// reference is already resolved or being resolved, or when it failed
    /// and `retry_failed` is off.
    pub fn try_begin(&self, retry_failed: bool) -> bool {
        let mut state = self.state.lock();
        match state.status {
            ResolutionStatus::Resolved | ResolutionStatus::InProgress => false,
            ResolutionStatus::Failed if !retry_failed => false,
            ResolutionStatus::Unresolved | ResolutionStatus::Failed => {
                state.status = ResolutionStatus::InProgress;
                true
            }
        }
    }

    pub fn complete(&self, canonical: impl Into<String>, origin: ResolutionOrigin) {
        let mut state = self.state.lock();
        state.status = ResolutionStatus::Resolved;
        state.canonical = Some(canonical.into());
        state.origin = Some(origin);
    }

    pub fn fail(&self) {
        let mut state = self.state.lock();
        state.status = ResolutionStatus::Failed;
        state.canonical = None;
        state.origin = None;
    }

    pub(crate) fn set_subscription(&self, node: Option<NodeId>) {
        self.state.lock().subscription = node;
    }

    /// Back to `Unresolved`; returns the subscription that was held.
    pub(crate) fn reset(&self) -> Option<NodeId> {
        let mut state = self.state.lock();
        state.status = ResolutionStatus::Unresolved;
        state.canonical = None;
        state.origin = None;
        state.subscription.take()
    }
}

impl fmt::Debug for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TypeReference")
            .field("name", &self.name)
            .field("is_array", &self.is_array)
            .field("status", &state.status)
            .field("canonical", &state.canonical)
            .field("origin", &state.origin)
            .finish()
    }
}
