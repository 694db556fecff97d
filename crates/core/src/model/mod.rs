//! Element model: the parent-linked structure of parsed Java source.
//!
//! Elements are passive. They are owned by the [`SymbolTree`](crate::tree::SymbolTree)
//! arena and addressed by [`NodeId`]; type references inside them carry their own
//! resolution state.

pub mod element;
pub mod path;
pub mod source;
pub mod type_ref;

pub use element::{
    ClassElement, CodeFile, Element, FILE_MARKER, Import, MethodElement, NodeKind,
    TypeParameterElement, file_marker_key,
};
pub use source::{ClassSource, FileSource, MethodSource, TypeParameterSource, TypeSource};
pub use type_ref::{RefSlot, ResolutionOrigin, ResolutionStatus, TypeRefId, TypeReference};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a node in the symbol tree. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
