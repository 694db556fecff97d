//! Java type-reference resolution over a [`SymbolTree`](typescope_core::SymbolTree).

pub mod naming;
pub mod resolver;

pub use resolver::{Resolution, ResolveOptions, Resolver};
