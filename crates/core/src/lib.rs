pub mod error;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod tree;

pub use error::{Result, TypescopeError};
pub use tree::SymbolTree;
