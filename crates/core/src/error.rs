use crate::model::NodeId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypescopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),
    #[error("Node {0} does not accept subscribers")]
    NotSubscribable(NodeId),
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TypescopeError>;
