use super::node::NodeId;
use thiserror::Error;

/// Errors produced by forest operations
///
/// Lookups (`get`) report absence through `Option`; only mutations return
/// these errors. The [`TreeStore`](super::TreeStore) layer converts every
/// variant into a logged no-op, keeping the previous snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Create or rename was given a blank name
    #[error("name is empty")]
    EmptyName,
    /// Create targeted a parent id that does not exist
    #[error("parent {0} not found")]
    ParentNotFound(NodeId),
    /// Create targeted a parent that is not a folder
    #[error("{0} is not a folder")]
    InvalidParent(NodeId),
    /// Rename or delete targeted a node that does not exist
    #[error("{0} not found")]
    NodeNotFound(NodeId),
}
