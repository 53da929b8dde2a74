use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Unique identifier for a tree node
///
/// Ids are allocated from a monotonic counter carried by the owning
/// [`Forest`](super::Forest) and are never reused, so an id stays valid
/// as a lookup key across snapshots for as long as the node exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Kind of a tree entry, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    File,
    Folder,
}

/// A single file or folder entry in the forest
///
/// Children are shared between snapshots via `Arc`; a mutation rebuilds only
/// the nodes on the path from the mutated position up to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Unique identifier, stable for the node's lifetime
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// File or folder
    pub kind: NodeKind,
    /// Child entries in insertion order (always empty for files)
    pub children: Vec<Arc<Node>>,
}

impl Node {
    pub(crate) fn new(id: NodeId, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Check if this node is a folder
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Check if this node is a file
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_node() {
        let node = Node::new(NodeId(7), "notes.txt", NodeKind::File);

        assert_eq!(node.id, NodeId(7));
        assert_eq!(node.name, "notes.txt");
        assert!(node.is_file());
        assert!(!node.is_folder());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_folder_node() {
        let node = Node::new(NodeId(1), "src", NodeKind::Folder);

        assert!(node.is_folder());
        assert!(!node.is_file());
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(42).to_string(), "Node(42)");
    }
}
