use super::error::TreeError;
use super::node::{Node, NodeId, NodeKind};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered forest of file/folder nodes with snapshot semantics
///
/// Every mutation returns a new `Forest` value instead of changing `self`.
/// The successor shares all untouched subtrees with its predecessor, so a
/// previously held snapshot stays valid and unmodified while clones of the
/// whole value remain cheap (reference bumps, no deep copy).
///
/// The id allocator travels with the value: `next_id` is carried into each
/// successor, so every snapshot in a lineage allocates unique, never-reused
/// ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Forest {
    /// Root entries in insertion order
    roots: Vec<Arc<Node>>,
    /// Next node id to assign
    next_id: u64,
}

impl Forest {
    /// Create an empty forest
    pub fn new() -> Self {
        Self {
            roots: Vec::new(),
            next_id: 1,
        }
    }

    /// Get the root entries in insertion order
    pub fn roots(&self) -> &[Arc<Node>] {
        &self.roots
    }

    /// Iterate over all nodes in depth-first pre-order
    ///
    /// Pre-order means a node is yielded before its children, and siblings
    /// are yielded in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut stack: Vec<&Node> = self.roots.iter().rev().map(Arc::as_ref).collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            for child in node.children.iter().rev() {
                stack.push(child);
            }
            Some(node)
        })
    }

    /// Get the total number of nodes in the forest
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Check whether the forest has no nodes
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a node by id
    ///
    /// Searches in depth-first pre-order and returns the first match, or
    /// `None` if no node has the given id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.iter().find(|node| node.id == id)
    }

    /// Check whether a node with the given id exists
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Create a new node and return the successor snapshot plus the new id
    ///
    /// With `parent = None` the node is appended to the root sequence,
    /// otherwise to the children of the given folder.
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for a blank or whitespace-only name,
    /// `ParentNotFound` if no node has the parent id, and `InvalidParent`
    /// if the parent is a file.
    pub fn create(
        &self,
        parent: Option<NodeId>,
        kind: NodeKind,
        name: &str,
    ) -> Result<(Self, NodeId), TreeError> {
        if name.trim().is_empty() {
            return Err(TreeError::EmptyName);
        }

        let id = NodeId(self.next_id);
        let child = Arc::new(Node::new(id, name, kind));

        let roots = match parent {
            None => {
                let mut roots = self.roots.clone();
                roots.push(child);
                roots
            }
            Some(parent_id) => {
                match self.get(parent_id) {
                    None => return Err(TreeError::ParentNotFound(parent_id)),
                    Some(node) if !node.is_folder() => {
                        return Err(TreeError::InvalidParent(parent_id))
                    }
                    Some(_) => {}
                }
                insert_child(&self.roots, parent_id, &child)
                    .ok_or(TreeError::ParentNotFound(parent_id))?
            }
        };

        Ok((
            Self {
                roots,
                next_id: self.next_id + 1,
            },
            id,
        ))
    }

    /// Rename a node and return the successor snapshot
    ///
    /// # Errors
    ///
    /// Returns `EmptyName` for a blank or whitespace-only name and
    /// `NodeNotFound` if no node has the given id.
    pub fn rename(&self, id: NodeId, new_name: &str) -> Result<Self, TreeError> {
        if new_name.trim().is_empty() {
            return Err(TreeError::EmptyName);
        }

        let roots = rename_node(&self.roots, id, new_name).ok_or(TreeError::NodeNotFound(id))?;
        Ok(Self {
            roots,
            next_id: self.next_id,
        })
    }

    /// Delete a node together with its whole subtree and return the
    /// successor snapshot
    ///
    /// There is no orphan promotion: descendants of the deleted node are
    /// gone from the successor along with it.
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if no node has the given id.
    pub fn delete(&self, id: NodeId) -> Result<Self, TreeError> {
        let roots = remove_node(&self.roots, id).ok_or(TreeError::NodeNotFound(id))?;
        Ok(Self {
            roots,
            next_id: self.next_id,
        })
    }

    /// Get the id chain from a root down to the given node, inclusive
    ///
    /// Returns an empty vector if the id is not present.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        fn walk(list: &[Arc<Node>], id: NodeId, path: &mut Vec<NodeId>) -> bool {
            for node in list {
                path.push(node.id);
                if node.id == id || walk(&node.children, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        if walk(&self.roots, id, &mut path) {
            path
        } else {
            Vec::new()
        }
    }

    /// Get the depth of a node (roots are at depth 0)
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let chain = self.ancestors(id);
        if chain.is_empty() {
            None
        } else {
            Some(chain.len() - 1)
        }
    }

    /// Verify the structural invariants of this snapshot
    ///
    /// Checks that every id is unique, that every id is below the allocator
    /// watermark, and that file nodes have no children. Used by the property
    /// tests after every operation.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for node in self.iter() {
            if !seen.insert(node.id) {
                return Err(format!("duplicate id {}", node.id));
            }
            if node.id.0 >= self.next_id {
                return Err(format!(
                    "id {} is not below the allocator watermark {}",
                    node.id, self.next_id
                ));
            }
            if node.is_file() && !node.children.is_empty() {
                return Err(format!("file {} has children", node.id));
            }
        }
        Ok(())
    }
}

impl Default for Forest {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace one entry of a sibling list, sharing the others
fn with_replaced(list: &[Arc<Node>], index: usize, node: Node) -> Vec<Arc<Node>> {
    let mut updated = list.to_vec();
    updated[index] = Arc::new(node);
    updated
}

/// Rebuild a sibling list with `child` appended to the children of `parent`
///
/// Returns `None` if the parent is not in this subtree. Only the spine from
/// the parent up to this level is rebuilt; every other subtree is shared.
fn insert_child(list: &[Arc<Node>], parent: NodeId, child: &Arc<Node>) -> Option<Vec<Arc<Node>>> {
    for (index, node) in list.iter().enumerate() {
        if node.id == parent {
            let mut updated = node.as_ref().clone();
            updated.children.push(Arc::clone(child));
            return Some(with_replaced(list, index, updated));
        }
        if let Some(children) = insert_child(&node.children, parent, child) {
            let mut updated = node.as_ref().clone();
            updated.children = children;
            return Some(with_replaced(list, index, updated));
        }
    }
    None
}

/// Rebuild a sibling list with the first pre-order match renamed
fn rename_node(list: &[Arc<Node>], id: NodeId, new_name: &str) -> Option<Vec<Arc<Node>>> {
    for (index, node) in list.iter().enumerate() {
        if node.id == id {
            let mut updated = node.as_ref().clone();
            updated.name = new_name.to_string();
            return Some(with_replaced(list, index, updated));
        }
        if let Some(children) = rename_node(&node.children, id, new_name) {
            let mut updated = node.as_ref().clone();
            updated.children = children;
            return Some(with_replaced(list, index, updated));
        }
    }
    None
}

/// Rebuild a sibling list with the first pre-order match removed
fn remove_node(list: &[Arc<Node>], id: NodeId) -> Option<Vec<Arc<Node>>> {
    for (index, node) in list.iter().enumerate() {
        if node.id == id {
            let mut updated = list.to_vec();
            updated.remove(index);
            return Some(updated);
        }
        if let Some(children) = remove_node(&node.children, id) {
            let mut updated = node.as_ref().clone();
            updated.children = children;
            return Some(with_replaced(list, index, updated));
        }
    }
    None
}
