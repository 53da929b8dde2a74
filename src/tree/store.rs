use super::forest::Forest;
use super::node::{Node, NodeId, NodeKind};
use std::collections::HashSet;

/// Widget state for a file tree
///
/// Owns the current [`Forest`] snapshot together with the view state the
/// rendering layer needs: which folders are expanded and which node is
/// selected. Mutations swap in the successor snapshot returned by the
/// forest; a failed mutation keeps the previous snapshot and is logged at
/// debug level instead of surfacing an error.
///
/// Expansion flags and selection are view state only. They are not part of
/// the forest value and never survive into snapshots held by callers.
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    /// Current snapshot
    forest: Forest,
    /// Ids of expanded folders (absent means collapsed)
    expanded: HashSet<NodeId>,
    /// Currently selected node, if any
    selected: Option<NodeId>,
}

impl TreeStore {
    /// Create a store with an empty forest
    pub fn new() -> Self {
        Self::with_forest(Forest::new())
    }

    /// Create a store from a seed snapshot
    pub fn with_forest(forest: Forest) -> Self {
        Self {
            forest,
            expanded: HashSet::new(),
            selected: None,
        }
    }

    /// Get the current snapshot
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Find a node in the current snapshot by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.forest.get(id)
    }

    /// Get the currently selected node id
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Set the selected node
    pub fn set_selected(&mut self, id: Option<NodeId>) {
        self.selected = id;
    }

    /// Check whether a folder is expanded
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.contains(&id)
    }

    /// Flip the expansion flag of a folder
    ///
    /// Files and unknown ids are ignored.
    pub fn toggle_expanded(&mut self, id: NodeId) {
        let Some(node) = self.forest.get(id) else {
            return;
        };
        if !node.is_folder() {
            return;
        }
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    /// Create a node and return its id
    ///
    /// With `parent = None` the node lands in the root sequence, otherwise
    /// in the given folder, which is marked expanded so the new entry is
    /// visible. Returns `None` without changing the snapshot when the
    /// forest rejects the operation (blank name, missing parent, parent
    /// not a folder).
    pub fn create(&mut self, parent: Option<NodeId>, kind: NodeKind, name: &str) -> Option<NodeId> {
        match self.forest.create(parent, kind, name) {
            Ok((forest, id)) => {
                self.forest = forest;
                if let Some(parent_id) = parent {
                    self.expanded.insert(parent_id);
                }
                Some(id)
            }
            Err(err) => {
                tracing::debug!("create ignored: {}", err);
                None
            }
        }
    }

    /// Rename a node
    ///
    /// Returns `false` without changing the snapshot when the forest
    /// rejects the operation (missing id, blank name).
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> bool {
        match self.forest.rename(id, new_name) {
            Ok(forest) => {
                self.forest = forest;
                true
            }
            Err(err) => {
                tracing::debug!("rename ignored: {}", err);
                false
            }
        }
    }

    /// Delete a node together with its subtree
    ///
    /// Expansion flags of removed nodes are dropped, and the selection is
    /// cleared when the selected node is no longer present. Returns `false`
    /// without changing the snapshot when the id does not exist.
    pub fn delete(&mut self, id: NodeId) -> bool {
        match self.forest.delete(id) {
            Ok(forest) => {
                self.forest = forest;
                let forest = &self.forest;
                self.expanded.retain(|flagged| forest.contains(*flagged));
                if let Some(selected) = self.selected {
                    if !forest.contains(selected) {
                        self.selected = None;
                    }
                }
                true
            }
            Err(err) => {
                tracing::debug!("delete ignored: {}", err);
                false
            }
        }
    }

    /// Get the visible nodes in display order
    ///
    /// Roots are always visible; children are visible when every ancestor
    /// is expanded.
    pub fn visible_nodes(&self) -> Vec<NodeId> {
        self.display_rows().into_iter().map(|(id, _)| id).collect()
    }

    /// Get the visible nodes with their depths, for indented rendering
    pub fn display_rows(&self) -> Vec<(NodeId, usize)> {
        let mut rows = Vec::new();
        for root in self.forest.roots() {
            self.collect_rows(root, 0, &mut rows);
        }
        rows
    }

    fn collect_rows(&self, node: &Node, depth: usize, rows: &mut Vec<(NodeId, usize)>) {
        rows.push((node.id, depth));
        if self.expanded.contains(&node.id) {
            for child in &node.children {
                self.collect_rows(child, depth + 1, rows);
            }
        }
    }

    /// Select the next visible node
    pub fn select_next(&mut self) {
        let visible = self.visible_nodes();
        if visible.is_empty() {
            return;
        }

        if let Some(current) = self.selected {
            if let Some(pos) = visible.iter().position(|&id| id == current) {
                if pos + 1 < visible.len() {
                    self.selected = Some(visible[pos + 1]);
                }
            }
        } else {
            self.selected = Some(visible[0]);
        }
    }

    /// Select the previous visible node
    pub fn select_prev(&mut self) {
        let visible = self.visible_nodes();
        if visible.is_empty() {
            return;
        }

        if let Some(current) = self.selected {
            if let Some(pos) = visible.iter().position(|&id| id == current) {
                if pos > 0 {
                    self.selected = Some(visible[pos - 1]);
                }
            }
        } else {
            self.selected = Some(visible[0]);
        }
    }

    /// Select the first visible node
    pub fn select_first(&mut self) {
        let visible = self.visible_nodes();
        if !visible.is_empty() {
            self.selected = Some(visible[0]);
        }
    }

    /// Select the last visible node
    pub fn select_last(&mut self) {
        let visible = self.visible_nodes();
        if let Some(&last) = visible.last() {
            self.selected = Some(last);
        }
    }

    /// Select the parent of the currently selected node
    ///
    /// Root-level nodes keep their selection.
    pub fn select_parent(&mut self) {
        if let Some(current) = self.selected {
            let chain = self.forest.ancestors(current);
            if chain.len() >= 2 {
                self.selected = Some(chain[chain.len() - 2]);
            }
        }
    }
}
