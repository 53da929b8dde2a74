// Tree model library - exposes the widget-facing tree modules

pub mod tree;

pub use tree::{Forest, Node, NodeId, NodeKind, TreeError, TreeStore};
