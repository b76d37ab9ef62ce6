//! In-memory layer tree.
//!
//! The tree mirrors the captured layers and records the stacking configuration
//! conversion applies. It is the reference [`ContainerBuilder`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strata_core::{Alignment, Axis, Bounds, LayerKind, NodeId, Padding, RebuildError, SizingMode};

use crate::builder::ContainerBuilder;

/// Stacking configuration of a container node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    pub axis: Axis,
    pub primary_sizing: SizingMode,
    pub counter_sizing: SizingMode,
    pub spacing: f64,
    pub padding: Padding,
    pub primary_alignment: Alignment,
    pub counter_alignment: Alignment,
}

/// A node in the layer tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerNode {
    /// Unique ID for this node
    pub id: NodeId,
    pub kind: LayerKind,
    /// Optional name for debugging
    pub name: Option<String>,
    pub bounds: Bounds,
    /// Parent node ID (None for roots and detached nodes)
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Set once the node becomes a stacking container
    pub stack: Option<StackConfig>,
}

impl LayerNode {
    /// Create a new layer node.
    pub fn new(id: NodeId, kind: LayerKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            bounds: Bounds::default(),
            parent: None,
            children: Vec::new(),
            stack: None,
        }
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the bounds.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }
}

/// The complete layer tree for a capture.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayerTree {
    /// All nodes in the tree, indexed by ID
    nodes: HashMap<NodeId, LayerNode>,
    /// Root node IDs (top-level layers)
    roots: Vec<NodeId>,
    /// Counter for generating unique IDs
    next_id: u64,
}

impl LayerTree {
    /// Create an empty layer tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a new unique node ID.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a root node.
    pub fn add_root(&mut self, node: LayerNode) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        self.roots.push(id);
        id
    }

    /// Add a child node to a parent.
    pub fn add_child(&mut self, parent_id: NodeId, mut node: LayerNode) -> NodeId {
        let id = node.id;
        node.parent = Some(parent_id);
        self.nodes.insert(id, node);

        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            parent.children.push(id);
        }

        id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&LayerNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut LayerNode> {
        self.nodes.get_mut(&id)
    }

    /// Get the root nodes.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get children of a node.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &LayerNode> {
        self.nodes
            .get(&id)
            .into_iter()
            .flat_map(|n| n.children.iter())
            .filter_map(|child_id| self.nodes.get(child_id))
    }

    /// IDs of a node's children, in order.
    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(&id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LayerNode, RebuildError> {
        self.nodes.get_mut(&id).ok_or(RebuildError::UnknownNode { node: id })
    }

    fn stack_mut(&mut self, id: NodeId) -> Result<&mut StackConfig, RebuildError> {
        let node = self.node_mut(id)?;
        if !node.kind.is_container() {
            return Err(RebuildError::NotAContainer { node: id });
        }
        Ok(node.stack.get_or_insert_with(StackConfig::default))
    }
}

impl ContainerBuilder for LayerTree {
    fn create_container(&mut self) -> Result<NodeId, RebuildError> {
        let id = self.next_id();
        let mut node = LayerNode::new(id, LayerKind::Frame);
        node.stack = Some(StackConfig::default());
        self.nodes.insert(id, node);
        Ok(id)
    }

    fn set_axis(&mut self, node: NodeId, axis: Axis) -> Result<(), RebuildError> {
        self.stack_mut(node)?.axis = axis;
        Ok(())
    }

    fn set_sizing(&mut self, node: NodeId, primary: SizingMode, counter: SizingMode) -> Result<(), RebuildError> {
        let stack = self.stack_mut(node)?;
        stack.primary_sizing = primary;
        stack.counter_sizing = counter;
        Ok(())
    }

    fn set_spacing(&mut self, node: NodeId, spacing: f64) -> Result<(), RebuildError> {
        self.stack_mut(node)?.spacing = spacing;
        Ok(())
    }

    fn set_padding(&mut self, node: NodeId, padding: Padding) -> Result<(), RebuildError> {
        self.stack_mut(node)?.padding = padding;
        Ok(())
    }

    fn set_alignment(&mut self, node: NodeId, primary: Alignment, counter: Alignment) -> Result<(), RebuildError> {
        let stack = self.stack_mut(node)?;
        stack.primary_alignment = primary;
        stack.counter_alignment = counter;
        Ok(())
    }

    fn detach(&mut self, node: NodeId) -> Result<(), RebuildError> {
        let parent = self.node_mut(node)?.parent.take();
        match parent {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.children.retain(|c| *c != node);
                }
            }
            None => self.roots.retain(|r| *r != node),
        }
        Ok(())
    }

    fn resize(&mut self, node: NodeId, width: f64, height: f64) -> Result<(), RebuildError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(width) || !valid(height) {
            return Err(RebuildError::InvalidSize { node, width, height });
        }
        let bounds = &mut self.node_mut(node)?.bounds;
        bounds.width = width;
        bounds.height = height;
        Ok(())
    }

    fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), RebuildError> {
        let parent_node = self.nodes.get(&parent).ok_or(RebuildError::UnknownNode { node: parent })?;
        if !parent_node.kind.is_container() {
            return Err(RebuildError::NotAContainer { node: parent });
        }
        let child_node = self.nodes.get(&child).ok_or(RebuildError::UnknownNode { node: child })?;
        if let Some(current) = child_node.parent {
            return Err(RebuildError::AlreadyAttached { node: child, parent: current });
        }
        if self.is_ancestor(child, parent) {
            return Err(RebuildError::Cycle { node: child, parent });
        }

        self.roots.retain(|r| *r != child);
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with_frame() -> (LayerTree, NodeId) {
        let mut tree = LayerTree::new();
        let id = tree.next_id();
        tree.add_root(
            LayerNode::new(id, LayerKind::Frame)
                .with_name("root")
                .with_bounds(Bounds::new(0.0, 0.0, 800.0, 600.0)),
        );
        (tree, id)
    }

    #[test]
    fn test_layer_tree() {
        let (mut tree, root_id) = tree_with_frame();

        let child_id = tree.next_id();
        let child = LayerNode::new(child_id, LayerKind::Rectangle)
            .with_name("child")
            .with_bounds(Bounds::new(10.0, 10.0, 100.0, 50.0));
        tree.add_child(root_id, child);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.roots(), &[root_id]);
        assert_eq!(tree.child_ids(root_id), &[child_id]);
        assert_eq!(tree.get(child_id).unwrap().parent, Some(root_id));
        assert_eq!(tree.children(root_id).count(), 1);
    }

    #[test]
    fn test_detach_and_append() {
        let (mut tree, root) = tree_with_frame();
        let a = tree.next_id();
        tree.add_child(root, LayerNode::new(a, LayerKind::Text));
        let wrapper = tree.create_container().unwrap();

        assert_eq!(
            tree.append(wrapper, a),
            Err(RebuildError::AlreadyAttached { node: a, parent: root })
        );
        tree.detach(a).unwrap();
        tree.detach(a).unwrap();
        assert!(tree.child_ids(root).is_empty());

        tree.append(wrapper, a).unwrap();
        tree.append(root, wrapper).unwrap();
        assert_eq!(tree.child_ids(root), &[wrapper]);
        assert_eq!(tree.child_ids(wrapper), &[a]);
        assert!(tree.is_ancestor(root, a));
    }

    #[test]
    fn test_append_rejects_cycles_and_leaves() {
        let (mut tree, root) = tree_with_frame();
        let text = tree.next_id();
        tree.add_child(root, LayerNode::new(text, LayerKind::Text));
        let outer = tree.create_container().unwrap();
        let inner = tree.create_container().unwrap();
        tree.append(outer, inner).unwrap();

        assert_eq!(tree.append(inner, outer), Err(RebuildError::Cycle { node: outer, parent: inner }));
        assert_eq!(tree.append(text, outer), Err(RebuildError::NotAContainer { node: text }));
        assert_eq!(
            tree.append(root, NodeId(999)),
            Err(RebuildError::UnknownNode { node: NodeId(999) })
        );
    }

    #[test]
    fn test_stack_configuration() {
        let (mut tree, root) = tree_with_frame();
        tree.set_axis(root, Axis::Vertical).unwrap();
        tree.set_sizing(root, SizingMode::Hug, SizingMode::Fixed).unwrap();
        tree.set_spacing(root, 8.0).unwrap();
        tree.set_padding(root, Padding::uniform(4.0)).unwrap();
        tree.set_alignment(root, Alignment::SpaceBetween, Alignment::Center).unwrap();

        let stack = tree.get(root).unwrap().stack.clone().unwrap();
        assert_eq!(stack.axis, Axis::Vertical);
        assert_eq!(stack.primary_sizing, SizingMode::Hug);
        assert_eq!(stack.counter_sizing, SizingMode::Fixed);
        assert!((stack.spacing - 8.0).abs() < 0.001);
        assert_eq!(stack.padding, Padding::uniform(4.0));
        assert_eq!(stack.primary_alignment, Alignment::SpaceBetween);

        let text = tree.next_id();
        tree.add_child(root, LayerNode::new(text, LayerKind::Text));
        assert_eq!(tree.set_axis(text, Axis::Vertical), Err(RebuildError::NotAContainer { node: text }));
    }

    #[test]
    fn test_resize_validates() {
        let (mut tree, root) = tree_with_frame();
        tree.resize(root, 120.0, 0.0).unwrap();
        assert!((tree.get(root).unwrap().bounds.width - 120.0).abs() < 0.001);
        assert!(matches!(
            tree.resize(root, f64::NAN, 10.0),
            Err(RebuildError::InvalidSize { .. })
        ));
        assert!(tree.resize(root, -1.0, 10.0).is_err());
    }

    #[test]
    fn test_tree_serializes() {
        let (mut tree, root) = tree_with_frame();
        tree.set_axis(root, Axis::Horizontal).unwrap();
        let json = serde_json::to_string(&tree).unwrap();
        let back: LayerTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.get(root), tree.get(root));
    }
}
