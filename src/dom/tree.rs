//! Tree operations: insert, attach, walk.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{Element, NodeId};

const NO_CHILDREN: &[NodeId] = &[];

/// The element tree, backed by a slotmap arena.
///
/// Elements live in one `SlotMap`; child lists and parent links sit in
/// secondary maps keyed by the same ids. The tree always has a synthetic root covering the whole
/// viewport; parsed elements hang below it.
#[derive(Debug)]
pub struct ElementTree {
    nodes: SlotMap<NodeId, Element>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    root: NodeId,
}

impl ElementTree {
    /// Create a tree holding only `root`.
    pub fn new(root: Element) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(root);
        let mut children = SecondaryMap::new();
        children.insert(root, Vec::new());
        Self { nodes, children, parent: SecondaryMap::new(), root }
    }

    /// Insert a node without a parent. Attach it later with
    /// [`append_child`](Self::append_child).
    pub fn insert_detached(&mut self, element: Element) -> NodeId {
        let id = self.nodes.insert(element);
        self.children.insert(id, Vec::new());
        id
    }

    /// Insert a node as the last child of `parent`.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn insert_child(&mut self, parent: NodeId, element: Element) -> Option<NodeId> {
        if !self.nodes.contains_key(parent) {
            return None;
        }
        let id = self.insert_detached(element);
        self.append_child(parent, id);
        Some(id)
    }

    /// Attach a detached `child` as the last child of `parent`.
    ///
    /// No-op if either node is missing, `child` is the root, or `child`
    /// already has a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if child == self.root
            || self.parent.contains_key(child)
            || !self.nodes.contains_key(child)
        {
            return;
        }
        let Some(siblings) = self.children.get_mut(parent) else {
            return;
        };
        siblings.push(child);
        self.parent.insert(child, parent);
    }

    /// Parent of `id`; `None` for the root and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(NO_CHILDREN)
    }

    /// Immutable access to a node.
    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id)
    }

    /// The synthetic root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the root has no children.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// Whether the tree contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    ///
    /// This is the order elements appear in the source, which is also the
    /// order they are laid out and painted in.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut pending = vec![start];
        while let Some(id) = pending.pop() {
            if self.contains(id) {
                order.push(id);
                pending.extend(self.children(id).iter().rev());
            }
        }
        order
    }
}
