//! Heap-indexed immutable BSP tree storage.

use crate::dimension::Dimension;
use crate::surface::{Surface, SurfacePayload};

/// The index of the front child of the node at `index`.
#[inline]
pub fn front_child_index(index: usize) -> usize {
    (index << 1) + 1
}

/// The index of the back child of the node at `index`.
#[inline]
pub fn back_child_index(index: usize) -> usize {
    (index + 1) << 1
}

/// The tree depth of the node at `index`; the root is at depth zero.
#[inline]
pub fn node_depth(index: usize) -> usize {
    (usize::BITS - (index + 1).leading_zeros() - 1) as usize
}

#[derive(Debug, Clone, PartialEq)]
enum Node<D: Dimension, P: SurfacePayload> {
    Branch(D::Plane),
    Leaf(Vec<Surface<D, P>>),
}

/// An immutable binary space partitioning tree.
///
/// Nodes are addressed by heap index: the root is node `0`, and the front
/// and back children of node `i` are nodes `2i + 1` and `2i + 2`. A branch
/// holds only its partition plane; a leaf holds only its surfaces, which
/// are mutually convex. Once built, a tree is never mutated; culling
/// produces a new tree.
#[derive(Debug, Clone, PartialEq)]
pub struct BspTree<D: Dimension, P: SurfacePayload = ()> {
    nodes: Vec<Option<Node<D, P>>>,
    node_count: usize,
}

impl<D: Dimension, P: SurfacePayload> BspTree<D, P> {
    pub(crate) fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            node_count: 0,
        }
    }

    pub(crate) fn add_branch(&mut self, index: usize, plane: D::Plane) {
        self.set(index, Node::Branch(plane));
    }

    pub(crate) fn add_leaf(&mut self, index: usize, surfaces: Vec<Surface<D, P>>) {
        self.set(index, Node::Leaf(surfaces));
    }

    fn set(&mut self, index: usize, node: Node<D, P>) {
        if self.nodes.len() <= index {
            self.nodes.resize_with(index + 1, || None);
        }
        debug_assert!(self.nodes[index].is_none(), "node added twice");
        self.nodes[index] = Some(node);
        self.node_count += 1;
    }

    fn node(&self, index: usize) -> &Node<D, P> {
        self.nodes
            .get(index)
            .and_then(Option::as_ref)
            .unwrap_or_else(|| panic!("no node at index {index}"))
    }

    /// The number of nodes in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Whether the node at `index` is a leaf.
    ///
    /// # Panics
    ///
    /// Panics if there is no node at `index`.
    pub fn is_leaf(&self, index: usize) -> bool {
        matches!(self.node(index), Node::Leaf(_))
    }

    /// The partition plane of the branch at `index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no node at `index`, or the node is a leaf.
    pub fn partition_plane(&self, index: usize) -> &D::Plane {
        match self.node(index) {
            Node::Branch(plane) => plane,
            Node::Leaf(_) => panic!("node {index} is a leaf, not a branch"),
        }
    }

    /// The surfaces of the leaf at `index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no node at `index`, or the node is a branch.
    pub fn surfaces(&self, index: usize) -> &[Surface<D, P>] {
        match self.node(index) {
            Node::Leaf(surfaces) => surfaces,
            Node::Branch(_) => panic!("node {index} is a branch, not a leaf"),
        }
    }

    /// The number of surfaces of the leaf at `index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no node at `index`, or the node is a branch.
    pub fn surface_count(&self, index: usize) -> usize {
        self.surfaces(index).len()
    }

    /// The indices of the leaves of the tree.
    pub fn leaf_indices(&self) -> Vec<usize> {
        let mut result = Vec::new();
        self.pre_order_traverse(|index| {
            if self.is_leaf(index) {
                result.push(index);
            }
        });
        result
    }

    /// Visits every node, parents before children.
    pub fn pre_order_traverse(&self, mut callback: impl FnMut(usize)) {
        self.pre_order_from(0, &mut callback);
    }

    fn pre_order_from(&self, index: usize, callback: &mut impl FnMut(usize)) {
        callback(index);
        if !self.is_leaf(index) {
            self.pre_order_from(front_child_index(index), callback);
            self.pre_order_from(back_child_index(index), callback);
        }
    }

    /// Visits every node, each branch between its front and back subtrees.
    pub fn in_order_traverse(&self, mut callback: impl FnMut(usize)) {
        self.in_order_from(0, &mut callback);
    }

    fn in_order_from(&self, index: usize, callback: &mut impl FnMut(usize)) {
        if self.is_leaf(index) {
            callback(index);
        } else {
            self.in_order_from(front_child_index(index), callback);
            callback(index);
            self.in_order_from(back_child_index(index), callback);
        }
    }

    /// Visits every node, children before parents.
    pub fn post_order_traverse(&self, mut callback: impl FnMut(usize)) {
        self.post_order_from(0, &mut callback);
    }

    fn post_order_from(&self, index: usize, callback: &mut impl FnMut(usize)) {
        if !self.is_leaf(index) {
            self.post_order_from(front_child_index(index), callback);
            self.post_order_from(back_child_index(index), callback);
        }
        callback(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimension::Dim2;
    use crate::facet::Facet2D;
    use crate::material::Material;
    use crate::plane::Hyperplane2D;
    use crate::point::Point2D;
    use crate::rational::rat;

    fn leaf_surface(y: i64) -> Surface<Dim2> {
        let plane = Hyperplane2D::new(rat(0), rat(1), rat(-y));
        let facet = Facet2D::new(
            plane,
            Point2D::new(rat(0), rat(y)),
            Point2D::new(rat(1), rat(y)),
        );
        Surface::new(facet, Material::Air, Material::Solid, ())
    }

    /// Branch at the root with two single-surface leaves.
    fn two_leaf_tree() -> BspTree<Dim2> {
        let mut tree = BspTree::empty();
        tree.add_branch(0, Hyperplane2D::new(rat(0), rat(1), rat(0)));
        tree.add_leaf(1, vec![leaf_surface(1)]);
        tree.add_leaf(2, vec![leaf_surface(-1)]);
        tree
    }

    #[test]
    fn heap_indexing() {
        assert_eq!(front_child_index(0), 1);
        assert_eq!(back_child_index(0), 2);
        assert_eq!(front_child_index(2), 5);
        assert_eq!(back_child_index(2), 6);
        assert_eq!(node_depth(0), 0);
        assert_eq!(node_depth(1), 1);
        assert_eq!(node_depth(2), 1);
        assert_eq!(node_depth(6), 2);
    }

    #[test]
    fn structural_accessors() {
        let tree = two_leaf_tree();
        assert_eq!(tree.node_count(), 3);
        assert!(!tree.is_leaf(0));
        assert!(tree.is_leaf(1));
        assert!(tree.is_leaf(2));
        assert_eq!(tree.surface_count(1), 1);
        assert_eq!(tree.leaf_indices(), vec![1, 2]);
    }

    #[test]
    #[should_panic(expected = "not a branch")]
    fn plane_of_leaf_panics() {
        two_leaf_tree().partition_plane(1);
    }

    #[test]
    #[should_panic(expected = "not a leaf")]
    fn surfaces_of_branch_panics() {
        two_leaf_tree().surfaces(0);
    }

    #[test]
    #[should_panic(expected = "no node at index")]
    fn absent_node_panics() {
        two_leaf_tree().is_leaf(5);
    }

    #[test]
    fn traversal_orders() {
        let tree = two_leaf_tree();

        let mut pre = Vec::new();
        tree.pre_order_traverse(|i| pre.push(i));
        assert_eq!(pre, vec![0, 1, 2]);

        let mut in_order = Vec::new();
        tree.in_order_traverse(|i| in_order.push(i));
        assert_eq!(in_order, vec![1, 0, 2]);

        let mut post = Vec::new();
        tree.post_order_traverse(|i| post.push(i));
        assert_eq!(post, vec![1, 2, 0]);
    }
}
