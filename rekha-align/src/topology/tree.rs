//! Containment tree of region components.
//!
//! Nodes live in a flat arena. The synthetic unbounded root is always
//! [`RegionTree::ROOT`] at level 0; components follow in the order they were
//! decomposed from the region boundary.

use std::collections::VecDeque;

use log::info;
use serde::{Deserialize, Serialize};

use super::builder::{combine_outlines, decompose};
use crate::core::polygon::contains_polygon;
use crate::core::{Point2D, RegionOutline};
use crate::error::TopologyError;

/// Default label of the unbounded root.
pub const UNBOUNDED_LABEL: &str = "unbounded";
/// Default label of odd-level components.
pub const SOLID_LABEL: &str = "solid";
/// Default label of even-level components.
pub const HOLE_LABEL: &str = "hole";

/// Index of a node in a [`RegionTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// One closed component, or the unbounded root.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionNode {
    ring: Option<Vec<Point2D>>,
    level: usize,
    container: Option<NodeId>,
    children: Vec<NodeId>,
    label: String,
    traversal_order: usize,
}

impl RegionNode {
    /// Boundary ring, `None` for the root.
    pub fn ring(&self) -> Option<&[Point2D]> {
        self.ring.as_deref()
    }

    /// Nesting level: 0 for the root, odd for solids, even for holes.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Directly enclosing node, `None` for the root.
    pub fn container(&self) -> Option<NodeId> {
        self.container
    }

    /// Directly enclosed nodes, in component order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Label compared by the tree edit distance.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// 1-based post-order number.
    pub fn traversal_order(&self) -> usize {
        self.traversal_order
    }

    /// Whether this is a hole component. The root is not.
    pub fn is_hole(&self) -> bool {
        self.level > 0 && self.level % 2 == 0
    }
}

/// Containment tree of a region.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegionTree {
    nodes: Vec<RegionNode>,
}

impl Default for RegionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionTree {
    /// The unbounded root.
    pub const ROOT: NodeId = NodeId(0);

    /// Tree with only the unbounded root.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: vec![RegionNode {
                ring: None,
                level: 0,
                container: None,
                children: Vec::new(),
                label: UNBOUNDED_LABEL.to_string(),
                traversal_order: 0,
            }],
        };
        tree.assign_post_order_numbers();
        tree
    }

    /// Combine outlines into one region and build its containment tree.
    ///
    /// Returns [`TopologyError::EmptyRegion`] when nothing is left after
    /// the holes are cut.
    pub fn from_outlines(outlines: &[RegionOutline], tolerance: f64) -> Result<Self, TopologyError> {
        let boundary = combine_outlines(outlines, tolerance);
        let components = decompose(&boundary, tolerance)?;
        if components.is_empty() {
            return Err(TopologyError::EmptyRegion);
        }
        Ok(Self::from_components(components))
    }

    /// Build the tree from closed, non-crossing component rings.
    ///
    /// A component's level starts at 1 and grows by one for every other
    /// component that contains it. Its container is the innermost of
    /// those; components nobody contains hang off the root.
    pub fn from_components(components: Vec<Vec<Point2D>>) -> Self {
        let n = components.len();
        let mut levels = vec![1usize; n];
        let mut containers: Vec<Option<usize>> = vec![None; n];

        for i in 0..n {
            for j in 0..n {
                if i == j || !contains_polygon(&components[j], &components[i]) {
                    continue;
                }
                levels[i] += 1;
                let current = containers[i];
                match current {
                    None => containers[i] = Some(j),
                    Some(prev) if contains_polygon(&components[prev], &components[j]) => {
                        containers[i] = Some(j)
                    }
                    Some(_) => {}
                }
            }
        }

        let mut tree = Self::new();
        for (ring, level) in components.into_iter().zip(&levels) {
            let label = if level % 2 == 0 { HOLE_LABEL } else { SOLID_LABEL };
            tree.nodes.push(RegionNode {
                ring: Some(ring),
                level: *level,
                container: None,
                children: Vec::new(),
                label: label.to_string(),
                traversal_order: 0,
            });
        }
        for (i, container) in containers.iter().enumerate() {
            let child = NodeId(i + 1);
            let parent = container.map_or(Self::ROOT, |c| NodeId(c + 1));
            tree.nodes[child.0].container = Some(parent);
            tree.nodes[parent.0].children.push(child);
        }
        tree.assign_post_order_numbers();

        info!(
            "Built region tree: {} components, {} solids, {} holes, depth {}",
            n,
            tree.solid_count(),
            tree.hole_count(),
            tree.depth()
        );
        tree
    }

    /// Number of nodes including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no components (root only).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Node by id.
    pub fn node(&self, id: NodeId) -> Option<&RegionNode> {
        self.nodes.get(id.0)
    }

    /// All nodes, root first.
    pub fn nodes(&self) -> &[RegionNode] {
        &self.nodes
    }

    /// Level of a node.
    pub fn level(&self, id: NodeId) -> Option<usize> {
        self.node(id).map(RegionNode::level)
    }

    /// Whether a node is a hole component.
    pub fn is_hole(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(RegionNode::is_hole)
    }

    /// Container of a node.
    pub fn container(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(RegionNode::container)
    }

    /// Children of a node (empty for an unknown id).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(RegionNode::children).unwrap_or_default()
    }

    /// Label of a node.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(RegionNode::label)
    }

    /// Replace a node's label. Returns `false` for an unknown id.
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) => {
                node.label = label.into();
                true
            }
            None => false,
        }
    }

    /// Breadth-first order from the root.
    pub fn bfs(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut queue = VecDeque::from([Self::ROOT]);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(self.children(id).iter().copied());
        }
        order
    }

    /// Left-to-right post-order: children in list order, then the node.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.visit_post_order(Self::ROOT, &mut order);
        order
    }

    fn visit_post_order(&self, id: NodeId, order: &mut Vec<NodeId>) {
        for &child in self.children(id) {
            self.visit_post_order(child, order);
        }
        order.push(id);
    }

    /// Store 1-based post-order numbers in every node.
    pub fn assign_post_order_numbers(&mut self) {
        for (k, id) in self.post_order().into_iter().enumerate() {
            self.nodes[id.0].traversal_order = k + 1;
        }
    }

    /// Nodes without children.
    pub fn leaves(&self) -> Vec<NodeId> {
        (0..self.nodes.len())
            .map(NodeId)
            .filter(|id| self.children(*id).is_empty())
            .collect()
    }

    /// Deepest level in the tree.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(RegionNode::level).max().unwrap_or(0)
    }

    /// Number of hole components.
    pub fn hole_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_hole()).count()
    }

    /// Number of solid components.
    pub fn solid_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.level % 2 == 1).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Outline;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2D> {
        vec![
            Point2D::new(x, y),
            Point2D::new(x + size, y),
            Point2D::new(x + size, y + size),
            Point2D::new(x, y + size),
        ]
    }

    /// Nested squares plus one separate island:
    /// outer(0..100) ⊃ hole(10..90) ⊃ island(20..40), and far(200..210)
    fn nested() -> RegionTree {
        RegionTree::from_components(vec![
            square(20.0, 20.0, 20.0),
            square(0.0, 0.0, 100.0),
            square(200.0, 200.0, 10.0),
            square(10.0, 10.0, 80.0),
        ])
    }

    #[test]
    fn test_levels_and_containers() {
        let tree = nested();
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.level(NodeId(2)), Some(1));
        assert_eq!(tree.level(NodeId(4)), Some(2));
        assert_eq!(tree.level(NodeId(1)), Some(3));
        assert_eq!(tree.level(NodeId(3)), Some(1));
        assert_eq!(tree.container(NodeId(1)), Some(NodeId(4)));
        assert_eq!(tree.container(NodeId(4)), Some(NodeId(2)));
        assert_eq!(tree.container(NodeId(2)), Some(RegionTree::ROOT));
        assert_eq!(tree.children(RegionTree::ROOT), &[NodeId(2), NodeId(3)]);
        assert!(tree.is_hole(NodeId(4)));
        assert!(!tree.is_hole(RegionTree::ROOT));
        assert_eq!(tree.label(NodeId(4)), Some(HOLE_LABEL));
        assert_eq!(tree.hole_count(), 1);
        assert_eq!(tree.solid_count(), 3);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn test_child_level_is_parent_plus_one() {
        let tree = nested();
        for (i, node) in tree.nodes().iter().enumerate().skip(1) {
            let parent = tree.container(NodeId(i)).unwrap();
            assert_eq!(node.level(), tree.level(parent).unwrap() + 1);
        }
    }

    #[test]
    fn test_traversals() {
        let tree = nested();
        assert_eq!(
            tree.bfs(),
            vec![RegionTree::ROOT, NodeId(2), NodeId(3), NodeId(4), NodeId(1)]
        );
        assert_eq!(
            tree.post_order(),
            vec![NodeId(1), NodeId(4), NodeId(2), NodeId(3), RegionTree::ROOT]
        );
        assert_eq!(tree.node(NodeId(1)).unwrap().traversal_order(), 1);
        assert_eq!(tree.node(RegionTree::ROOT).unwrap().traversal_order(), 5);
        assert_eq!(tree.leaves(), vec![NodeId(1), NodeId(3)]);
    }

    #[test]
    fn test_from_outlines_with_hole() {
        let outlines = [
            RegionOutline::solid(Outline::rectangle(100.0, 100.0, 300.0, 300.0)),
            RegionOutline::hole(Outline::rectangle(150.0, 150.0, 100.0, 100.0)),
            RegionOutline::solid(Outline::rectangle(500.0, 100.0, 50.0, 50.0)),
        ];
        let tree = RegionTree::from_outlines(&outlines, 0.25).unwrap();
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.solid_count(), 2);
        assert_eq!(tree.hole_count(), 1);
        assert_eq!(tree.children(RegionTree::ROOT).len(), 2);
    }

    #[test]
    fn test_empty_region() {
        let outlines = [
            RegionOutline::solid(Outline::rectangle(0.0, 0.0, 10.0, 10.0)),
            RegionOutline::hole(Outline::rectangle(-5.0, -5.0, 20.0, 20.0)),
        ];
        assert!(matches!(
            RegionTree::from_outlines(&outlines, 0.25),
            Err(TopologyError::EmptyRegion)
        ));
        assert!(RegionTree::new().is_empty());
    }

    #[test]
    fn test_set_label() {
        let mut tree = nested();
        assert!(tree.set_label(NodeId(3), "island"));
        assert_eq!(tree.label(NodeId(3)), Some("island"));
        assert!(!tree.set_label(NodeId(99), "missing"));
    }
}
