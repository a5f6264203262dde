//! Constrained edit distance between unordered labeled trees.
//!
//! Two `(n1 + 1) × (n2 + 1)` tables are filled in post-order: one for
//! subtree pairs and one for the forests of their children. Index 0 stands
//! for the empty tree. Child forests are matched with a minimum-cost
//! assignment, so child order never matters.

use serde::{Deserialize, Serialize};

use super::assignment::min_cost_assignment;
use super::tree::RegionTree;

/// Unit costs of the edit operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCosts {
    /// Cost of inserting a node.
    #[serde(default = "unit_cost")]
    pub insert: usize,
    /// Cost of deleting a node.
    #[serde(default = "unit_cost")]
    pub delete: usize,
    /// Cost of changing a node's label.
    #[serde(default = "unit_cost")]
    pub relabel: usize,
}

fn unit_cost() -> usize {
    1
}

impl Default for EditCosts {
    fn default() -> Self {
        Self {
            insert: 1,
            delete: 1,
            relabel: 1,
        }
    }
}

/// Tree flattened to post-order positions (1-based, 0 unused).
struct PostOrder<'a> {
    labels: Vec<&'a str>,
    children: Vec<Vec<usize>>,
}

impl<'a> PostOrder<'a> {
    fn new(tree: &'a RegionTree) -> Self {
        let order = tree.post_order();
        let mut position = vec![0usize; tree.len()];
        for (k, id) in order.iter().enumerate() {
            position[id.0] = k + 1;
        }

        let mut labels = vec![""];
        let mut children = vec![Vec::new()];
        for id in &order {
            labels.push(tree.label(*id).unwrap_or_default());
            children.push(tree.children(*id).iter().map(|c| position[c.0]).collect());
        }
        Self { labels, children }
    }

    fn len(&self) -> usize {
        self.labels.len() - 1
    }
}

/// Edit distance between two containment trees.
///
/// Zero for identical trees, and symmetric when insert and delete cost the
/// same.
pub fn tree_edit_distance(a: &RegionTree, b: &RegionTree, costs: &EditCosts) -> usize {
    let a = PostOrder::new(a);
    let b = PostOrder::new(b);
    let (n1, n2) = (a.len(), b.len());
    let (ins, del, rel) = (costs.insert as i64, costs.delete as i64, costs.relabel as i64);

    let mut tree = vec![vec![0i64; n2 + 1]; n1 + 1];
    let mut forest = vec![vec![0i64; n2 + 1]; n1 + 1];

    for i in 1..=n1 {
        forest[i][0] = a.children[i].iter().map(|&s| tree[s][0]).sum();
        tree[i][0] = forest[i][0] + del;
    }
    for j in 1..=n2 {
        forest[0][j] = b.children[j].iter().map(|&t| tree[0][t]).sum();
        tree[0][j] = forest[0][j] + ins;
    }

    for i in 1..=n1 {
        let ci = &a.children[i];
        for j in 1..=n2 {
            let cj = &b.children[j];

            // Forest of i's children against forest of j's children
            let mut f = match_forests(ci, cj, &tree);
            if let Some(best) = cj.iter().map(|&t| forest[i][t] - forest[0][t]).min() {
                f = f.min(forest[0][j] + best);
            }
            if let Some(best) = ci.iter().map(|&s| forest[s][j] - forest[s][0]).min() {
                f = f.min(forest[i][0] + best);
            }
            forest[i][j] = f;

            let relabel = if a.labels[i] == b.labels[j] { 0 } else { rel };
            let mut t = f + relabel;
            // j inserted above a subtree that takes all of i
            if let Some(best) = cj.iter().map(|&c| tree[i][c] - tree[0][c]).min() {
                t = t.min(tree[0][j] + best);
            }
            // i deleted, one of its subtrees takes all of j
            if let Some(best) = ci.iter().map(|&c| tree[c][j] - tree[c][0]).min() {
                t = t.min(tree[i][0] + best);
            }
            tree[i][j] = t;
        }
    }

    tree[n1][n2].max(0) as usize
}

/// Cheapest one-to-one mapping between two child lists, unmatched subtrees
/// deleted or inserted whole.
fn match_forests(ci: &[usize], cj: &[usize], tree: &[Vec<i64>]) -> i64 {
    let delete_all: i64 = ci.iter().map(|&s| tree[s][0]).sum();
    let insert_all: i64 = cj.iter().map(|&t| tree[0][t]).sum();
    if ci.is_empty() || cj.is_empty() {
        return delete_all + insert_all;
    }

    // Rows: children of i, then one dummy per child of j.
    // Columns: children of j, then one dummy per child of i.
    let (m, n) = (ci.len(), cj.len());
    let forbidden = delete_all + insert_all + 1;
    let mut cost = vec![vec![0i64; m + n]; m + n];
    for (r, &s) in ci.iter().enumerate() {
        for (c, &t) in cj.iter().enumerate() {
            cost[r][c] = tree[s][t];
        }
        for d in 0..m {
            cost[r][n + d] = if d == r { tree[s][0] } else { forbidden };
        }
    }
    for (d, row) in cost.iter_mut().skip(m).enumerate() {
        for (c, &t) in cj.iter().enumerate() {
            row[c] = if d == c { tree[0][t] } else { forbidden };
        }
    }

    min_cost_assignment(&cost).0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point2D;
    use crate::topology::NodeId;

    fn square(x: f64, y: f64, size: f64) -> Vec<Point2D> {
        vec![
            Point2D::new(x, y),
            Point2D::new(x + size, y),
            Point2D::new(x + size, y + size),
            Point2D::new(x, y + size),
        ]
    }

    fn tree(components: Vec<Vec<Point2D>>) -> RegionTree {
        RegionTree::from_components(components)
    }

    #[test]
    fn test_identity_is_zero() {
        let t = tree(vec![
            square(0.0, 0.0, 100.0),
            square(10.0, 10.0, 80.0),
            square(20.0, 20.0, 20.0),
            square(60.0, 60.0, 20.0),
            square(300.0, 300.0, 10.0),
        ]);
        assert_eq!(tree_edit_distance(&t, &t, &EditCosts::default()), 0);
        assert_eq!(tree_edit_distance(&RegionTree::new(), &RegionTree::new(), &EditCosts::default()), 0);
    }

    #[test]
    fn test_single_insertion() {
        let one = tree(vec![square(0.0, 0.0, 10.0)]);
        let two = tree(vec![square(0.0, 0.0, 10.0), square(50.0, 50.0, 10.0)]);
        let costs = EditCosts::default();
        assert_eq!(tree_edit_distance(&RegionTree::new(), &one, &costs), 1);
        assert_eq!(tree_edit_distance(&one, &two, &costs), 1);
        assert_eq!(tree_edit_distance(&two, &one, &costs), 1);
    }

    #[test]
    fn test_child_order_is_ignored() {
        // solid with a hole, plus a plain solid, listed in both orders
        let a = tree(vec![
            square(0.0, 0.0, 100.0),
            square(10.0, 10.0, 20.0),
            square(200.0, 0.0, 50.0),
        ]);
        let b = tree(vec![
            square(200.0, 0.0, 50.0),
            square(0.0, 0.0, 100.0),
            square(10.0, 10.0, 20.0),
        ]);
        assert_eq!(tree_edit_distance(&a, &b, &EditCosts::default()), 0);
    }

    #[test]
    fn test_relabel_is_cheaper_than_replace() {
        let a = tree(vec![square(0.0, 0.0, 10.0)]);
        let mut b = a.clone();
        b.set_label(NodeId(1), "marked");
        assert_eq!(tree_edit_distance(&a, &b, &EditCosts::default()), 1);

        let costly = EditCosts {
            relabel: 5,
            ..EditCosts::default()
        };
        assert_eq!(tree_edit_distance(&a, &b, &costly), 2);
    }

    #[test]
    fn test_nesting_depth_difference() {
        // solid, solid ⊃ hole, solid ⊃ hole ⊃ solid
        let flat = tree(vec![square(0.0, 0.0, 100.0)]);
        let holed = tree(vec![square(0.0, 0.0, 100.0), square(10.0, 10.0, 80.0)]);
        let island = tree(vec![
            square(0.0, 0.0, 100.0),
            square(10.0, 10.0, 80.0),
            square(20.0, 20.0, 10.0),
        ]);
        let costs = EditCosts::default();
        assert_eq!(tree_edit_distance(&flat, &holed, &costs), 1);
        assert_eq!(tree_edit_distance(&holed, &island, &costs), 1);
        assert_eq!(tree_edit_distance(&flat, &island, &costs), 2);
        assert_eq!(tree_edit_distance(&island, &flat, &costs), 2);
    }
}
