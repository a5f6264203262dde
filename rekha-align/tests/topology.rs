//! Region topology integration tests.

mod common;

use rekha_align::topology::{HOLE_LABEL, SOLID_LABEL};
use rekha_align::{EditCosts, Outline, Point2D, RegionOutline, RegionTree, tree_edit_distance};

const TOLERANCE: f64 = 0.25;

fn build(outlines: &[RegionOutline]) -> RegionTree {
    RegionTree::from_outlines(outlines, TOLERANCE).expect("non-empty region")
}

#[test]
fn test_nested_levels() {
    let tree = build(&common::nested_region());
    // outer solid, hole, island, disc
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.solid_count(), 3);
    assert_eq!(tree.hole_count(), 1);
    assert_eq!(tree.depth(), 3);
    assert_eq!(tree.children(RegionTree::ROOT).len(), 2);

    for id in tree.bfs().into_iter().skip(1) {
        let level = tree.level(id).unwrap();
        let parent = tree.container(id).unwrap();
        assert_eq!(level, tree.level(parent).unwrap() + 1);
        let expected = if level % 2 == 0 { HOLE_LABEL } else { SOLID_LABEL };
        assert_eq!(tree.label(id), Some(expected));
        assert_eq!(tree.is_hole(id), level % 2 == 0);
    }
}

#[test]
fn test_post_order_numbers() {
    let tree = build(&common::nested_region());
    let order = tree.post_order();
    assert_eq!(order.len(), tree.len());
    assert_eq!(*order.last().unwrap(), RegionTree::ROOT);
    for (k, id) in order.iter().enumerate() {
        assert_eq!(tree.node(*id).unwrap().traversal_order(), k + 1);
        for child in tree.children(*id) {
            let child_order = tree.node(*child).unwrap().traversal_order();
            assert!(child_order < k + 1);
        }
    }
}

#[test]
fn test_overlapping_solids_merge() {
    let outlines = [
        RegionOutline::solid(Outline::rectangle(100.0, 100.0, 200.0, 200.0)),
        RegionOutline::solid(Outline::circle(Point2D::new(300.0, 200.0), 80.0)),
    ];
    let tree = build(&outlines);
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.solid_count(), 1);
}

#[test]
fn test_distance_to_self_is_zero() {
    let costs = EditCosts::default();
    for outlines in [common::nested_region(), common::l_shape(), common::rectangle(0.0, 0.0, 5.0, 5.0)] {
        let tree = build(&outlines);
        assert_eq!(tree_edit_distance(&tree, &tree, &costs), 0);
    }
}

#[test]
fn test_distance_counts_missing_components() {
    let costs = EditCosts::default();
    let full = build(&common::nested_region());

    // Without the island
    let mut no_island = common::nested_region();
    no_island.remove(2);
    let no_island = build(&no_island);

    // Without the hole (the island then merges into the solid)
    let mut no_hole = common::nested_region();
    no_hole.remove(1);
    let no_hole = build(&no_hole);

    assert_eq!(tree_edit_distance(&full, &no_island, &costs), 1);
    assert_eq!(tree_edit_distance(&no_island, &full, &costs), 1);
    assert_eq!(tree_edit_distance(&full, &no_hole, &costs), 2);
    assert_eq!(tree_edit_distance(&no_hole, &full, &costs), 2);
}

#[test]
fn test_distance_ignores_geometry_and_order() {
    let a = build(&[
        RegionOutline::solid(Outline::rectangle(0.0, 0.0, 100.0, 100.0)),
        RegionOutline::solid(Outline::rectangle(300.0, 300.0, 50.0, 50.0)),
        RegionOutline::hole(Outline::rectangle(20.0, 20.0, 10.0, 10.0)),
    ]);
    let b = build(&[
        RegionOutline::solid(Outline::circle(Point2D::new(100.0, 100.0), 30.0)),
        RegionOutline::solid(Outline::rectangle(400.0, 100.0, 200.0, 200.0)),
        RegionOutline::hole(Outline::rectangle(450.0, 150.0, 20.0, 20.0)),
    ]);
    assert_eq!(tree_edit_distance(&a, &b, &EditCosts::default()), 0);
}
