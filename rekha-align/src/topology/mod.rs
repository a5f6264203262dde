//! Region topology: containment tree and tree edit distance.
//!
//! ```text
//! [RegionOutline] ──combine_outlines──► Outline ──decompose──► rings
//!                                                                │
//!                                     RegionTree::from_components ◄┘
//!                                                                │
//!                                 tree_edit_distance(a, b) ◄─────┘
//! ```

mod assignment;
mod builder;
mod edit_distance;
mod tree;

pub use builder::{combine_outlines, decompose};
pub use edit_distance::{EditCosts, tree_edit_distance};
pub use tree::{HOLE_LABEL, NodeId, RegionNode, RegionTree, SOLID_LABEL, UNBOUNDED_LABEL};
