//! KD-tree over mesh triangles.
//!
//! The tree only prunes: a query returns every triangle a ray could hit,
//! plus some it cannot. Triangles straddling a split plane are stored on
//! both sides, so a triangle is never lost from either half.

use std::collections::BTreeSet;

use isotrace_math::{Axis, Ray};

use crate::mesh::Triangle;

/// Maximum triangles per leaf node before splitting.
pub const LEAF_MAX_SIZE: usize = 32;

/// Consecutive splits that keep a child as large as its parent before the
/// builder gives up. After a full cycle the same set would be split on the
/// same axis again.
const MAX_STALLED_SPLITS: u8 = 3;

/// KD-tree node - either a split with two children or a leaf with
/// triangle indices.
#[derive(Debug, Clone, PartialEq)]
pub enum KdTree {
    /// Internal node splitting space at `pivot` along `axis`.
    ///
    /// `left` holds every triangle with a vertex at or below the pivot,
    /// `right` every triangle with a vertex at or above it.
    Node {
        axis: Axis,
        pivot: f64,
        left: Box<KdTree>,
        right: Box<KdTree>,
    },
    /// Leaf node with indices into the mesh's triangle sequence.
    Leaf { indices: Vec<usize> },
}

/// Shape summary of a built tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KdTreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub max_depth: usize,
    /// Sum of leaf sizes. Exceeds the triangle count when triangles
    /// straddle split planes.
    pub leaf_entries: usize,
}

impl KdTree {
    /// Build a tree over all triangles, starting with an X split.
    pub fn build(triangles: &[Triangle]) -> Self {
        let indices = (0..triangles.len()).collect();
        let tree = Self::build_node(triangles, indices, Axis::X, 0);

        let stats = tree.stats();
        log::debug!(
            "Built KD-tree over {} triangles: {} nodes, {} leaves, depth {}, {} leaf entries",
            triangles.len(),
            stats.nodes,
            stats.leaves,
            stats.max_depth,
            stats.leaf_entries
        );
        tree
    }

    /// Recursive median split.
    fn build_node(
        triangles: &[Triangle],
        indices: Vec<usize>,
        axis: Axis,
        stalled: u8,
    ) -> Self {
        let n = indices.len();
        if n <= LEAF_MAX_SIZE {
            return KdTree::Leaf { indices };
        }
        if stalled >= MAX_STALLED_SPLITS {
            log::trace!("Split on {} stalled, keeping {} triangles in one leaf", axis, n);
            return KdTree::Leaf { indices };
        }

        let mut coords: Vec<f64> = indices
            .iter()
            .flat_map(|&i| triangles[i].vertices.map(|p| axis.of(p)))
            .collect();
        coords.sort_unstable_by(f64::total_cmp);
        let pivot = coords[coords.len() / 2];

        let mut left = Vec::new();
        let mut right = Vec::new();
        for &i in &indices {
            let vertices = &triangles[i].vertices;
            if vertices.iter().any(|&p| axis.of(p) <= pivot) {
                left.push(i);
            }
            if vertices.iter().any(|&p| axis.of(p) >= pivot) {
                right.push(i);
            }
        }

        // No discriminating progress
        if left.len() == right.len() {
            return KdTree::Leaf { indices };
        }

        let next = axis.next();
        let stall = |child: &Vec<usize>| if child.len() == n { stalled + 1 } else { 0 };
        let (left_stall, right_stall) = (stall(&left), stall(&right));

        KdTree::Node {
            axis,
            pivot,
            left: Box::new(Self::build_node(triangles, left, next, left_stall)),
            right: Box::new(Self::build_node(triangles, right, next, right_stall)),
        }
    }

    /// Indices of all triangles the ray could intersect, deduplicated and
    /// in ascending order.
    pub fn candidates(&self, ray: &Ray) -> BTreeSet<usize> {
        let mut found = BTreeSet::new();
        self.collect_candidates(ray, &mut found);
        found
    }

    /// Add the candidates for `ray` to `found`.
    pub fn collect_candidates(&self, ray: &Ray, found: &mut BTreeSet<usize>) {
        match self {
            KdTree::Leaf { indices } => found.extend(indices.iter().copied()),

            KdTree::Node {
                axis,
                pivot,
                left,
                right,
            } => {
                let delta = pivot - ray.origin_on(*axis);
                let direction = ray.direction_on(*axis);

                if delta > 0.0 && direction <= 0.0 {
                    // below the plane and not moving up
                    left.collect_candidates(ray, found);
                } else if delta < 0.0 && direction >= 0.0 {
                    right.collect_candidates(ray, found);
                } else {
                    left.collect_candidates(ray, found);
                    right.collect_candidates(ray, found);
                }
            }
        }
    }

    pub fn stats(&self) -> KdTreeStats {
        match self {
            KdTree::Leaf { indices } => KdTreeStats {
                nodes: 1,
                leaves: 1,
                max_depth: 0,
                leaf_entries: indices.len(),
            },
            KdTree::Node { left, right, .. } => {
                let l = left.stats();
                let r = right.stats();
                KdTreeStats {
                    nodes: 1 + l.nodes + r.nodes,
                    leaves: l.leaves + r.leaves,
                    max_depth: 1 + l.max_depth.max(r.max_depth),
                    leaf_entries: l.leaf_entries + r.leaf_entries,
                }
            }
        }
    }
}
