//! 2-D K-D tree over (lon, lat) degrees
//!
//! The tree answers rectangle queries in degree space. Radius queries in
//! kilometers go through [`eps_box`] to get a rectangle that is guaranteed
//! to contain the whole eps circle, then the candidates are filtered with
//! the exact haversine distance.

use super::distance::{eps_box, haversine_km};
use super::point::{Point, PointList, inside};
use std::cmp::Ordering;

/// KD-Tree implementation for efficient spatial queries
///
/// Points are separated from nodes. Nodes hold only indices into the Points slice.
pub struct KDTree {
    /// All points in the tree
    pub points: PointList,
    /// Root node of the tree
    pub root: Option<Box<KDTreeNode>>,
}

/// A node in the K-D tree
pub struct KDTreeNode {
    /// Index of the point associated with this node
    pub point_id: usize,

    split: usize,
    left: Option<Box<KDTreeNode>>,
    right: Option<Box<KDTreeNode>>,
}

impl KDTree {
    /// Finds all points within `eps_km` (haversine, inclusive) of `pt`
    ///
    /// Indices are returned in ascending order so callers that walk them
    /// see the same order as a linear scan would produce.
    ///
    /// To avoid allocation, the `nodes` vector can be pre-allocated with a larger
    /// capacity and re-used across multiple calls.
    pub fn in_range(&self, pt: &Point, eps_km: f64, mut nodes: Vec<usize>) -> Vec<usize> {
        nodes.clear();
        if eps_km < 0.0 {
            return nodes;
        }

        match eps_box(pt, eps_km) {
            Some((min, max)) => self.in_box_recursive(self.root.as_deref(), &min, &max, &mut nodes),
            // Box wraps a pole or the antimeridian: scan everything
            None => nodes.extend(0..self.points.len()),
        }

        nodes.retain(|&i| haversine_km(&self.points[i], pt) <= eps_km);
        nodes.sort_unstable();
        nodes
    }

    /// Finds all points inside the (min, max) rectangle, edges included
    pub fn in_box(&self, min: &Point, max: &Point) -> Vec<usize> {
        let mut nodes = Vec::new();
        self.in_box_recursive(self.root.as_deref(), min, max, &mut nodes);
        nodes.sort_unstable();
        nodes
    }

    fn in_box_recursive(
        &self,
        t: Option<&KDTreeNode>,
        min: &Point,
        max: &Point,
        nodes: &mut Vec<usize>,
    ) {
        let t = match t {
            None => return,
            Some(t) => t,
        };

        let pivot = &self.points[t.point_id];
        if inside(pivot, min, max) {
            nodes.push(t.point_id);
        }

        // Left holds values <= pivot on the split axis, right holds values >= pivot
        if min.0[t.split] <= pivot.0[t.split] {
            self.in_box_recursive(t.left.as_deref(), min, max, nodes);
        }
        if max.0[t.split] >= pivot.0[t.split] {
            self.in_box_recursive(t.right.as_deref(), min, max, nodes);
        }
    }

    /// Returns the height of the K-D tree
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |r| r.height())
    }
}

impl KDTreeNode {
    fn height(&self) -> usize {
        let ht = self.left.as_ref().map_or(0, |l| l.height());
        let rht = self.right.as_ref().map_or(0, |r| r.height());
        ht.max(rht) + 1
    }
}

/// Creates a new K-D tree built from the given points
///
/// Points must be finite; validate them before building the tree.
pub fn new_kd_tree(points: PointList) -> KDTree {
    let mut ids: Vec<usize> = (0..points.len()).collect();
    let root = build_tree(&points, &mut ids, 0);
    KDTree { points, root }
}

/// Builds a subtree from `ids` by splitting at the median on the axis for `depth`
fn build_tree(points: &[Point], ids: &mut [usize], depth: usize) -> Option<Box<KDTreeNode>> {
    if ids.is_empty() {
        return None;
    }

    let split = depth % 2;
    // Ties on the split axis are broken by index so the tree shape is
    // fixed for a fixed input order
    ids.sort_unstable_by(|&a, &b| {
        points[a].0[split]
            .partial_cmp(&points[b].0[split])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });

    let m = ids.len() / 2;
    let point_id = ids[m];
    let (left, rest) = ids.split_at_mut(m);
    let right = &mut rest[1..];

    Some(Box::new(KDTreeNode {
        point_id,
        split,
        left: build_tree(points, left, depth + 1),
        right: build_tree(points, right, depth + 1),
    }))
}
