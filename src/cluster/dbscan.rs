use super::distance::haversine_km;
use super::kdtree::new_kd_tree;
use super::point::{Cluster, Point};
use bitvec::prelude::*;

// DBSCAN algorithm pseudocode (from <http://en.wikipedia.org/wiki/DBSCAN>):
//
// DBSCAN(D, eps, MinPts)
//    C = 0
//    for each unvisited point P in dataset D
//       mark P as visited
//       NeighborPts = regionQuery(P, eps)
//       if sizeof(NeighborPts) < MinPts
//          mark P as NOISE
//       else
//          C = next cluster
//          expandCluster(P, NeighborPts, C, eps, MinPts)
//
// expandCluster(P, NeighborPts, C, eps, MinPts)
//    add P to cluster C
//    for each point P' in NeighborPts
//       if P' is not visited
//          mark P' as visited
//          NeighborPts' = regionQuery(P', eps)
//          if sizeof(NeighborPts') >= MinPts
//             NeighborPts = NeighborPts joined with NeighborPts'
//       if P' is not yet member of any cluster
//          add P' to cluster C
//
// regionQuery(P, eps)
//    return all points within P's eps-neighborhood (including P)
//
// A point marked NOISE early may still be picked up later as a border
// point of some cluster, so the noise list is built only after the scan.

/// Clusters incoming points using DBSCAN algorithm with haversine distance
///
/// # Arguments
///
/// * `points` - List of valid points to cluster
/// * `eps_km` - Clustering radius in kilometers; two points are neighbours
///   when their haversine distance is `<= eps_km`
/// * `min_points` - Minimum number of points in eps-neighbourhood, the point
///   itself included (density threshold)
///
/// # Returns
///
/// A tuple `(clusters, noise)` where:
/// - `clusters` is a vector of found clusters, numbered from 0 in discovery order
/// - `noise` is a vector of point indices that are outliers (not in any cluster)
///
/// Membership is deterministic for a fixed input order: points are seeded in
/// index order and neighbour lists are walked in ascending index order.
pub fn db_scan(points: &[Point], eps_km: f64, min_points: usize) -> (Vec<Cluster>, Vec<usize>) {
    let mut visited = bitvec![0; points.len()];
    let mut members = bitvec![0; points.len()];
    let mut clusters = Vec::new();
    let mut c = 0;
    let kd_tree = new_kd_tree(points.to_vec());

    let mut neighbor_unique = bitvec![0; points.len()];

    for i in 0..points.len() {
        if visited[i] {
            continue;
        }
        visited.set(i, true);

        let neighbor_pts = kd_tree.in_range(&points[i], eps_km, Vec::new());
        if neighbor_pts.len() < min_points {
            continue;
        }

        let mut cluster = Cluster { c, points: vec![i] };
        members.set(i, true);
        c += 1;

        neighbor_unique.fill(false);
        for &j in &neighbor_pts {
            neighbor_unique.set(j, true);
        }

        let mut neighbor_pts = neighbor_pts;
        let mut more_neighbors = Vec::new();
        let mut j = 0;
        // neighbor_pts grows while it is walked
        while j < neighbor_pts.len() {
            let k = neighbor_pts[j];
            if !visited[k] {
                visited.set(k, true);
                more_neighbors = kd_tree.in_range(&points[k], eps_km, more_neighbors);
                if more_neighbors.len() >= min_points {
                    for &p in &more_neighbors {
                        if !neighbor_unique[p] {
                            neighbor_pts.push(p);
                            neighbor_unique.set(p, true);
                        }
                    }
                }
            }

            if !members[k] {
                cluster.points.push(k);
                members.set(k, true);
            }
            j += 1;
        }
        clusters.push(cluster);
    }

    let noise = members.iter_zeros().collect();
    (clusters, noise)
}

/// Simple O(N) way to find points in neighbourhood
///
/// Same result as `kd_tree.in_range(p, eps_km, vec![])`
pub fn region_query(points: &[Point], p: &Point, eps_km: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, point)| haversine_km(point, p) <= eps_km)
        .map(|(i, _)| i)
        .collect()
}
