//! Package cluster implements DBScan hotspot detection on (lat, lon) using K-D Tree
pub mod dbscan;
pub mod distance;
pub mod hotspot;
pub mod kdtree;
pub mod point;


pub use dbscan::{db_scan, region_query};
pub use distance::{DEGREE_RAD, EARTH_R, eps_box, haversine_km};
pub use hotspot::{
    Clustering, DEFAULT_EPSILON_KM, DEFAULT_MAX_RADIUS_KM, DEFAULT_MIN_SAMPLES, HotspotParams,
    RejectedReport, cluster,
};
pub use kdtree::{KDTree, new_kd_tree};
pub use point::{Cluster, Hotspot, Located, NOISE_LABEL, Point, PointList};
