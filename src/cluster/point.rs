//! Geographic points and hotspot clusters

use crate::error::AnalysisError;

/// Point represents a geographic coordinate (longitude, latitude) in degrees
///
/// The point is stored as [longitude, latitude] where:
/// - `[0]` is longitude, true signed value in `[-180, 180]`
/// - `[1]` is latitude in `[-90, 90]`
///
/// Longitude is never negated on the way in or out: west is negative,
/// east is positive, in storage and in every computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub [f64; 2]);

/// PointList is a collection of Points
pub type PointList = Vec<Point>;

impl Point {
    /// Builds a point from latitude and longitude without range checks
    pub fn new(lat: f64, lon: f64) -> Point {
        Point([lon, lat])
    }

    /// Builds a point, rejecting non-finite or out of range coordinates
    pub fn checked(lat: f64, lon: f64) -> Result<Point, AnalysisError> {
        let p = Point::new(lat, lon);
        if p.is_valid() {
            Ok(p)
        } else {
            Err(AnalysisError::InvalidCoordinate { lat, lon })
        }
    }

    pub fn lat(&self) -> f64 {
        self.0[1]
    }

    pub fn lon(&self) -> f64 {
        self.0[0]
    }

    /// True when both components are finite and inside the degree ranges
    pub fn is_valid(&self) -> bool {
        self.lat().is_finite()
            && self.lon().is_finite()
            && (-90.0..=90.0).contains(&self.lat())
            && (-180.0..=180.0).contains(&self.lon())
    }

    /// Checks if this point is less than or equal to another point
    /// (a <= b) on both axes
    pub fn less_eq(&self, b: &Point) -> bool {
        self.0[0] <= b.0[0] && self.0[1] <= b.0[1]
    }

    /// Checks if this point is greater than or equal to another point
    /// (a >= b) on both axes
    pub fn greater_eq(&self, b: &Point) -> bool {
        self.0[0] >= b.0[0] && self.0[1] >= b.0[1]
    }
}

/// Checks if `p` lies inside the (min, max) rectangle, edges included
pub fn inside(p: &Point, min: &Point, max: &Point) -> bool {
    p.greater_eq(min) && p.less_eq(max)
}

/// Label reserved for points that belong to no cluster
pub const NOISE_LABEL: i32 = -1;

/// Raw DBSCAN output: a cluster id and the indices of its points
#[derive(Debug, Clone)]
pub struct Cluster {
    /// Cluster ID
    pub c: usize,
    /// Indices of points belonging to this cluster
    pub points: Vec<usize>,
}

impl Cluster {
    /// Arithmetic mean of the member coordinates
    ///
    /// Plain averaging of degrees; good enough at city scale, not a
    /// spherical centroid.
    ///
    /// # Panics
    ///
    /// Panics if the cluster is empty
    pub fn centroid(&self, points: &[Point]) -> Point {
        if self.points.is_empty() {
            panic!("empty cluster");
        }

        let mut center = Point([0.0, 0.0]);
        for &i in &self.points {
            for j in 0..2 {
                center.0[j] += points[i].0[j];
            }
        }
        for j in 0..2 {
            center.0[j] /= self.points.len() as f64;
        }

        center
    }
}

/// A hotspot: one non-noise cluster of reports with its centroid and extent
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    /// Cluster label, unique within one clustering run; never [`NOISE_LABEL`]
    /// for hotspots produced by [`crate::cluster::cluster`]
    pub label: i32,
    /// Indices of the member reports in the input slice
    pub members: Vec<usize>,
    /// Mean coordinate of the members
    pub centroid: Point,
    /// Largest member-to-centroid distance in km, capped at the configured ceiling
    pub radius_km: f64,
}

impl Hotspot {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_noise(&self) -> bool {
        self.label == NOISE_LABEL
    }
}

/// Anything that carries a geographic position
pub trait Located {
    fn location(&self) -> Point;
}

impl Located for Point {
    fn location(&self) -> Point {
        *self
    }
}
