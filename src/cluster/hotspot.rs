//! Hotspot detection over a snapshot of reports
//!
//! Every call re-clusters the whole input; nothing is cached between calls.

use super::dbscan::db_scan;
use super::distance::{DEGREE_RAD, EARTH_R, haversine_km};
use super::point::{Hotspot, Located, NOISE_LABEL, Point};
use crate::error::AnalysisError;

/// Default DBSCAN radius: 0.0005 degrees of arc, about 55.6 m
pub const DEFAULT_EPSILON_KM: f64 = 0.0005 * DEGREE_RAD * EARTH_R;

/// Default density threshold, the point itself included
pub const DEFAULT_MIN_SAMPLES: usize = 5;

/// Default ceiling for a hotspot radius
pub const DEFAULT_MAX_RADIUS_KM: f64 = 5.0;

/// Tuning knobs for hotspot detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotspotParams {
    /// Neighbourhood radius in kilometers (haversine, inclusive)
    pub epsilon_km: f64,
    /// Minimum neighbourhood size for a core point
    pub min_samples: usize,
    /// Reported hotspot radius never exceeds this
    pub max_radius_km: f64,
}

impl Default for HotspotParams {
    fn default() -> Self {
        HotspotParams {
            epsilon_km: DEFAULT_EPSILON_KM,
            min_samples: DEFAULT_MIN_SAMPLES,
            max_radius_km: DEFAULT_MAX_RADIUS_KM,
        }
    }
}

impl HotspotParams {
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.epsilon_km.is_finite() || self.epsilon_km <= 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "epsilon_km must be a positive number, got {}",
                self.epsilon_km
            )));
        }
        if self.min_samples == 0 {
            return Err(AnalysisError::InvalidParameter(
                "min_samples must be at least 1".to_string(),
            ));
        }
        if !self.max_radius_km.is_finite() || self.max_radius_km < 0.0 {
            return Err(AnalysisError::InvalidParameter(format!(
                "max_radius_km must be a non-negative number, got {}",
                self.max_radius_km
            )));
        }
        Ok(())
    }
}

/// An input record left out of clustering
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedReport {
    /// Position of the record in the input slice
    pub index: usize,
    pub error: AnalysisError,
}

/// Result of one clustering pass
#[derive(Debug, Clone, Default)]
pub struct Clustering {
    /// Non-noise clusters, labelled 0.. in discovery order
    pub hotspots: Vec<Hotspot>,
    /// Input indices of valid records that belong to no hotspot
    pub noise: Vec<usize>,
    /// Records skipped because of bad coordinates
    pub rejected: Vec<RejectedReport>,
    /// Fewer valid records than `min_samples`; nothing was clustered
    pub insufficient_data: bool,
    /// Number of input records, rejected ones included
    pub input_len: usize,
}

impl Clustering {
    /// One label per input record, in input order
    ///
    /// Noise and rejected records get [`NOISE_LABEL`].
    pub fn labels(&self) -> Vec<i32> {
        let mut labels = vec![NOISE_LABEL; self.input_len];
        for hotspot in &self.hotspots {
            for &i in &hotspot.members {
                labels[i] = hotspot.label;
            }
        }
        labels
    }
}

/// Groups nearby records into hotspots
///
/// Records with invalid coordinates are skipped and listed in
/// [`Clustering::rejected`]; they never abort the batch. When fewer than
/// `min_samples` valid records remain the result is empty with
/// `insufficient_data` set.
///
/// Each hotspot gets the arithmetic mean of its members as centroid and the
/// largest member-to-centroid haversine distance, capped at
/// `max_radius_km`, as radius.
///
/// Only invalid `params` produce an error.
pub fn cluster<T: Located>(
    records: &[T],
    params: &HotspotParams,
) -> Result<Clustering, AnalysisError> {
    params.validate()?;

    let mut points = Vec::with_capacity(records.len());
    let mut origin = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for (index, record) in records.iter().enumerate() {
        let p = record.location();
        match Point::checked(p.lat(), p.lon()) {
            Ok(p) => {
                points.push(p);
                origin.push(index);
            }
            Err(error) => rejected.push(RejectedReport { index, error }),
        }
    }

    if points.len() < params.min_samples {
        return Ok(Clustering {
            rejected,
            insufficient_data: true,
            input_len: records.len(),
            ..Default::default()
        });
    }

    let (clusters, noise) = db_scan(&points, params.epsilon_km, params.min_samples);

    let hotspots: Vec<Hotspot> = clusters
        .iter()
        .map(|cluster| {
            let centroid = cluster.centroid(&points);
            let radius_km = cluster
                .points
                .iter()
                .map(|&i| haversine_km(&centroid, &points[i]))
                .fold(0.0, f64::max)
                .min(params.max_radius_km);

            Hotspot {
                label: cluster.c as i32,
                members: cluster.points.iter().map(|&i| origin[i]).collect(),
                centroid,
                radius_km,
            }
        })
        .collect();

    Ok(Clustering {
        hotspots,
        noise: noise.into_iter().map(|i| origin[i]).collect(),
        rejected,
        insufficient_data: false,
        input_len: records.len(),
    })
}
