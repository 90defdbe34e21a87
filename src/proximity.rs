//! Nearest-report and largest-hotspot queries

use crate::cluster::{Hotspot, Located, Point, haversine_km};
use crate::error::AnalysisError;
use std::cmp::Ordering;

/// Closest record to a query origin
#[derive(Debug, Clone)]
pub struct Nearest<'a, T> {
    /// Position of the record in the input slice
    pub index: usize,
    pub record: &'a T,
    pub distance_km: f64,
}

/// Finds the record closest to `origin` by haversine distance
///
/// Ties go to the record that comes first in the input. Records with
/// invalid coordinates are never candidates.
///
/// # Errors
///
/// * [`AnalysisError::InvalidCoordinate`] if `origin` is not a valid coordinate
/// * [`AnalysisError::EmptyDataset`] if there is no valid record to pick
pub fn nearest<'a, T: Located>(
    origin: &Point,
    records: &'a [T],
) -> Result<Nearest<'a, T>, AnalysisError> {
    let origin = Point::checked(origin.lat(), origin.lon())?;

    let mut best: Option<Nearest<'a, T>> = None;
    for (index, record) in records.iter().enumerate() {
        let p = record.location();
        if !p.is_valid() {
            continue;
        }
        let distance_km = haversine_km(&origin, &p);
        // Strict comparison keeps the first of equally distant records
        if best.as_ref().is_none_or(|b| distance_km < b.distance_km) {
            best = Some(Nearest {
                index,
                record,
                distance_km,
            });
        }
    }

    best.ok_or(AnalysisError::EmptyDataset)
}

/// Picks the hotspot with the most members
///
/// Noise entries are ignored. Ties go to the lowest label.
///
/// # Errors
///
/// [`AnalysisError::NoClustersFound`] if the input is empty or holds only noise
pub fn largest(hotspots: &[Hotspot]) -> Result<&Hotspot, AnalysisError> {
    hotspots
        .iter()
        .filter(|h| !h.is_noise())
        .min_by(|a, b| b.len().cmp(&a.len()).then(a.label.cmp(&b.label)))
        .ok_or(AnalysisError::NoClustersFound)
}

/// Indices of valid records ordered by haversine distance from `origin`
///
/// Equal distances keep input order. Records with invalid coordinates are
/// left out.
pub fn rank_by_distance<T: Located>(
    origin: &Point,
    records: &[T],
) -> Result<Vec<(usize, f64)>, AnalysisError> {
    let origin = Point::checked(origin.lat(), origin.lon())?;

    let mut ranked: Vec<(usize, f64)> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.location().is_valid())
        .map(|(i, r)| (i, haversine_km(&origin, &r.location())))
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    Ok(ranked)
}
