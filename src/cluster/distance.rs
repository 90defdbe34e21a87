use std::f64::consts::PI;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Earth radius in kilometers
pub const EARTH_R: f64 = 6371.0;

use super::point::Point;

/// Calculates great-circle (haversine) distance between two points
///
/// Spherical Earth of radius [`EARTH_R`], no ellipsoidal correction.
///
/// # Returns
///
/// Distance in kilometers
pub fn haversine_km(p1: &Point, p2: &Point) -> f64 {
    let lat1 = p1.lat() * DEGREE_RAD;
    let lat2 = p2.lat() * DEGREE_RAD;
    let dlat = (p2.lat() - p1.lat()) * DEGREE_RAD;
    let dlon = (p2.lon() - p1.lon()) * DEGREE_RAD;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // Rounding can push `a` a hair above 1 for antipodal points
    EARTH_R * 2.0 * a.min(1.0).sqrt().asin()
}

/// Converts a distance in kilometers to the central angle in radians
pub fn km_to_radians(km: f64) -> f64 {
    km / EARTH_R
}

/// Bounding box `(min, max)` in degrees that contains every point within
/// `eps_km` of `center`
///
/// Uses the exact spherical longitude extent
/// `asin(sin(d / R) / cos(lat))`, see
/// <http://janmatuschek.de/LatitudeLongitudeBoundingCoordinates>.
///
/// Returns `None` when the box would reach a pole or cross the
/// antimeridian; callers then fall back to a full scan.
pub fn eps_box(center: &Point, eps_km: f64) -> Option<(Point, Point)> {
    // Widen slightly so points sitting exactly on the eps circle survive rounding
    let angle = km_to_radians(eps_km) * (1.0 + 1e-9);
    let dlat = angle / DEGREE_RAD;

    let min_lat = center.lat() - dlat;
    let max_lat = center.lat() + dlat;
    if min_lat <= -90.0 || max_lat >= 90.0 {
        return None;
    }

    let ratio = angle.sin() / (center.lat() * DEGREE_RAD).cos();
    if ratio >= 1.0 {
        return None;
    }
    let dlon = ratio.asin() / DEGREE_RAD;

    let min_lon = center.lon() - dlon;
    let max_lon = center.lon() + dlon;
    if min_lon < -180.0 || max_lon > 180.0 {
        return None;
    }

    Some((Point::new(min_lat, min_lon), Point::new(max_lat, max_lon)))
}
