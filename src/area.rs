//! Spherical-excess area of a ring of geographic points.
//!
//! The Earth is treated as a sphere of radius [`EARTH_RADIUS`]. There is no
//! ellipsoid correction: results differ slightly from a WGS84 geodesic area
//! (see [`crate::reference`]) and must stay that way so that areas already
//! stored alongside fields keep matching.

use crate::point::GeoPoint;
use crate::polygon::Ring;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_371_000.0;

pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Sum over every edge (wrapping last to first) of
/// `dlon * (2 + sin(lat1) + sin(lat2))`, angles in radians.
///
/// Negative for a counter-clockwise ring (lon as x, lat as y). Zero for
/// fewer than 3 points.
pub fn signed_accumulator(points: &[GeoPoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let n = points.len();
    (0..n)
        .map(|i| {
            let p1 = &points[i];
            let p2 = &points[(i + 1) % n];
            (p2.lon - p1.lon).to_radians()
                * (2.0 + p1.lat.to_radians().sin() + p2.lat.to_radians().sin())
        })
        .sum()
}

pub fn area_square_meters(points: &[GeoPoint]) -> f64 {
    (signed_accumulator(points) * EARTH_RADIUS * EARTH_RADIUS / 2.0).abs()
}

pub fn area_hectares(points: &[GeoPoint]) -> f64 {
    area_square_meters(points) / SQUARE_METERS_PER_HECTARE
}

/// Area enclosed by `ring`, in hectares. Never fails: rings with fewer than
/// 3 vertices yield 0 and non-finite coordinates yield NaN.
pub fn compute_area_hectares(ring: &Ring) -> f64 {
    area_hectares(ring.points())
}
