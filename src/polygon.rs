use core::fmt;

use crate::{
    area,
    error::Result,
    point::{GeoBoundingBox, GeoPoint},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
    Degenerate,
}

impl fmt::Display for Winding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Winding::Clockwise => "clockwise",
            Winding::CounterClockwise => "counter-clockwise",
            Winding::Degenerate => "degenerate",
        };
        write!(f, "{}", s)
    }
}

/// Open polygon boundary: the last point connects back to the first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ring {
    points: Vec<GeoPoint>,
}

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Ring { points }
    }

    /// Drops a trailing vertex equal to the first one.
    pub fn from_closed(mut points: Vec<GeoPoint>) -> Self {
        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Ring { points }
    }

    /// Builds a ring from `[lat, lng]` pairs, validating every coordinate.
    pub fn from_lat_lngs(pairs: &[[f64; 2]]) -> Result<Self> {
        let points = pairs
            .iter()
            .map(|[lat, lng]| GeoPoint::new(*lat, *lng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Ring::from_closed(points))
    }

    pub fn lat_lngs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(GeoPoint::lat_lng).collect()
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn reversed(&self) -> Self {
        Ring {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    pub fn rotated(&self, k: usize) -> Self {
        let mut points = self.points.clone();
        if !points.is_empty() {
            let n = points.len();
            points.rotate_left(k % n);
        }
        Ring { points }
    }

    pub fn bbox(&self) -> Option<GeoBoundingBox> {
        let first = self.points.first()?;
        Some(
            self.points
                .iter()
                .fold(GeoBoundingBox::from(first, first), |b, p| b.extend(p)),
        )
    }

    pub fn winding(&self) -> Winding {
        let s = area::signed_accumulator(&self.points);
        if s < 0.0 {
            Winding::CounterClockwise
        } else if s > 0.0 {
            Winding::Clockwise
        } else {
            Winding::Degenerate
        }
    }

    pub fn area_hectares(&self) -> f64 {
        area::compute_area_hectares(self)
    }

    pub fn info(&self) {
        log::info!("ring: len: {}", self.len());
        if self.len() < 3 {
            log::warn!("ring: fewer than 3 vertices, area is 0");
        }
        if let Some(bbox) = self.bbox() {
            log::info!("ring: bbox: {}", bbox);
            log::info!("ring: center: {}", bbox.center());
        }
        log::info!("ring: winding: {}", self.winding());
        log::info!("ring: area: {:.4} ha", self.area_hectares());
    }
}

impl From<Vec<GeoPoint>> for Ring {
    fn from(points: Vec<GeoPoint>) -> Self {
        Ring::new(points)
    }
}
