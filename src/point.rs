use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FieldAreaError, Result};

/// A latitude/longitude pair in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "latitude", alias = "lat")]
    pub lat: f64,
    #[serde(rename = "longitude", alias = "lng", alias = "lon")]
    pub lon: f64,
}

impl GeoPoint {
    /// Checked constructor: both values finite, latitude in [-90, 90],
    /// longitude in [-180, 180].
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        GeoPoint { lat, lon }.validated()
    }

    pub fn validated(self) -> Result<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(FieldAreaError::CoordinateOutOfRange {
                lat: self.lat,
                lon: self.lon,
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// `[lat, lng]`, the pair order of the map front end.
    pub fn lat_lng(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geo(lat: {:.5}, lon: {:.5})", self.lat, self.lon)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl fmt::Display for PlanarPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "planar(x: {:.1}, y: {:.1})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoBoundingBox {
    pub min: GeoPoint,
    pub max: GeoPoint,
}

impl GeoBoundingBox {
    pub fn from(p1: &GeoPoint, p2: &GeoPoint) -> Self {
        let min = GeoPoint {
            lat: p1.lat.min(p2.lat),
            lon: p1.lon.min(p2.lon),
        };
        let max = GeoPoint {
            lat: p1.lat.max(p2.lat),
            lon: p1.lon.max(p2.lon),
        };
        Self { min, max }
    }

    pub fn extend(&self, p: &GeoPoint) -> Self {
        let min = GeoPoint {
            lat: self.min.lat.min(p.lat),
            lon: self.min.lon.min(p.lon),
        };
        let max = GeoPoint {
            lat: self.max.lat.max(p.lat),
            lon: self.max.lon.max(p.lon),
        };
        Self { min, max }
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            lat: (self.min.lat + self.max.lat) / 2.0,
            lon: (self.min.lon + self.max.lon) / 2.0,
        }
    }
}

impl fmt::Display for GeoBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "geobbox(min: {}, max: {})", self.min, self.max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarBoundingBox {
    pub min: PlanarPoint,
    pub max: PlanarPoint,
}

impl PlanarBoundingBox {
    pub fn of(points: &[PlanarPoint]) -> Option<Self> {
        let first = *points.first()?;
        let (min, max) = points.iter().fold((first, first), |(min, max), curr| {
            (
                PlanarPoint {
                    x: min.x.min(curr.x),
                    y: min.y.min(curr.y),
                },
                PlanarPoint {
                    x: max.x.max(curr.x),
                    y: max.y.max(curr.y),
                },
            )
        });
        Some(PlanarBoundingBox { min, max })
    }
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

impl fmt::Display for PlanarBoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "planarbbox(min: {}, max: {})", self.min, self.max)
    }
}
