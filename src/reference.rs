use geo::algorithm::geodesic_area::GeodesicArea;
use geo::orient::Direction;
use geo::{Area, Coord, Orient, Polygon};
use serde::Serialize;

use crate::area::SQUARE_METERS_PER_HECTARE;
use crate::error::Result;
use crate::polygon::Ring;
use crate::utm::UtmProjection;

/// WGS84 ellipsoidal area (geo crate), for comparison with the spherical
/// figure.
pub fn geodesic_area_hectares(ring: &Ring) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let coords: Vec<Coord<f64>> = ring
        .points()
        .iter()
        .map(|p| Coord { x: p.lon, y: p.lat })
        .collect();

    let mut geo_polygon = Polygon::new(coords.into(), vec![]);
    geo_polygon = geo_polygon.orient(Direction::Default);

    geo_polygon.geodesic_area_unsigned() / SQUARE_METERS_PER_HECTARE
}

/// Shoelace area of the ring projected into the UTM zone of its first
/// vertex.
pub fn planar_area_hectares(ring: &Ring) -> Result<f64> {
    let Some(first) = ring.points().first() else {
        return Ok(0.0);
    };
    if ring.len() < 3 {
        return Ok(0.0);
    }
    let proj = UtmProjection::for_point(first)?;
    let coords: Vec<Coord<f64>> = proj
        .project_all(ring.points())?
        .iter()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect();

    let geo_polygon = Polygon::new(coords.into(), vec![]);
    Ok(geo_polygon.unsigned_area() / SQUARE_METERS_PER_HECTARE)
}

#[derive(Clone, Debug, Serialize)]
pub struct Comparison {
    pub spherical: f64,
    pub geodesic: f64,
    pub planar: f64,
}

impl Comparison {
    pub fn of(ring: &Ring) -> Result<Comparison> {
        Ok(Comparison {
            spherical: ring.area_hectares(),
            geodesic: geodesic_area_hectares(ring),
            planar: planar_area_hectares(ring)?,
        })
    }

    /// Relative deviation of the spherical figure from the geodesic one.
    pub fn geodesic_deviation(&self) -> f64 {
        relative(self.spherical, self.geodesic)
    }

    pub fn planar_deviation(&self) -> f64 {
        relative(self.spherical, self.planar)
    }
}

fn relative(value: f64, reference: f64) -> f64 {
    if reference == 0.0 {
        0.0
    } else {
        value / reference - 1.0
    }
}
