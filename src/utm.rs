use crate::{
    error::{FieldAreaError, Result},
    point::{GeoPoint, PlanarPoint},
};

pub struct UtmProjection {
    zone: u8,
    south: bool,
    wgs84_spec: proj4rs::proj::Proj,
    dst_spec: proj4rs::proj::Proj,
}

pub fn utm_zone(lon: f64) -> u8 {
    let zone = ((lon + 180.0) / 6.0).floor() as i64 + 1;
    zone.clamp(1, 60) as u8
}

pub fn utm_proj4(point: &GeoPoint) -> String {
    let south = if point.lat < 0.0 { " +south" } else { "" };
    format!(
        "+proj=utm +zone={}{} +datum=WGS84 +units=m +no_defs +type=crs",
        utm_zone(point.lon),
        south
    )
}

impl UtmProjection {
    /// Projection into the UTM zone containing `origin`.
    pub fn for_point(origin: &GeoPoint) -> Result<UtmProjection> {
        use proj4rs::proj::Proj;
        let spec = utm_proj4(origin);
        log::debug!("utm: {}", spec);
        let dst_spec = Proj::from_proj_string(spec.as_str())
            .map_err(|e| FieldAreaError::Projection(format!("{:?}", e)))?;

        let spec = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";
        let wgs84_spec = Proj::from_proj_string(spec)
            .map_err(|e| FieldAreaError::Projection(format!("{:?}", e)))?;
        Ok(UtmProjection {
            zone: utm_zone(origin.lon),
            south: origin.lat < 0.0,
            wgs84_spec,
            dst_spec,
        })
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        utm_zone(p.lon) == self.zone && (p.lat < 0.0) == self.south
    }

    pub fn project(&self, p: &GeoPoint) -> Result<PlanarPoint> {
        if !self.contains(p) {
            log::warn!("not in utm zone {}: {}", self.zone, p);
        }
        let mut xy = (p.lon.to_radians(), p.lat.to_radians());
        proj4rs::transform::transform(&self.wgs84_spec, &self.dst_spec, &mut xy)
            .map_err(|e| FieldAreaError::Projection(format!("{:?}", e)))?;
        Ok(PlanarPoint { x: xy.0, y: xy.1 })
    }

    pub fn project_all(&self, points: &[GeoPoint]) -> Result<Vec<PlanarPoint>> {
        points.iter().map(|p| self.project(p)).collect()
    }
}
