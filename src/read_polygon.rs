use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{FieldAreaError, Result};
use crate::point::GeoPoint;
use crate::polygon::Ring;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Kml,
    Gpx,
    GeoJson,
    /// Shape as drawn on the map: `[lat, lng]` pairs or `{lat, lng}` objects.
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Option<Format> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "kml" => Some(Format::Kml),
            "gpx" => Some(Format::Gpx),
            "geojson" => Some(Format::GeoJson),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

mod lockml {
    use super::*;
    use kml::Kml;
    use kml::types::Geometry;

    fn collect_polygons(kml: &Kml, out: &mut Vec<geo::Polygon>) {
        match kml {
            Kml::KmlDocument(doc) => doc.elements.iter().for_each(|e| collect_polygons(e, out)),
            Kml::Document { elements, .. } => elements.iter().for_each(|e| collect_polygons(e, out)),
            Kml::Folder(z) => z.elements.iter().for_each(|e| collect_polygons(e, out)),
            Kml::Placemark(p) => {
                if let Some(Geometry::Polygon(ls)) = &p.geometry {
                    out.push(geo::Polygon::from(ls.clone()));
                }
            }
            _ => {}
        }
    }

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let kml: Kml = content
            .parse()
            .map_err(|e| FieldAreaError::parse("kml", e))?;

        let mut polygons = Vec::new();
        collect_polygons(&kml, &mut polygons);
        polygons
            .iter()
            .map(|polygon| {
                let points = polygon
                    .exterior()
                    .0
                    .iter()
                    .map(|p| GeoPoint::new(p.y, p.x))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Ring::from_closed(points))
            })
            .collect()
    }
}

mod locgpx {
    use super::*;
    use gpx::Gpx;
    use std::io::Cursor;

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let gpx: Gpx =
            gpx::read(Cursor::new(content)).map_err(|e| FieldAreaError::parse("gpx", e))?;

        gpx.tracks
            .iter()
            .flat_map(|track| track.segments.iter())
            .map(|segment| {
                let points = segment
                    .points
                    .iter()
                    .map(|point| GeoPoint::new(point.point().y(), point.point().x()))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Ring::from_closed(points))
            })
            .collect()
    }
}

mod locjson {
    use super::*;
    use geojson::{GeoJson, Geometry, Value};

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let geojson: GeoJson = content
            .parse()
            .map_err(|e| FieldAreaError::parse("geojson", e))?;

        let geometries: Vec<&Geometry> = match &geojson {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .iter()
                .filter_map(|feature| feature.geometry.as_ref())
                .collect(),
            GeoJson::Feature(feature) => feature.geometry.iter().collect(),
            GeoJson::Geometry(geometry) => vec![geometry],
        };

        let mut rings = Vec::new();
        for geometry in geometries {
            match &geometry.value {
                Value::Polygon(coords) => {
                    if let Some(outer) = coords.first() {
                        rings.push(ring_from_positions(outer)?);
                    }
                }
                Value::MultiPolygon(multi_coords) => {
                    for coords in multi_coords {
                        if let Some(outer) = coords.first() {
                            rings.push(ring_from_positions(outer)?);
                        }
                    }
                }
                _ => log::debug!("geojson: skipping non-polygon geometry"),
            }
        }
        Ok(rings)
    }

    // GeoJSON positions are [lon, lat].
    fn ring_from_positions(positions: &[Vec<f64>]) -> Result<Ring> {
        let points = positions
            .iter()
            .map(|p| match p.as_slice() {
                [lon, lat, ..] => GeoPoint::new(*lat, *lon),
                _ => Err(FieldAreaError::parse("geojson", "position with fewer than 2 values")),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Ring::from_closed(points))
    }
}

mod locshape {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Pairs(Vec<[f64; 2]>),
        Points(Vec<GeoPoint>),
        Field { polygon: Vec<[f64; 2]> },
    }

    pub fn read(content: &str) -> Result<Vec<Ring>> {
        let shape: Shape =
            serde_json::from_str(content).map_err(|e| FieldAreaError::parse("json", e))?;
        let ring = match shape {
            Shape::Pairs(pairs) | Shape::Field { polygon: pairs } => Ring::from_lat_lngs(&pairs)?,
            Shape::Points(points) => Ring::from_closed(
                points
                    .into_iter()
                    .map(GeoPoint::validated)
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        Ok(vec![ring])
    }
}

/// Parses `content`, leaving out rings without a single vertex.
pub fn read_str(content: &str, format: Format) -> Result<Vec<Ring>> {
    let rings = match format {
        Format::Kml => lockml::read(content),
        Format::Gpx => locgpx::read(content),
        Format::GeoJson => locjson::read(content),
        Format::Json => locshape::read(content),
    }?;
    Ok(rings.into_iter().filter(|r| !r.is_empty()).collect())
}

/// Reads every ring in `path`. A readable file holding no polygon is an
/// error.
pub fn read_polygons(path: &Path) -> Result<Vec<Ring>> {
    let format =
        Format::from_path(path).ok_or_else(|| FieldAreaError::UnsupportedFormat(path.into()))?;
    let content = fs::read_to_string(path).map_err(|e| FieldAreaError::io(path, e))?;
    let rings = read_str(&content, format)?;
    log::debug!("{}: {} ring(s) as {:?}", path.display(), rings.len(), format);
    if rings.is_empty() {
        return Err(FieldAreaError::NoPolygon(path.into()));
    }
    Ok(rings)
}

/// Expands directories into the supported files below them, sorted by
/// path. Plain files are passed through untouched.
pub fn input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut ret = Vec::new();
    for path in paths {
        if !path.is_dir() {
            ret.push(path.clone());
            continue;
        }
        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|e| {
                let p = e.path().unwrap_or(path.as_path()).to_path_buf();
                FieldAreaError::io(p, e.into())
            })?;
            if entry.file_type().is_file() && Format::from_path(entry.path()).is_some() {
                found.push(entry.into_path());
            } else if entry.file_type().is_file() {
                log::trace!("skipping {}", entry.path().display());
            }
        }
        found.sort();
        ret.extend(found);
    }
    Ok(ret)
}

/// Reads every ring below `paths`, labelled `<file>#<index>`. A file named
/// in `paths` must yield rings; files found while walking a directory are
/// skipped with a warning when they fail.
pub fn read_inputs(paths: &[PathBuf]) -> Result<Vec<(String, Ring)>> {
    let mut ret = Vec::new();
    for path in input_files(paths)? {
        match read_polygons(&path) {
            Ok(found) => {
                for (i, ring) in found.into_iter().enumerate() {
                    ret.push((format!("{}#{}", path.display(), i), ring));
                }
            }
            Err(e) if !paths.contains(&path) => {
                log::warn!("skipping {}: {}", path.display(), e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a/b.kml")), Some(Format::Kml));
        assert_eq!(Format::from_path(Path::new("b.GPX")), Some(Format::Gpx));
        assert_eq!(Format::from_path(Path::new("b.geojson")), Some(Format::GeoJson));
        assert_eq!(Format::from_path(Path::new("b.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("b.txt")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_json_pairs_are_lat_lng() {
        let rings = read_str("[[36.45, 10.73], [36.45, 10.74], [36.46, 10.74]]", Format::Json).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].points()[0], GeoPoint { lat: 36.45, lon: 10.73 });
    }

    #[test]
    fn test_json_objects_and_field_body() {
        let objects = r#"[{"lat": 1.0, "lng": 2.0}, {"latitude": 1.0, "longitude": 3.0}, {"lat": 2.0, "lng": 3.0}]"#;
        let rings = read_str(objects, Format::Json).unwrap();
        assert_eq!(rings[0].len(), 3);
        assert_eq!(rings[0].points()[1], GeoPoint { lat: 1.0, lon: 3.0 });

        let body = r#"{"name": "Test Field", "polygon": [[36.45, 10.73], [36.45, 10.74], [36.46, 10.74], [36.45, 10.73]]}"#;
        let rings = read_str(body, Format::Json).unwrap();
        assert_eq!(rings[0].len(), 3);
    }

    #[test]
    fn test_json_rejects_out_of_range() {
        let err = read_str("[[100.0, 10.0], [0.0, 0.0], [1.0, 1.0]]", Format::Json).unwrap_err();
        assert!(matches!(err, FieldAreaError::CoordinateOutOfRange { .. }));
        assert!(matches!(
            read_str("not json", Format::Json).unwrap_err(),
            FieldAreaError::Parse { format: "json", .. }
        ));
    }

    #[test]
    fn test_empty_shapes_yield_no_ring() {
        assert!(read_str("[]", Format::Json).unwrap().is_empty());
        assert!(read_str(r#"{"polygon": []}"#, Format::Json).unwrap().is_empty());
        assert!(read_str(r#"{"type": "Polygon", "coordinates": [[]]}"#, Format::GeoJson)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_geojson_positions_are_lon_lat() {
        let content = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Polygon",
                 "coordinates": [[[10.73, 36.45], [10.74, 36.45], [10.74, 36.46], [10.73, 36.46], [10.73, 36.45]]]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [10.0, 36.0]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "MultiPolygon",
                 "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                                 [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]]]}}
            ]
        }"#;
        let rings = read_str(content, Format::GeoJson).unwrap();
        assert_eq!(rings.len(), 3);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0].points()[0], GeoPoint { lat: 36.45, lon: 10.73 });
        assert_eq!(rings[2].points()[1], GeoPoint { lat: 2.0, lon: 3.0 });
    }

    #[test]
    fn test_kml_polygon() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <Folder>
      <Placemark>
        <name>North Field</name>
        <Polygon>
          <outerBoundaryIs>
            <LinearRing>
              <coordinates>10.73,36.45,0 10.74,36.45,0 10.74,36.46,0 10.73,36.46,0 10.73,36.45,0</coordinates>
            </LinearRing>
          </outerBoundaryIs>
        </Polygon>
      </Placemark>
    </Folder>
  </Document>
</kml>"#;
        let rings = read_str(content, Format::Kml).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0].points()[1], GeoPoint { lat: 36.45, lon: 10.74 });
    }

    #[test]
    fn test_gpx_segment() {
        let content = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="field-area" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>walk around the field</name>
    <trkseg>
      <trkpt lat="36.45" lon="10.73"></trkpt>
      <trkpt lat="36.45" lon="10.74"></trkpt>
      <trkpt lat="36.46" lon="10.74"></trkpt>
      <trkpt lat="36.46" lon="10.73"></trkpt>
    </trkseg>
  </trk>
</gpx>"#;
        let rings = read_str(content, Format::Gpx).unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 4);
        assert_eq!(rings[0].points()[2], GeoPoint { lat: 36.46, lon: 10.74 });
    }
}
