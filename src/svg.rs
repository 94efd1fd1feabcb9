use crate::{
    error::Result,
    point::{PlanarBoundingBox, PlanarPoint},
    polygon::Ring,
    utm::UtmProjection,
};

pub struct SVG {
    bbox: PlanarBoundingBox,
    padding: f64,
    polygons: Vec<String>,
}

impl SVG {
    pub fn init(b: &PlanarBoundingBox) -> Self {
        Self {
            bbox: *b,
            padding: 0.1,
            polygons: Vec::new(),
        }
    }

    /// Outline of `ring` in the UTM plane of its first vertex. `None` for
    /// an empty ring.
    pub fn of_ring(ring: &Ring) -> Result<Option<Self>> {
        let Some(first) = ring.points().first() else {
            return Ok(None);
        };
        let planar = UtmProjection::for_point(first)?.project_all(ring.points())?;
        let Some(bbox) = PlanarBoundingBox::of(&planar) else {
            return Ok(None);
        };
        let mut svg = SVG::init(&bbox);
        svg.add_polygon(&planar, "green");
        Ok(Some(svg))
    }

    pub fn add_polygon(&mut self, points: &[PlanarPoint], fill: &str) {
        let s = points
            .iter()
            .map(|p| {
                let (x, y) = self.transform(p.x, p.y);
                format!("{:.2},{:.2}", x, y)
            })
            .collect::<Vec<String>>()
            .join(" ");
        let p = format!(
            r#"<polygon points="{}" fill="{}" fill-opacity="0.4" stroke="red" stroke-width="3"/>"#,
            s, fill
        );
        self.polygons.push(p);
    }
    pub fn render(&self) -> String {
        let mut svg =
            String::from(r#"<svg width="500" height="500" xmlns="http://www.w3.org/2000/svg">"#);
        svg.push('\n');
        for p in &self.polygons {
            svg.push_str(p);
            svg.push('\n');
        }
        svg.push_str("</svg>");
        svg
    }
    pub fn width(&self) -> f64 {
        self.bbox.width()
    }
    pub fn height(&self) -> f64 {
        self.bbox.height()
    }
    pub fn scale(&self) -> f64 {
        let padded_width = self.width() * (1.0 + 2.0 * self.padding);
        let padded_height = self.height() * (1.0 + 2.0 * self.padding);
        let extent = padded_width.max(padded_height);
        if extent > 0.0 { 500.0 / extent } else { 1.0 }
    }
    fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        let svg_x = (x - self.bbox.min.x + self.width() * self.padding) * self.scale();
        let svg_y = 500.0 - (y - self.bbox.min.y + self.height() * self.padding) * self.scale();
        (svg_x, svg_y)
    }
}
