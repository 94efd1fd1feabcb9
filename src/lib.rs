pub mod area;
pub mod error;
pub mod field;
pub mod point;
pub mod polygon;
pub mod read_polygon;
pub mod reference;
pub mod svg;
pub mod typst;
pub mod utm;

pub use area::compute_area_hectares;
pub use error::{FieldAreaError, Result};
pub use point::GeoPoint;
pub use polygon::Ring;
