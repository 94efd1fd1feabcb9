//! Body of the field-creation request and the stored-field listing.
//!
//! The backend owns persisted fields; this module only shapes the data
//! handed to it and reads back what it returns.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FieldAreaError, Result};
use crate::polygon::Ring;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropType {
    Tomato,
    Olives,
    Wheat,
    Potato,
    Citrus,
    Dates,
    Grapes,
    Vegetables,
    Other,
}

impl CropType {
    pub const ALL: [CropType; 9] = [
        CropType::Tomato,
        CropType::Olives,
        CropType::Wheat,
        CropType::Potato,
        CropType::Citrus,
        CropType::Dates,
        CropType::Grapes,
        CropType::Vegetables,
        CropType::Other,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            CropType::Tomato => "tomato",
            CropType::Olives => "olives",
            CropType::Wheat => "wheat",
            CropType::Potato => "potato",
            CropType::Citrus => "citrus",
            CropType::Dates => "dates",
            CropType::Grapes => "grapes",
            CropType::Vegetables => "vegetables",
            CropType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CropType::Tomato => "Tomato",
            CropType::Olives => "Olives",
            CropType::Wheat => "Wheat",
            CropType::Potato => "Potato",
            CropType::Citrus => "Citrus Fruits",
            CropType::Dates => "Dates",
            CropType::Grapes => "Grapes",
            CropType::Vegetables => "Mixed Vegetables",
            CropType::Other => "Other",
        }
    }
}

impl FromStr for CropType {
    type Err = FieldAreaError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        CropType::ALL
            .into_iter()
            .find(|c| c.value() == s)
            .ok_or_else(|| FieldAreaError::parse("crop type", format!("unknown crop {:?}", s)))
    }
}

impl fmt::Display for CropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A drawn field ready to be posted to the field-creation endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDraft {
    pub name: String,
    pub crop_type: CropType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planting_date: Option<String>,
    pub notes: String,
    /// `[lat, lng]` pairs, open ring.
    pub polygon: Vec<[f64; 2]>,
    /// Hectares, unrounded.
    pub area_size: f64,
}

impl FieldDraft {
    pub fn new(name: &str, crop_type: CropType, ring: &Ring) -> Self {
        FieldDraft {
            name: name.to_string(),
            crop_type,
            planting_date: None,
            notes: String::new(),
            polygon: ring.lat_lngs(),
            area_size: ring.area_hectares(),
        }
    }

    pub fn with_planting_date(mut self, date: &str) -> Self {
        self.planting_date = Some(date.to_string());
        self
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for FieldDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.name,
            self.crop_type,
            format_hectares(self.area_size)
        )
    }
}

/// A field as listed by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StoredField {
    pub id: u64,
    pub name: String,
    pub crop_type: CropType,
    #[serde(default)]
    pub area_size: Option<f64>,
    #[serde(default)]
    pub polygon: Option<Vec<[f64; 2]>>,
}

impl StoredField {
    pub fn ring(&self) -> Result<Option<Ring>> {
        self.polygon
            .as_deref()
            .map(Ring::from_lat_lngs)
            .transpose()
    }
}

/// Sum of the stored areas; fields without an area count as 0.
pub fn total_area_hectares(fields: &[StoredField]) -> f64 {
    fields.iter().filter_map(|f| f.area_size).sum()
}

pub fn format_hectares(area: f64) -> String {
    format!("{:.2} hectares", area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ring() -> Ring {
        Ring::from_lat_lngs(&[[36.45, 10.73], [36.45, 10.74], [36.46, 10.74], [36.46, 10.73]])
            .unwrap()
    }

    #[test]
    fn test_crop_parse() {
        assert_eq!("tomato".parse::<CropType>().unwrap(), CropType::Tomato);
        assert_eq!(" Citrus ".parse::<CropType>().unwrap(), CropType::Citrus);
        assert!("rice".parse::<CropType>().is_err());
        assert_eq!(CropType::Vegetables.to_string(), "Mixed Vegetables");
    }

    #[test]
    fn test_draft_payload() {
        let r = ring();
        let draft = FieldDraft::new("Test Field", CropType::Tomato, &r)
            .with_planting_date("2024-11-20")
            .with_notes("north plot");
        assert_eq!(draft.polygon.len(), 4);
        assert_eq!(draft.area_size, r.area_hectares());

        let json: serde_json::Value = serde_json::from_str(&draft.to_json().unwrap()).unwrap();
        assert_eq!(json["name"], "Test Field");
        assert_eq!(json["crop_type"], "tomato");
        assert_eq!(json["planting_date"], "2024-11-20");
        assert_eq!(json["polygon"][1][0], 36.45);
        assert_eq!(json["polygon"][1][1], 10.74);
        assert_relative_eq!(json["area_size"].as_f64().unwrap(), r.area_hectares());
    }

    #[test]
    fn test_draft_omits_missing_date() {
        let draft = FieldDraft::new("A", CropType::Wheat, &ring());
        let json: serde_json::Value = serde_json::from_str(&draft.to_json().unwrap()).unwrap();
        assert!(json.get("planting_date").is_none());
        assert_eq!(json["notes"], "");
    }

    #[test]
    fn test_display_rounds_to_two_decimals() {
        assert_eq!(format_hectares(123.6449), "123.64 hectares");
        let draft = FieldDraft::new("North", CropType::Olives, &Ring::default());
        assert_eq!(draft.to_string(), "North (Olives): 0.00 hectares");
    }

    #[test]
    fn test_stored_fields() {
        let listing = r#"[
            {"id": 1, "name": "A", "crop_type": "wheat", "area_size": 1.5,
             "polygon": [[36.45, 10.73], [36.45, 10.74], [36.46, 10.74], [36.45, 10.73]]},
            {"id": 2, "name": "B", "crop_type": "dates", "area_size": null},
            {"id": 3, "name": "C", "crop_type": "olives", "area_size": 2.25}
        ]"#;
        let fields: Vec<StoredField> = serde_json::from_str(listing).unwrap();
        assert_eq!(total_area_hectares(&fields), 3.75);
        assert_eq!(fields[0].ring().unwrap().unwrap().len(), 3);
        assert!(fields[1].ring().unwrap().is_none());
        assert_eq!(total_area_hectares(&[]), 0.0);
    }
}
