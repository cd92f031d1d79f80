use std::sync::Arc;

use crate::domain::FeatureAttributes;
use crate::popup::PopupTemplate;

/// RGBA color with 0-255 channels and alpha in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fill and outline symbology for a zone polygon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStyle {
    pub fill: Color,
    pub outline: Color,
    pub outline_width: f64,
}

/// Attributes projected from the source feature under display keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneAttributes {
    pub name: Option<String>,
    pub evacuate: Option<String>,
    pub county: Option<String>,
    pub gis_link: Option<String>,
    pub kmz_link: Option<String>,
    pub map_link: Option<String>,
}

impl ZoneAttributes {
    /// Display keys, in output order
    pub const KEYS: [&'static str; 6] = ["name", "evacuate", "county", "gisLink", "kmzLink", "mapLink"];

    pub fn project(source: &FeatureAttributes) -> Self {
        Self {
            name: source.label.clone(),
            evacuate: source.evacuate.clone(),
            county: source.county.clone(),
            gis_link: source.gis_link.clone(),
            kmz_link: source.kmz_link.clone(),
            map_link: source.map_link.clone(),
        }
    }

    /// Look up a value by its display key
    pub fn get(&self, key: &str) -> Option<&str> {
        let value = match key {
            "name" => &self.name,
            "evacuate" => &self.evacuate,
            "county" => &self.county,
            "gisLink" => &self.gis_link,
            "kmzLink" => &self.kmz_link,
            "mapLink" => &self.map_link,
            _ => return None,
        };
        value.as_deref()
    }
}

/// Display-ready form of a feature
#[derive(Debug, Clone)]
pub struct Zone {
    pub geometry: Option<Arc<geo::Geometry<f64>>>,
    pub style: ZoneStyle,
    pub attributes: ZoneAttributes,
    pub popup: Arc<PopupTemplate>,
}
