use serde_json::{Map, Value};
use std::sync::Arc;

/// Source field names on the tsunami hazard layer
pub mod fields {
    pub const EVACUATE: &str = "Evacuate";
    pub const LABEL: &str = "Label";
    pub const COUNTY: &str = "County";
    pub const GIS_LINK: &str = "GIS_Link";
    pub const KMZ_LINK: &str = "KMZ_Link";
    pub const MAP_LINK: &str = "Map_Link";
}

/// Typed view of the attributes the hazard layer publishes.
///
/// Every field is optional: the service may omit any of them or send null,
/// and a missing value is carried through as `None` rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureAttributes {
    pub evacuate: Option<String>,
    pub label: Option<String>,
    pub county: Option<String>,
    pub gis_link: Option<String>,
    pub kmz_link: Option<String>,
    pub map_link: Option<String>,
}

impl FeatureAttributes {
    /// Build from a loosely typed property bag
    ///
    /// Strings are kept as-is, numbers and booleans are stringified,
    /// null, arrays, objects and absent keys become `None`.
    pub fn from_properties(properties: &Map<String, Value>) -> Self {
        let get = |key: &str| properties.get(key).and_then(value_to_string);

        Self {
            evacuate: get(fields::EVACUATE),
            label: get(fields::LABEL),
            county: get(fields::COUNTY),
            gis_link: get(fields::GIS_LINK),
            kmz_link: get(fields::KMZ_LINK),
            map_link: get(fields::MAP_LINK),
        }
    }
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// A single record from the hazard layer query
#[derive(Debug, Clone)]
pub struct Feature {
    /// Shared with every zone derived from this feature
    pub geometry: Option<Arc<geo::Geometry<f64>>>,
    pub attributes: FeatureAttributes,
}

impl Feature {
    pub fn new(geometry: Option<geo::Geometry<f64>>, attributes: FeatureAttributes) -> Self {
        Self {
            geometry: geometry.map(Arc::new),
            attributes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_properties_full() {
        let props = json!({
            "Evacuate": "Yes, Tsunami Hazard Area",
            "Label": "Zone A",
            "County": "Ventura",
            "GIS_Link": "https://example.com/gis",
            "KMZ_Link": "https://example.com/kmz",
            "Map_Link": "https://example.com/map",
            "OBJECTID": 17
        });
        let attrs = FeatureAttributes::from_properties(props.as_object().unwrap());

        assert_eq!(attrs.evacuate.as_deref(), Some("Yes, Tsunami Hazard Area"));
        assert_eq!(attrs.label.as_deref(), Some("Zone A"));
        assert_eq!(attrs.county.as_deref(), Some("Ventura"));
        assert_eq!(attrs.map_link.as_deref(), Some("https://example.com/map"));
    }

    #[test]
    fn test_from_properties_missing_and_null() {
        let props = json!({"Evacuate": null, "Label": 42, "County": true});
        let attrs = FeatureAttributes::from_properties(props.as_object().unwrap());

        assert_eq!(attrs.evacuate, None);
        assert_eq!(attrs.label.as_deref(), Some("42"));
        assert_eq!(attrs.county.as_deref(), Some("true"));
        assert_eq!(attrs.gis_link, None);
        assert_eq!(attrs.kmz_link, None);
    }
}
