use anyhow::{Context, Result};
use geo::{Coord, LineString, MultiLineString, MultiPolygon, Point, Polygon};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;

use crate::domain::{Feature, FeatureAttributes};

/// A GeoJSON position; anything past x/y (z, m) is ignored
type Position = Vec<f64>;

/// GeoJSON feature collection as returned by `f=geojson` queries
#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<GeoJsonFeature>,
    /// ArcGIS puts `exceededTransferLimit` here when the result was truncated
    #[serde(default)]
    pub properties: Option<CollectionProperties>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CollectionProperties {
    #[serde(default, rename = "exceededTransferLimit")]
    pub exceeded_transfer_limit: bool,
}

#[derive(Debug, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Vec<Position>> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
    #[serde(other)]
    Unsupported,
}

impl FeatureCollection {
    pub fn exceeded_transfer_limit(&self) -> bool {
        self.properties
            .as_ref()
            .is_some_and(|p| p.exceeded_transfer_limit)
    }

    /// Convert into domain features, keeping input order.
    /// Features whose geometry cannot be converted are kept without one.
    pub fn into_features(self) -> Vec<Feature> {
        self.features
            .into_iter()
            .map(|f| {
                let geometry = f.geometry.as_ref().and_then(GeoJsonGeometry::to_geo);
                let attributes = f
                    .properties
                    .as_ref()
                    .map(FeatureAttributes::from_properties)
                    .unwrap_or_default();
                Feature::new(geometry, attributes)
            })
            .collect()
    }
}

impl GeoJsonGeometry {
    pub fn to_geo(&self) -> Option<geo::Geometry<f64>> {
        match self {
            GeoJsonGeometry::Point { coordinates } => {
                to_coord(coordinates).map(|c| Point::from(c).into())
            }
            GeoJsonGeometry::LineString { coordinates } => {
                to_line_string(coordinates).map(Into::into)
            }
            GeoJsonGeometry::MultiLineString { coordinates } => coordinates
                .iter()
                .map(|l| to_line_string(l))
                .collect::<Option<Vec<_>>>()
                .map(|lines| MultiLineString::new(lines).into()),
            GeoJsonGeometry::Polygon { coordinates } => to_polygon(coordinates).map(Into::into),
            GeoJsonGeometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .map(|p| to_polygon(p))
                .collect::<Option<Vec<_>>>()
                .map(|polys| MultiPolygon::new(polys).into()),
            GeoJsonGeometry::Unsupported => None,
        }
    }
}

fn to_coord(position: &[f64]) -> Option<Coord<f64>> {
    match position {
        [x, y, ..] => Some(Coord { x: *x, y: *y }),
        _ => None,
    }
}

fn to_line_string(positions: &[Position]) -> Option<LineString<f64>> {
    positions
        .iter()
        .map(|p| to_coord(p))
        .collect::<Option<Vec<_>>>()
        .map(LineString::new)
}

/// First ring is the exterior, the rest are holes
fn to_polygon(rings: &[Vec<Position>]) -> Option<Polygon<f64>> {
    let (exterior, holes) = rings.split_first()?;
    let exterior = to_line_string(exterior)?;
    let holes = holes
        .iter()
        .map(|r| to_line_string(r))
        .collect::<Option<Vec<_>>>()?;
    Some(Polygon::new(exterior, holes))
}

pub fn parse_feature_collection(json: &str) -> Result<FeatureCollection> {
    serde_json::from_str(json).context("Failed to parse GeoJSON feature collection")
}

/// Load features from a local GeoJSON file
pub fn read_features(path: &Path) -> Result<Vec<Feature>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read GeoJSON file: {}", path.display()))?;
    let collection = parse_feature_collection(&contents)?;
    Ok(collection.into_features())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": 1,
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[-118.5, 33.9, 0.0], [-118.4, 33.9, 0.0], [-118.4, 34.0, 0.0], [-118.5, 33.9, 0.0]]
                    ]
                },
                "properties": {"Evacuate": "Yes, Tsunami Hazard Area", "Label": "Zone A", "County": "Los Angeles"}
            },
            {
                "type": "Feature",
                "id": 2,
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0, 0], [1, 0], [1, 1], [0, 0]]],
                        [[[2, 2], [3, 2], [3, 3], [2, 2]], [[2.1, 2.1], [2.2, 2.1], [2.2, 2.2], [2.1, 2.1]]]
                    ]
                },
                "properties": {"Evacuate": "No", "Label": "Zone B"}
            },
            {"type": "Feature", "geometry": null, "properties": null},
            {"type": "Feature", "geometry": {"type": "GeometryCollection", "geometries": []}, "properties": {}}
        ],
        "properties": {"exceededTransferLimit": true}
    }"#;

    #[test]
    fn test_parse_sample() {
        let collection = parse_feature_collection(SAMPLE).unwrap();
        assert!(collection.exceeded_transfer_limit());

        let features = collection.into_features();
        assert_eq!(features.len(), 4);

        assert_eq!(features[0].attributes.label.as_deref(), Some("Zone A"));
        match features[0].geometry.as_deref() {
            Some(geo::Geometry::Polygon(p)) => {
                assert_eq!(p.exterior().0.len(), 4);
                assert!(p.interiors().is_empty());
            }
            other => panic!("expected polygon, got {:?}", other),
        }

        match features[1].geometry.as_deref() {
            Some(geo::Geometry::MultiPolygon(mp)) => {
                assert_eq!(mp.0.len(), 2);
                assert_eq!(mp.0[1].interiors().len(), 1);
            }
            other => panic!("expected multipolygon, got {:?}", other),
        }

        assert!(features[2].geometry.is_none());
        assert_eq!(features[2].attributes, FeatureAttributes::default());
        assert!(features[3].geometry.is_none());
    }

    #[test]
    fn test_transfer_limit_defaults_false() {
        let collection = parse_feature_collection(r#"{"features": []}"#).unwrap();
        assert!(!collection.exceeded_transfer_limit());
        assert!(collection.into_features().is_empty());
    }

    #[test]
    fn test_missing_features_is_rejected() {
        assert!(parse_feature_collection("{}").is_err());
        assert!(parse_feature_collection(r#"{"type": "FeatureCollection"}"#).is_err());
    }

    #[test]
    fn test_short_position_drops_geometry() {
        let geometry: GeoJsonGeometry =
            serde_json::from_str(r#"{"type": "Point", "coordinates": [1.0]}"#).unwrap();
        assert!(geometry.to_geo().is_none());
    }

    #[test]
    fn test_read_features_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let features = read_features(file.path()).unwrap();
        assert_eq!(features.len(), 4);
    }

    #[test]
    fn test_read_features_missing_file() {
        let result = read_features(Path::new("/nonexistent/zones.geojson"));
        assert!(result.is_err());
    }
}
