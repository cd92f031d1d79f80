use anyhow::{Context, Result};
use geo::{Coord, Geometry, LineString, Polygon};
use serde_json::{Map, Value, json};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::display::Scene;
use crate::domain::{Zone, ZoneAttributes};

/// Render the resident zones of a scene as a GeoJSON feature collection
///
/// Each feature carries its projected attributes, the id of the layer it
/// belongs to, and simplestyle keys (`fill`, `fill-opacity`, `stroke`,
/// `stroke-opacity`, `stroke-width`) so common viewers draw the overlay.
pub fn scene_to_geojson(scene: &Scene) -> Value {
    let features: Vec<Value> = scene
        .layers()
        .iter()
        .flat_map(|group| group.zones.iter().map(move |z| zone_feature(z, group.id())))
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn zone_feature(zone: &Zone, layer_id: &str) -> Value {
    let mut properties = Map::new();

    for key in ZoneAttributes::KEYS {
        let value = zone
            .attributes
            .get(key)
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null);
        properties.insert(key.to_string(), value);
    }

    let style = &zone.style;
    properties.insert("layer".to_string(), json!(layer_id));
    properties.insert("fill".to_string(), json!(style.fill.to_hex()));
    properties.insert("fill-opacity".to_string(), json!(style.fill.a));
    properties.insert("stroke".to_string(), json!(style.outline.to_hex()));
    properties.insert("stroke-opacity".to_string(), json!(style.outline.a));
    properties.insert("stroke-width".to_string(), json!(style.outline_width));

    let geometry = zone
        .geometry
        .as_deref()
        .map(geometry_to_value)
        .unwrap_or(Value::Null);

    json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties,
    })
}

fn position(c: &Coord<f64>) -> Value {
    json!([c.x, c.y])
}

fn line_positions(line: &LineString<f64>) -> Value {
    Value::Array(line.coords().map(position).collect())
}

fn polygon_rings(polygon: &Polygon<f64>) -> Value {
    let mut rings = vec![line_positions(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(line_positions));
    Value::Array(rings)
}

/// GeoJSON geometry object; types GeoJSON has no equivalent for become null
pub fn geometry_to_value(geometry: &Geometry<f64>) -> Value {
    match geometry {
        Geometry::Point(p) => json!({"type": "Point", "coordinates": position(&p.0)}),
        Geometry::LineString(l) => {
            json!({"type": "LineString", "coordinates": line_positions(l)})
        }
        Geometry::MultiLineString(ml) => json!({
            "type": "MultiLineString",
            "coordinates": ml.0.iter().map(line_positions).collect::<Vec<_>>(),
        }),
        Geometry::Polygon(p) => json!({"type": "Polygon", "coordinates": polygon_rings(p)}),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.0.iter().map(polygon_rings).collect::<Vec<_>>(),
        }),
        _ => Value::Null,
    }
}

/// Write the scene's resident zones to a GeoJSON file
pub fn write_geojson(path: &Path, scene: &Scene) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create GeoJSON file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &scene_to_geojson(scene))
        .context("Failed to serialize GeoJSON")?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}
