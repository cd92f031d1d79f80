use std::sync::Arc;

use crate::domain::{Color, Feature, Group, GroupKind, Zone, ZoneAttributes, ZoneStyle};
use crate::popup::PopupTemplate;

/// Exact `Evacuate` value marking a feature as inside the hazard area
pub const HAZARD_AREA_VALUE: &str = "Yes, Tsunami Hazard Area";

pub const OUTLINE_WIDTH: f64 = 2.0;

pub const EVACUATE_FILL: Color = Color::rgba(255, 0, 0, 0.5);
pub const EVACUATE_OUTLINE: Color = Color::rgb(255, 0, 0);
pub const SAFE_FILL: Color = Color::rgba(0, 255, 0, 0.3);
pub const SAFE_OUTLINE: Color = Color::rgb(0, 255, 0);

/// Decide which group a feature belongs to.
///
/// Only an exact match on [`HAZARD_AREA_VALUE`] is `Evacuate`; any other
/// value, including a missing one, falls to `Safe`.
pub fn classify_feature(feature: &Feature) -> GroupKind {
    match feature.attributes.evacuate.as_deref() {
        Some(HAZARD_AREA_VALUE) => GroupKind::Evacuate,
        _ => GroupKind::Safe,
    }
}

pub fn style_for(kind: GroupKind) -> ZoneStyle {
    match kind {
        GroupKind::Evacuate => ZoneStyle {
            fill: EVACUATE_FILL,
            outline: EVACUATE_OUTLINE,
            outline_width: OUTLINE_WIDTH,
        },
        GroupKind::Safe => ZoneStyle {
            fill: SAFE_FILL,
            outline: SAFE_OUTLINE,
            outline_width: OUTLINE_WIDTH,
        },
    }
}

/// Partition features into the evacuate and safe groups
///
/// # Guarantees
/// * Every feature lands in exactly one group
/// * Each group keeps the input order of its members
/// * Zones share the feature geometry and one popup template
pub fn classify(features: &[Feature]) -> (Group, Group) {
    let popup = Arc::new(PopupTemplate::tsunami_zone());
    let mut evacuate = Group::new(GroupKind::Evacuate);
    let mut safe = Group::new(GroupKind::Safe);

    for feature in features {
        let kind = classify_feature(feature);
        let zone = Zone {
            geometry: feature.geometry.clone(),
            style: style_for(kind),
            attributes: ZoneAttributes::project(&feature.attributes),
            popup: Arc::clone(&popup),
        };

        match kind {
            GroupKind::Evacuate => evacuate.push(zone),
            GroupKind::Safe => safe.push(zone),
        }
    }

    (evacuate, safe)
}

/// Distinct `Evacuate` values that fell to `Safe` without being a plain "No"
///
/// Used to surface silent fallbacks (typos, nulls, new category names).
pub fn unmatched_evacuate_values(features: &[Feature]) -> Vec<Option<String>> {
    let mut seen: Vec<Option<String>> = Vec::new();

    for feature in features {
        if classify_feature(feature) == GroupKind::Evacuate {
            continue;
        }
        let value = feature.attributes.evacuate.clone();
        if value.as_deref() == Some("No") {
            continue;
        }
        if !seen.contains(&value) {
            seen.push(value);
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeatureAttributes;

    fn feature(evacuate: Option<&str>, label: &str) -> Feature {
        Feature::new(
            Some(geo::Geometry::Point(geo::Point::new(-118.0, 34.0))),
            FeatureAttributes {
                evacuate: evacuate.map(str::to_string),
                label: Some(label.to_string()),
                ..Default::default()
            },
        )
    }

    fn names(group: &Group) -> Vec<&str> {
        group
            .zones
            .iter()
            .map(|z| z.attributes.name.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_classify_example() {
        let features = vec![
            feature(Some("Yes, Tsunami Hazard Area"), "Zone A"),
            feature(Some("No"), "Zone B"),
        ];
        let (evacuate, safe) = classify(&features);

        assert_eq!(names(&evacuate), vec!["Zone A"]);
        assert_eq!(names(&safe), vec!["Zone B"]);
        assert_eq!(evacuate.kind, GroupKind::Evacuate);
        assert_eq!(safe.kind, GroupKind::Safe);
    }

    #[test]
    fn test_predicate_is_exact_match() {
        let cases = [
            Some("Yes, Tsunami Hazard Area"),
            Some("yes, tsunami hazard area"),
            Some("Yes, Tsunami Hazard Area "),
            Some("Yes"),
            Some(""),
            None,
        ];
        let kinds: Vec<GroupKind> = cases
            .iter()
            .map(|c| classify_feature(&feature(*c, "x")))
            .collect();

        assert_eq!(kinds[0], GroupKind::Evacuate);
        assert!(kinds[1..].iter().all(|k| *k == GroupKind::Safe));
    }

    #[test]
    fn test_partition_is_total_and_stable() {
        let values = [
            Some("Yes, Tsunami Hazard Area"),
            Some("No"),
            None,
            Some("Yes, Tsunami Hazard Area"),
            Some("Maybe"),
            Some("Yes, Tsunami Hazard Area"),
            Some("No"),
        ];
        let features: Vec<Feature> = values
            .iter()
            .enumerate()
            .map(|(i, v)| feature(*v, &format!("z{}", i)))
            .collect();

        let (evacuate, safe) = classify(&features);

        assert_eq!(evacuate.len() + safe.len(), features.len());
        assert_eq!(names(&evacuate), vec!["z0", "z3", "z5"]);
        assert_eq!(names(&safe), vec!["z1", "z2", "z4", "z6"]);
        for name in names(&evacuate) {
            assert!(!names(&safe).contains(&name));
        }
    }

    #[test]
    fn test_classify_empty() {
        let (evacuate, safe) = classify(&[]);
        assert!(evacuate.is_empty());
        assert!(safe.is_empty());
    }

    #[test]
    fn test_style_by_branch() {
        let features = vec![
            feature(Some("Yes, Tsunami Hazard Area"), "a"),
            feature(None, "b"),
        ];
        let (evacuate, safe) = classify(&features);

        let evac_style = evacuate.zones[0].style;
        assert_eq!(evac_style.fill, Color::rgba(255, 0, 0, 0.5));
        assert_eq!(evac_style.outline, Color::rgb(255, 0, 0));
        assert_eq!(evac_style.outline_width, 2.0);

        let safe_style = safe.zones[0].style;
        assert_eq!(safe_style.fill, Color::rgba(0, 255, 0, 0.3));
        assert_eq!(safe_style.outline, Color::rgb(0, 255, 0));
        assert_eq!(safe_style.outline_width, 2.0);
    }

    #[test]
    fn test_zone_shares_geometry() {
        let features = vec![feature(Some("No"), "a")];
        let (_, safe) = classify(&features);

        let source = features[0].geometry.as_ref().unwrap();
        let derived = safe.zones[0].geometry.as_ref().unwrap();
        assert!(Arc::ptr_eq(source, derived));
    }

    #[test]
    fn test_missing_attributes_propagate() {
        let features = vec![Feature::new(None, FeatureAttributes::default())];
        let (evacuate, safe) = classify(&features);

        assert!(evacuate.is_empty());
        assert_eq!(safe.len(), 1);
        assert_eq!(safe.zones[0].attributes, ZoneAttributes::default());
        assert!(safe.zones[0].geometry.is_none());
    }

    #[test]
    fn test_unmatched_evacuate_values() {
        let features = vec![
            feature(Some("Yes, Tsunami Hazard Area"), "a"),
            feature(Some("No"), "b"),
            feature(Some("Yes"), "c"),
            feature(None, "d"),
            feature(Some("Yes"), "e"),
        ];
        let unmatched = unmatched_evacuate_values(&features);
        assert_eq!(unmatched, vec![Some("Yes".to_string()), None]);
    }
}
