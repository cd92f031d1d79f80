use geo::{BoundingRect, Rect, coord};
use std::sync::Arc;

use super::DisplaySurface;
use crate::domain::{Group, Zone};

/// In-memory display surface holding the groups currently shown
#[derive(Debug, Default)]
pub struct Scene {
    layers: Vec<Arc<Group>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resident groups in the order they were added
    pub fn layers(&self) -> &[Arc<Group>] {
        &self.layers
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// All resident zones, layer by layer
    pub fn zones(&self) -> impl Iterator<Item = &Zone> {
        self.layers.iter().flat_map(|g| g.zones.iter())
    }

    pub fn zone_count(&self) -> usize {
        self.layers.iter().map(|g| g.len()).sum()
    }

    /// Bounding box (lon/lat) over every resident geometry
    pub fn extent(&self) -> Option<Rect<f64>> {
        self.zones()
            .filter_map(|z| z.geometry.as_ref())
            .filter_map(|g| g.bounding_rect())
            .reduce(|a, b| {
                Rect::new(
                    coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                    coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
                )
            })
    }
}

impl DisplaySurface for Scene {
    fn add(&mut self, group: &Arc<Group>) {
        self.layers.push(Arc::clone(group));
    }

    fn remove_all(&mut self) {
        self.layers.clear();
    }
}
