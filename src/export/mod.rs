pub mod geojson;

pub use geojson::{scene_to_geojson, write_geojson};
