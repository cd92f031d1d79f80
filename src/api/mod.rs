pub mod feature_service;
pub mod geojson;

pub use feature_service::{ServiceError, definition_expression, fetch_zones};
pub use geojson::read_features;
