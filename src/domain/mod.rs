pub mod feature;
pub mod group;
pub mod zone;

pub use feature::{Feature, FeatureAttributes};
pub use group::{Group, GroupKind};
pub use zone::{Color, Zone, ZoneAttributes, ZoneStyle};
