pub mod scene;
pub mod switch;

pub use scene::Scene;
pub use switch::{DisplayState, VisibilitySwitch};

use crate::domain::Group;
use std::sync::Arc;

/// A rendering target that groups are added to or cleared from
///
/// Groups are shared with the surface, never handed over.
pub trait DisplaySurface {
    fn add(&mut self, group: &Arc<Group>);
    fn remove_all(&mut self);
}

impl<D: DisplaySurface + ?Sized> DisplaySurface for &mut D {
    fn add(&mut self, group: &Arc<Group>) {
        (**self).add(group);
    }

    fn remove_all(&mut self) {
        (**self).remove_all();
    }
}
