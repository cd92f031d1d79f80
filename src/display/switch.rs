use std::sync::Arc;

use super::DisplaySurface;
use crate::domain::{Group, GroupKind};

/// What the switch currently has on its display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Groups not loaded yet; selection changes are ignored
    Uninitialized,
    ShowingEvacuate,
    ShowingSafe,
    /// Last selection matched no group
    ShowingNone,
}

impl DisplayState {
    pub fn showing(&self) -> Option<GroupKind> {
        match self {
            DisplayState::ShowingEvacuate => Some(GroupKind::Evacuate),
            DisplayState::ShowingSafe => Some(GroupKind::Safe),
            DisplayState::Uninitialized | DisplayState::ShowingNone => None,
        }
    }

    fn from_selection(kind: Option<GroupKind>) -> Self {
        match kind {
            Some(GroupKind::Evacuate) => DisplayState::ShowingEvacuate,
            Some(GroupKind::Safe) => DisplayState::ShowingSafe,
            None => DisplayState::ShowingNone,
        }
    }
}

/// Keeps exactly one of the two zone groups on a display surface.
///
/// Lifecycle:
/// 1. [`VisibilitySwitch::new`] (or [`VisibilitySwitch::detached`])
/// 2. [`VisibilitySwitch::initialize`] once the feature query has been classified
/// 3. [`VisibilitySwitch::on_selection_changed`] per selection event
///
/// A missing display surface or missing groups turn every display command
/// into a no-op.
#[derive(Debug)]
pub struct VisibilitySwitch<D> {
    display: Option<D>,
    evacuate: Option<Arc<Group>>,
    safe: Option<Arc<Group>>,
    state: DisplayState,
}

impl<D: DisplaySurface> VisibilitySwitch<D> {
    pub fn new(display: D) -> Self {
        Self {
            display: Some(display),
            evacuate: None,
            safe: None,
            state: DisplayState::Uninitialized,
        }
    }

    /// A switch with nothing to draw on
    pub fn detached() -> Self {
        Self {
            display: None,
            evacuate: None,
            safe: None,
            state: DisplayState::Uninitialized,
        }
    }

    /// Take ownership of both groups and show `evacuate`.
    ///
    /// Issues a single `add` on a fresh switch. Re-initializing clears the
    /// surface first so only the new evacuate group is resident.
    pub fn initialize(&mut self, evacuate: Group, safe: Group) {
        let reinit = self.state != DisplayState::Uninitialized;
        let evacuate = Arc::new(evacuate);

        if let Some(display) = self.display.as_mut() {
            if reinit {
                display.remove_all();
            }
            display.add(&evacuate);
        }

        self.evacuate = Some(evacuate);
        self.safe = Some(Arc::new(safe));
        self.state = DisplayState::ShowingEvacuate;
    }

    /// Handle a selection control change.
    ///
    /// Clears the surface, then adds the group matching `value`. Values other
    /// than `evacuate` and `safe` leave the surface empty. Repeating a value
    /// re-issues the same commands and ends in the same state.
    pub fn on_selection_changed(&mut self, value: &str) -> DisplayState {
        if self.state == DisplayState::Uninitialized {
            return self.state;
        }

        let selected = GroupKind::from_selection(value);

        if let Some(display) = self.display.as_mut() {
            display.remove_all();
            let group = match selected {
                Some(GroupKind::Evacuate) => self.evacuate.as_ref(),
                Some(GroupKind::Safe) => self.safe.as_ref(),
                None => None,
            };
            if let Some(group) = group {
                display.add(group);
            }
        }

        self.state = DisplayState::from_selection(selected);
        self.state
    }

    pub fn state(&self) -> DisplayState {
        self.state
    }

    pub fn group(&self, kind: GroupKind) -> Option<&Arc<Group>> {
        match kind {
            GroupKind::Evacuate => self.evacuate.as_ref(),
            GroupKind::Safe => self.safe.as_ref(),
        }
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }
}
