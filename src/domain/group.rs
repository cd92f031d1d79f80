use crate::domain::Zone;

/// The two mutually exclusive display categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Evacuate,
    Safe,
}

impl GroupKind {
    /// Map a selection control value onto a group
    pub fn from_selection(value: &str) -> Option<GroupKind> {
        match value {
            "evacuate" => Some(GroupKind::Evacuate),
            "safe" => Some(GroupKind::Safe),
            _ => None,
        }
    }

    pub fn selection_value(&self) -> &'static str {
        match self {
            GroupKind::Evacuate => "evacuate",
            GroupKind::Safe => "safe",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GroupKind::Evacuate => "Evacuate Zones",
            GroupKind::Safe => "Safe Zones",
        }
    }

    pub fn layer_id(&self) -> &'static str {
        match self {
            GroupKind::Evacuate => "evacuate-zones",
            GroupKind::Safe => "safe-zones",
        }
    }
}

/// An ordered collection of zones shown or hidden as one layer
#[derive(Debug, Clone)]
pub struct Group {
    pub kind: GroupKind,
    pub zones: Vec<Zone>,
}

impl Group {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            zones: Vec::new(),
        }
    }

    pub fn push(&mut self, zone: Zone) {
        self.zones.push(zone);
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn id(&self) -> &'static str {
        self.kind.layer_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_kind_from_selection() {
        assert_eq!(
            GroupKind::from_selection("evacuate"),
            Some(GroupKind::Evacuate)
        );
        assert_eq!(GroupKind::from_selection("safe"), Some(GroupKind::Safe));
        assert_eq!(GroupKind::from_selection("Safe"), None);
        assert_eq!(GroupKind::from_selection("unknown"), None);
        assert_eq!(GroupKind::from_selection(""), None);
    }

    #[test]
    fn test_selection_value_round_trip() {
        for kind in [GroupKind::Evacuate, GroupKind::Safe] {
            assert_eq!(GroupKind::from_selection(kind.selection_value()), Some(kind));
        }
        assert_eq!(GroupKind::Safe.selection_value(), "safe");
    }

    #[test]
    fn test_layer_metadata() {
        let group = Group::new(GroupKind::Evacuate);
        assert_eq!(group.title(), "Evacuate Zones");
        assert_eq!(group.id(), "evacuate-zones");
        assert!(group.is_empty());
        assert_eq!(GroupKind::Safe.layer_id(), "safe-zones");
    }
}
