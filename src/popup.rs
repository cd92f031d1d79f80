use crate::domain::Zone;

/// One labeled attribute shown in a popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Display key on [`crate::domain::ZoneAttributes`]
    pub field_name: &'static str,
    pub label: &'static str,
}

impl FieldInfo {
    pub const fn new(field_name: &'static str, label: &'static str) -> Self {
        Self { field_name, label }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupSection {
    Fields(Vec<FieldInfo>),
    Text(&'static str),
}

/// Popup shown when a zone is picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupTemplate {
    pub title: &'static str,
    pub sections: Vec<PopupSection>,
}

impl PopupTemplate {
    /// Evacuation status and county, followed by the published links
    pub fn tsunami_zone() -> Self {
        Self {
            title: "Tsunami Zone",
            sections: vec![
                PopupSection::Fields(vec![
                    FieldInfo::new("evacuate", "Evacuate Area"),
                    FieldInfo::new("county", "County"),
                ]),
                PopupSection::Text("Links:"),
                PopupSection::Fields(vec![
                    FieldInfo::new("gisLink", "GIS Link"),
                    FieldInfo::new("kmzLink", "KMZ Link"),
                    FieldInfo::new("mapLink", "Map Link"),
                ]),
            ],
        }
    }

    /// Render the popup for a zone as plain text lines.
    /// Missing attribute values render as an empty string.
    pub fn render(&self, zone: &Zone) -> Vec<String> {
        let mut lines = vec![self.title.to_string()];

        for section in &self.sections {
            match section {
                PopupSection::Fields(infos) => {
                    for info in infos {
                        let value = zone.attributes.get(info.field_name).unwrap_or("");
                        lines.push(format!("  {}: {}", info.label, value));
                    }
                }
                PopupSection::Text(text) => lines.push(format!("  {}", text)),
            }
        }

        lines
    }
}
