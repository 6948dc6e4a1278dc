use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::common::geometry::Rect;
use crate::layout_engine::registry::WidgetKind;

/// One dashboard panel: identity, visibility, and pixel geometry. Descriptors
/// are created once per known kind and are hidden rather than deleted; the
/// serialized form is what the layout store persists.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WidgetDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    pub title: String,
    pub visible: bool,
    #[serde(rename = "position")]
    pub frame: Rect,
}

impl WidgetDescriptor {
    /// Registry-default descriptor: hidden, default size, parked at the
    /// container origin until first shown.
    pub fn hidden(kind: WidgetKind) -> Self {
        let size = kind.default_size_px();
        Self {
            id: kind.to_string(),
            kind,
            title: kind.title().to_string(),
            visible: false,
            frame: Rect::new(0.0, 0.0, size.width, size.height),
        }
    }

    /// The full default widget set, one hidden descriptor per known kind.
    pub fn default_set() -> Vec<WidgetDescriptor> {
        WidgetKind::iter().map(Self::hidden).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_descriptor_uses_registry_defaults() {
        let widget = WidgetDescriptor::hidden(WidgetKind::RevenueChart);
        assert_eq!(widget.id, "revenue_chart");
        assert_eq!(widget.kind, WidgetKind::RevenueChart);
        assert_eq!(widget.title, "Revenue");
        assert!(!widget.visible);
        assert_eq!(widget.frame, Rect::new(0.0, 0.0, 480.0, 320.0));
    }

    #[test]
    fn test_default_set_covers_every_kind() {
        let set = WidgetDescriptor::default_set();
        assert_eq!(set.len(), WidgetKind::iter().count());
        for kind in WidgetKind::iter() {
            assert!(set.iter().any(|w| w.kind == kind));
        }
        assert!(set.iter().all(|w| !w.visible));
    }

    #[test]
    fn test_serialized_field_names() {
        let widget = WidgetDescriptor::hidden(WidgetKind::QuickNotes);
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["type"], "quick_notes");
        assert!(json["position"].get("width").is_some());
        assert!(json.get("frame").is_none());
    }
}
