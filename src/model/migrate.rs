//! Pure migration of persisted widget state. The store hands the parsed JSON
//! document here; no I/O happens in this module.
//!
//! Two entry schemas are accepted:
//! - current: `{ id, type, title, visible, position: {x, y, width, height} }`
//!   with the position in pixels;
//! - legacy: `{ ..., layout: {x, y, w, h} }` in grid units, converted at
//!   [`GRID_PX`] pixels per unit (`w: 3` becomes `width: 240`).

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use strum::IntoEnumIterator;
use tracing::warn;

use crate::common::geometry::Rect;
use crate::layout_engine::registry::{GRID_PX, WidgetKind};
use crate::model::widget::WidgetDescriptor;

#[derive(Deserialize)]
struct LegacyLayout {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

#[derive(Deserialize)]
struct RawEntry {
    id: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    kind: String,
    title: Option<String>,
    #[serde(default)]
    visible: bool,
    position: Option<Rect>,
    layout: Option<LegacyLayout>,
}

/// Runs every entry of a persisted document through the migration chain.
/// Returns `None` when the document is not an array at all; that is the
/// caller's cue to reset storage. Entries that cannot be migrated (unknown
/// kind, unreadable shape) are dropped with a warning.
pub fn migrate_entries(value: &Value) -> Option<Vec<WidgetDescriptor>> {
    let items = value.as_array()?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match migrate_entry(item) {
            Some(widget) => out.push(widget),
            None => warn!("dropping unreadable widget entry: {item}"),
        }
    }
    Some(out)
}

fn migrate_entry(item: &Value) -> Option<WidgetDescriptor> {
    let raw: RawEntry = serde_json::from_value(item.clone()).ok()?;
    let Ok(kind) = WidgetKind::from_str(&raw.kind) else {
        warn!("dropping widget of unknown kind {:?}", raw.kind);
        return None;
    };

    let frame = if let Some(position) = raw.position {
        position
    } else if let Some(layout) = raw.layout {
        Rect::new(
            layout.x * GRID_PX,
            layout.y * GRID_PX,
            layout.w * GRID_PX,
            layout.h * GRID_PX,
        )
    } else {
        WidgetDescriptor::hidden(kind).frame
    };

    Some(WidgetDescriptor {
        id: raw.id.unwrap_or_else(|| kind.to_string()),
        kind,
        title: raw.title.unwrap_or_else(|| kind.title().to_string()),
        visible: raw.visible,
        frame,
    })
}

/// Normalizes a migrated list back to the registry-backed shape: duplicate
/// kinds collapse to the first occurrence, sizes are floored at the kind
/// minimum, and kinds missing from storage are appended hidden.
pub fn normalize(entries: Vec<WidgetDescriptor>) -> Vec<WidgetDescriptor> {
    let mut out: Vec<WidgetDescriptor> = Vec::with_capacity(WidgetKind::iter().count());
    for mut widget in entries {
        if out.iter().any(|w| w.kind == widget.kind) {
            warn!("dropping duplicate widget entry for {}", widget.kind);
            continue;
        }
        let min = widget.kind.min_size_px();
        widget.frame.width = f64::max(widget.frame.width, min.width);
        widget.frame.height = f64::max(widget.frame.height, min.height);
        out.push(widget);
    }
    for kind in WidgetKind::iter() {
        if !out.iter().any(|w| w.kind == kind) {
            out.push(WidgetDescriptor::hidden(kind));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_current_schema_passes_through() {
        let doc = json!([{
            "id": "quick_notes",
            "type": "quick_notes",
            "title": "Quick notes",
            "visible": true,
            "position": {"x": 40.0, "y": 60.0, "width": 240.0, "height": 240.0}
        }]);
        let entries = migrate_entries(&doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].frame, Rect::new(40.0, 60.0, 240.0, 240.0));
        assert!(entries[0].visible);
    }

    #[test]
    fn test_legacy_grid_units_convert_to_pixels() {
        let doc = json!([{
            "type": "quick_notes",
            "visible": true,
            "layout": {"x": 1, "y": 2, "w": 3, "h": 2}
        }]);
        let entries = migrate_entries(&doc).unwrap();
        assert_eq!(entries[0].frame, Rect::new(80.0, 160.0, 240.0, 160.0));
    }

    #[test]
    fn test_unknown_kind_is_dropped() {
        let doc = json!([
            {"type": "weather", "visible": true, "position": {"x": 0.0, "y": 0.0, "width": 200.0, "height": 200.0}},
            {"type": "quick_notes", "visible": false, "layout": {"x": 0, "y": 0, "w": 3, "h": 3}}
        ]);
        let entries = migrate_entries(&doc).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, WidgetKind::QuickNotes);
    }

    #[test]
    fn test_non_array_document_is_rejected() {
        assert!(migrate_entries(&json!({"widgets": []})).is_none());
        assert!(migrate_entries(&json!(42)).is_none());
    }

    #[test]
    fn test_missing_fields_fall_back_to_registry() {
        let doc = json!([{"type": "revenue_chart"}]);
        let entries = migrate_entries(&doc).unwrap();
        assert_eq!(entries[0].id, "revenue_chart");
        assert_eq!(entries[0].title, "Revenue");
        assert!(!entries[0].visible);
        assert_eq!(entries[0].frame.width, 480.0);
    }

    #[test]
    fn test_normalize_appends_missing_kinds_hidden() {
        let entries = vec![WidgetDescriptor {
            visible: true,
            ..WidgetDescriptor::hidden(WidgetKind::StaffOnDuty)
        }];
        let normalized = normalize(entries);
        assert_eq!(normalized.len(), WidgetKind::iter().count());
        for widget in &normalized {
            if widget.kind == WidgetKind::StaffOnDuty {
                assert!(widget.visible);
            } else {
                assert!(!widget.visible);
            }
        }
    }

    #[test]
    fn test_normalize_drops_duplicates_first_wins() {
        let mut first = WidgetDescriptor::hidden(WidgetKind::QuickNotes);
        first.frame.x = 100.0;
        let second = WidgetDescriptor::hidden(WidgetKind::QuickNotes);
        let normalized = normalize(vec![first, second]);
        let notes: Vec<_> =
            normalized.iter().filter(|w| w.kind == WidgetKind::QuickNotes).collect();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].frame.x, 100.0);
    }

    #[test]
    fn test_normalize_floors_sizes_at_minimum() {
        let doc = json!([{
            "type": "quick_notes",
            "visible": true,
            "layout": {"x": 0, "y": 0, "w": 1, "h": 1}
        }]);
        let entries = migrate_entries(&doc).unwrap();
        // 1 grid unit is 80px, below the 160px minimum for quick notes.
        assert_eq!(entries[0].frame.width, 80.0);
        let normalized = normalize(entries);
        assert_eq!(normalized[0].frame.width, 160.0);
        assert_eq!(normalized[0].frame.height, 160.0);
    }
}
