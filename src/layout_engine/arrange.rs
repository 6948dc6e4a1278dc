//! Greedy row-fill packing for the auto-arrange command. Deterministic for a
//! fixed input: no randomness, stable ordering, pure arithmetic.

use tracing::debug;

use crate::common::geometry::{Rect, Size};
use crate::layout_engine::registry::WidgetKind;

/// One widget to place, carrying its registry-declared sizing. The engine
/// builds these from the registry; tests construct them directly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrangeItem {
    pub kind: WidgetKind,
    pub default: Size,
    pub min: Size,
}

impl ArrangeItem {
    pub fn from_registry(kind: WidgetKind) -> Self {
        Self {
            kind,
            default: kind.default_size_px(),
            min: kind.min_size_px(),
        }
    }
}

/// Packs every item into the container, left to right and top to bottom:
///
/// 1. Column count is estimated from the average default width against the
///    available width (container minus outer spacing on both sides).
/// 2. Items are sorted descending by default area; ties keep input order.
/// 3. Each item takes its default width capped to the column cell width and
///    floored at its minimum; height follows the default aspect ratio, capped
///    to the remaining vertical space and floored at the minimum.
/// 4. The cursor advances by width + spacing, wrapping to a new row below the
///    tallest widget of the current row when the next one would cross the
///    right edge.
///
/// Every returned frame keeps at least `spacing` distance to its neighbors,
/// so the result is collision-free under the engine's spacing rule.
pub fn arrange(items: &[ArrangeItem], container: Size, spacing: f64) -> Vec<(WidgetKind, Rect)> {
    if items.is_empty() {
        return Vec::new();
    }

    let avail = f64::max(container.width - 2.0 * spacing, 1.0);
    let avg_width = items.iter().map(|i| i.default.width).sum::<f64>() / items.len() as f64;
    let columns = usize::max(1, (avail / (avg_width + spacing)) as usize);
    let cell_width = (avail - spacing * (columns - 1) as f64) / columns as f64;
    debug!(
        "arranging {} widgets into {columns} columns of {cell_width:.0}px",
        items.len()
    );

    let mut order: Vec<&ArrangeItem> = items.iter().collect();
    order.sort_by(|a, b| b.default.area().total_cmp(&a.default.area()));

    let mut placed = Vec::with_capacity(order.len());
    let mut cursor_x = spacing;
    let mut cursor_y = spacing;
    let mut row_height = 0.0f64;

    for item in order {
        // Whole-pixel sizes keep the cursor arithmetic exact, so the spacing
        // between neighbors never erodes below the configured gap.
        let width = f64::max(f64::min(item.default.width, cell_width), item.min.width).round();
        if cursor_x > spacing && cursor_x + width > container.width - spacing {
            cursor_x = spacing;
            cursor_y += row_height + spacing;
            row_height = 0.0;
        }

        let aspect = item.default.height / f64::max(item.default.width, 1.0);
        let remaining = container.height - spacing - cursor_y;
        let height = f64::max(f64::min(width * aspect, remaining), item.min.height).round();

        placed.push((item.kind, Rect::new(cursor_x, cursor_y, width, height)));
        cursor_x += width + spacing;
        row_height = f64::max(row_height, height);
    }

    placed
}
