//! Spacing-aware overlap tests between widget frames. Everything here is
//! pure; the engine decides what to do with a detected collision.

use crate::common::geometry::{Rect, Size};
use crate::layout_engine::registry::WidgetKind;
use crate::model::widget::WidgetDescriptor;

/// Whether two frames come closer than `spacing`. Each rect is expanded by
/// half the spacing on every side, so frames exactly `spacing` apart do not
/// collide.
pub fn collides(a: Rect, b: Rect, spacing: f64) -> bool {
    a.expand(spacing / 2.0).intersects(&b.expand(spacing / 2.0))
}

/// First visible widget (other than `kind` itself) whose frame collides with
/// the proposed one.
pub fn first_collision<'a>(
    proposed: Rect,
    kind: WidgetKind,
    others: impl IntoIterator<Item = &'a WidgetDescriptor>,
    spacing: f64,
) -> Option<&'a WidgetDescriptor> {
    others
        .into_iter()
        .find(|w| w.visible && w.kind != kind && collides(proposed, w.frame, spacing))
}

/// Fallback placements tried when a manual move or resize lands on another
/// widget: directly right of the collider, then directly below it.
pub fn placement_candidates(proposed: Rect, collider: Rect, spacing: f64) -> [Rect; 2] {
    [
        Rect::new(collider.max().x + spacing, proposed.y, proposed.width, proposed.height),
        Rect::new(proposed.x, collider.max().y + spacing, proposed.width, proposed.height),
    ]
}

/// Scans row-major anchor points (the container corner plus the right and
/// bottom edges of every visible widget) for the first spot where a frame of
/// `size` fits without collisions. Used when a widget is shown for the first
/// time, where the two-candidate fallback is not enough.
pub fn find_free_spot<'a>(
    size: Size,
    container: Size,
    others: impl IntoIterator<Item = &'a WidgetDescriptor> + Clone,
    spacing: f64,
) -> Option<Rect> {
    let bounds = Rect::new(0.0, 0.0, container.width, container.height);

    let mut xs = vec![spacing];
    let mut ys = vec![spacing];
    for w in others.clone() {
        if w.visible {
            xs.push(w.frame.max().x + spacing);
            ys.push(w.frame.max().y + spacing);
        }
    }
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    ys.sort_by(f64::total_cmp);
    ys.dedup();

    for &y in &ys {
        for &x in &xs {
            let candidate = Rect::new(x, y, size.width, size.height);
            if !bounds.contains_rect(candidate) {
                continue;
            }
            let free = others
                .clone()
                .into_iter()
                .all(|w| !w.visible || !collides(candidate, w.frame, spacing));
            if free {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget(kind: WidgetKind, frame: Rect) -> WidgetDescriptor {
        WidgetDescriptor {
            visible: true,
            frame,
            ..WidgetDescriptor::hidden(kind)
        }
    }

    #[test]
    fn test_collides_respects_spacing() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let exactly_spaced = Rect::new(120.0, 0.0, 100.0, 100.0);
        let too_close = Rect::new(119.0, 0.0, 100.0, 100.0);

        assert!(!collides(a, exactly_spaced, 20.0));
        assert!(collides(a, too_close, 20.0));
        // Without spacing only true overlap counts.
        assert!(!collides(a, Rect::new(100.0, 0.0, 100.0, 100.0), 0.0));
    }

    #[test]
    fn test_first_collision_skips_hidden_and_self() {
        let a = widget(WidgetKind::QuickNotes, Rect::new(0.0, 0.0, 200.0, 200.0));
        let mut hidden = widget(WidgetKind::ActivityFeed, Rect::new(0.0, 0.0, 200.0, 200.0));
        hidden.visible = false;
        let others = [a, hidden];

        let proposed = Rect::new(50.0, 50.0, 100.0, 100.0);
        // The quick-notes frame itself must not count as its own collision.
        assert!(
            first_collision(proposed, WidgetKind::QuickNotes, &others, 20.0).is_none()
        );
        let hit = first_collision(proposed, WidgetKind::CalendarPeek, &others, 20.0);
        assert_eq!(hit.map(|w| w.kind), Some(WidgetKind::QuickNotes));
    }

    #[test]
    fn test_placement_candidates() {
        let proposed = Rect::new(100.0, 50.0, 200.0, 150.0);
        let collider = Rect::new(20.0, 20.0, 400.0, 300.0);
        let [right, below] = placement_candidates(proposed, collider, 20.0);

        assert_eq!(right, Rect::new(440.0, 50.0, 200.0, 150.0));
        assert_eq!(below, Rect::new(100.0, 340.0, 200.0, 150.0));
    }

    #[test]
    fn test_find_free_spot_prefers_top_left() {
        let others: [WidgetDescriptor; 0] = [];
        let spot = find_free_spot(Size::new(200.0, 200.0), Size::new(1000.0, 800.0), &others, 20.0);
        assert_eq!(spot, Some(Rect::new(20.0, 20.0, 200.0, 200.0)));
    }

    #[test]
    fn test_find_free_spot_next_to_existing() {
        let others = [widget(WidgetKind::QuickNotes, Rect::new(20.0, 20.0, 400.0, 300.0))];
        let spot = find_free_spot(Size::new(200.0, 200.0), Size::new(1000.0, 800.0), &others, 20.0);
        assert_eq!(spot, Some(Rect::new(440.0, 20.0, 200.0, 200.0)));
    }

    #[test]
    fn test_find_free_spot_none_when_container_is_full() {
        let others = [widget(WidgetKind::QuickNotes, Rect::new(20.0, 20.0, 400.0, 300.0))];
        let spot = find_free_spot(Size::new(400.0, 300.0), Size::new(440.0, 340.0), &others, 20.0);
        assert_eq!(spot, None);
    }
}
