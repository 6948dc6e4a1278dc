use serde::{Deserialize, Serialize};
use tracing::debug;

use super::arrange::{ArrangeItem, arrange};
use super::collision;
use super::registry::WidgetKind;
use crate::common::config::LayoutSettings;
use crate::common::geometry::{Rect, Round, Size};
use crate::model::store::{self, LayoutStore};
use crate::model::widget::WidgetDescriptor;

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum WidgetCommand {
    ToggleWidget(WidgetKind),
    AddWidget(WidgetKind),
    RemoveWidget(WidgetKind),

    MoveBy {
        kind: WidgetKind,
        dx: f64,
        dy: f64,
    },
    ResizeBy {
        kind: WidgetKind,
        dw: f64,
        dh: f64,
    },
    SetFrame {
        kind: WidgetKind,
        frame: Rect,
    },

    AutoArrange,
    SetContainerSize {
        width: f64,
        height: f64,
    },
    ResetLayout,
}

#[must_use]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineResponse {
    /// Widgets whose descriptor changed, in application order.
    pub changed: Vec<WidgetKind>,
    /// The widget a rejected move or resize collided with; transient UI
    /// feedback, cleared by the next command.
    pub collision: Option<WidgetKind>,
}

impl EngineResponse {
    fn changed(kind: WidgetKind) -> Self {
        Self {
            changed: vec![kind],
            collision: None,
        }
    }

    fn rejected(collider: WidgetKind) -> Self {
        Self {
            changed: Vec::new(),
            collision: Some(collider),
        }
    }
}

/// Owns the registry-backed widget list and applies layout commands to it.
/// Every successful mutation is mirrored into the injected [`LayoutStore`];
/// collisions reject the operation rather than erroring.
pub struct LayoutEngine<S> {
    widgets: Vec<WidgetDescriptor>,
    container: Size,
    settings: LayoutSettings,
    last_collision: Option<WidgetKind>,
    store: S,
}

impl<S: LayoutStore> LayoutEngine<S> {
    /// Loads persisted state through the store, degrading to the default
    /// widget set when there is none (or it is corrupt).
    pub fn new(store: S, settings: LayoutSettings) -> Self {
        let widgets = store::load_state(&store);
        Self {
            widgets,
            container: settings.container,
            settings,
            last_collision: None,
            store,
        }
    }

    pub fn handle_command(&mut self, command: &WidgetCommand) -> EngineResponse {
        let response = match command {
            WidgetCommand::ToggleWidget(kind) => self.toggle_widget(*kind),
            WidgetCommand::AddWidget(kind) => self.show_widget(*kind),
            WidgetCommand::RemoveWidget(kind) => self.hide_widget(*kind),
            WidgetCommand::MoveBy { kind, dx, dy } => self.move_by(*kind, *dx, *dy),
            WidgetCommand::ResizeBy { kind, dw, dh } => self.resize_by(*kind, *dw, *dh),
            WidgetCommand::SetFrame { kind, frame } => self.set_frame(*kind, *frame),
            WidgetCommand::AutoArrange => self.auto_arrange(),
            WidgetCommand::SetContainerSize { width, height } => {
                self.set_container_size(Size::new(*width, *height))
            }
            WidgetCommand::ResetLayout => self.reset_layout(),
        };
        self.last_collision = response.collision;
        response
    }

    pub fn widgets(&self) -> &[WidgetDescriptor] { &self.widgets }

    pub fn visible_widgets(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.widgets.iter().filter(|w| w.visible)
    }

    pub fn widget(&self, kind: WidgetKind) -> Option<&WidgetDescriptor> {
        self.widgets.iter().find(|w| w.kind == kind)
    }

    pub fn is_visible(&self, kind: WidgetKind) -> bool {
        self.widget(kind).is_some_and(|w| w.visible)
    }

    pub fn container(&self) -> Size { self.container }

    pub fn settings(&self) -> &LayoutSettings { &self.settings }

    pub fn set_layout_settings(&mut self, settings: &LayoutSettings) {
        self.settings = settings.clone();
    }

    /// Collider of the most recent rejected operation, if any.
    pub fn last_collision(&self) -> Option<WidgetKind> { self.last_collision }

    fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.container.width, self.container.height)
    }

    fn index_of(&self, kind: WidgetKind) -> Option<usize> {
        self.widgets.iter().position(|w| w.kind == kind)
    }

    fn toggle_widget(&mut self, kind: WidgetKind) -> EngineResponse {
        if self.is_visible(kind) {
            self.hide_widget(kind)
        } else {
            self.show_widget(kind)
        }
    }

    fn show_widget(&mut self, kind: WidgetKind) -> EngineResponse {
        let Some(idx) = self.index_of(kind) else {
            return EngineResponse::default();
        };
        if self.widgets[idx].visible {
            return EngineResponse::default();
        }

        let spacing = self.settings.spacing;
        let clamped = self.widgets[idx].frame.clamp_within(self.bounds());
        let collider = collision::first_collision(clamped, kind, &self.widgets, spacing)
            .map(|w| (w.kind, w.frame));

        let (frame, collision) = match collider {
            None => (clamped, None),
            Some((collider_kind, _)) => {
                match collision::find_free_spot(
                    clamped.size(),
                    self.container,
                    &self.widgets,
                    spacing,
                ) {
                    Some(spot) => (spot, None),
                    // Nowhere to go; show it anyway and let the UI flag the
                    // overlap.
                    None => (clamped, Some(collider_kind)),
                }
            }
        };

        self.widgets[idx].visible = true;
        self.commit_frame(idx, frame);
        EngineResponse {
            changed: vec![kind],
            collision,
        }
    }

    fn hide_widget(&mut self, kind: WidgetKind) -> EngineResponse {
        let Some(idx) = self.index_of(kind) else {
            return EngineResponse::default();
        };
        if !self.widgets[idx].visible {
            return EngineResponse::default();
        }
        self.widgets[idx].visible = false;
        self.persist();
        EngineResponse::changed(kind)
    }

    fn move_by(&mut self, kind: WidgetKind, dx: f64, dy: f64) -> EngineResponse {
        let Some(idx) = self.index_of(kind) else {
            return EngineResponse::default();
        };
        if !self.widgets[idx].visible {
            return EngineResponse::default();
        }
        let frame = self.widgets[idx].frame;
        let proposed =
            Rect::new(frame.x + dx, frame.y + dy, frame.width, frame.height)
                .clamp_within(self.bounds());
        self.try_place(idx, proposed)
    }

    fn resize_by(&mut self, kind: WidgetKind, dw: f64, dh: f64) -> EngineResponse {
        let Some(idx) = self.index_of(kind) else {
            return EngineResponse::default();
        };
        if !self.widgets[idx].visible {
            return EngineResponse::default();
        }
        let frame = self.widgets[idx].frame;
        let size = self.clamp_size(kind, Size::new(frame.width + dw, frame.height + dh));
        let proposed = Rect::new(frame.x, frame.y, size.width, size.height)
            .clamp_within(self.bounds());
        self.try_place(idx, proposed)
    }

    fn set_frame(&mut self, kind: WidgetKind, frame: Rect) -> EngineResponse {
        let Some(idx) = self.index_of(kind) else {
            return EngineResponse::default();
        };
        if !self.widgets[idx].visible {
            return EngineResponse::default();
        }
        let size = self.clamp_size(kind, frame.size());
        let proposed =
            Rect::new(frame.x, frame.y, size.width, size.height).clamp_within(self.bounds());
        self.try_place(idx, proposed)
    }

    /// Registry min/max clamping, additionally capped to the container size.
    /// The minimum wins over a container smaller than the minimum itself.
    fn clamp_size(&self, kind: WidgetKind, size: Size) -> Size {
        let min = kind.min_size_px();
        let max = kind.max_size_px();
        let max_w = f64::max(f64::min(max.width, self.container.width), min.width);
        let max_h = f64::max(f64::min(max.height, self.container.height), min.height);
        Size::new(
            size.width.clamp(min.width, max_w),
            size.height.clamp(min.height, max_h),
        )
    }

    /// Commits `proposed` if it is collision-free; otherwise tries directly
    /// right of, then directly below, the colliding widget. When neither
    /// fallback fits the operation is rejected and the prior frame kept.
    fn try_place(&mut self, idx: usize, proposed: Rect) -> EngineResponse {
        let kind = self.widgets[idx].kind;
        let spacing = self.settings.spacing;

        let Some((collider_kind, collider_frame)) =
            collision::first_collision(proposed, kind, &self.widgets, spacing)
                .map(|w| (w.kind, w.frame))
        else {
            self.commit_frame(idx, proposed);
            return EngineResponse::changed(kind);
        };

        for candidate in collision::placement_candidates(proposed, collider_frame, spacing) {
            if self.bounds().contains_rect(candidate)
                && collision::first_collision(candidate, kind, &self.widgets, spacing).is_none()
            {
                self.commit_frame(idx, candidate);
                return EngineResponse::changed(kind);
            }
        }

        debug!("rejecting move of {kind}: collides with {collider_kind}");
        EngineResponse::rejected(collider_kind)
    }

    fn commit_frame(&mut self, idx: usize, frame: Rect) {
        self.widgets[idx].frame = if self.settings.snap_to_pixels {
            frame.round()
        } else {
            frame
        };
        self.persist();
    }

    /// Repositions every visible widget with the greedy row-fill packer.
    /// Frames are replaced atomically; hidden widgets are untouched.
    fn auto_arrange(&mut self) -> EngineResponse {
        let items: Vec<ArrangeItem> = self
            .visible_widgets()
            .map(|w| ArrangeItem::from_registry(w.kind))
            .collect();
        let placed = arrange(&items, self.container, self.settings.spacing);

        let mut changed = Vec::with_capacity(placed.len());
        for (kind, frame) in placed {
            if let Some(idx) = self.index_of(kind) {
                self.widgets[idx].frame = frame;
                changed.push(kind);
            }
        }
        if !changed.is_empty() {
            self.persist();
        }
        EngineResponse {
            changed,
            collision: None,
        }
    }

    /// Viewport changes re-clamp visible widgets into the new bounds.
    fn set_container_size(&mut self, size: Size) -> EngineResponse {
        self.container = size;
        let bounds = self.bounds();

        let mut changed = Vec::new();
        for widget in self.widgets.iter_mut().filter(|w| w.visible) {
            let clamped = widget.frame.clamp_within(bounds);
            if clamped != widget.frame {
                widget.frame = clamped;
                changed.push(widget.kind);
            }
        }
        if !changed.is_empty() {
            self.persist();
        }
        EngineResponse {
            changed,
            collision: None,
        }
    }

    fn reset_layout(&mut self) -> EngineResponse {
        self.widgets = WidgetDescriptor::default_set();
        self.persist();
        EngineResponse {
            changed: self.widgets.iter().map(|w| w.kind).collect(),
            collision: None,
        }
    }

    fn persist(&self) {
        store::persist_state(&self.store, &self.widgets);
    }
}
