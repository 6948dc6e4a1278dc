use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::common::geometry::Size;

/// Pixels per abstract grid unit. Size hints and legacy persisted layouts are
/// expressed in grid units and resolved to pixels through this multiplier.
pub const GRID_PX: f64 = 80.0;

/// The fixed set of dashboard panels. Every kind has exactly one descriptor
/// in the widget list; unknown kinds in persisted state are dropped during
/// migration.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WidgetKind {
    UpcomingEvents,
    StaffOnDuty,
    EquipmentStatus,
    WarehouseStock,
    RevenueChart,
    ActivityFeed,
    QuickNotes,
    CalendarPeek,
}

/// Per-kind sizing declared in grid units: (width, height).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SizeHints {
    pub default: (u32, u32),
    pub min: (u32, u32),
    pub max: (u32, u32),
}

impl WidgetKind {
    pub const fn hints(self) -> SizeHints {
        use WidgetKind::*;
        match self {
            UpcomingEvents => SizeHints {
                default: (5, 4),
                min: (3, 2),
                max: (10, 8),
            },
            StaffOnDuty => SizeHints {
                default: (4, 3),
                min: (2, 2),
                max: (8, 6),
            },
            EquipmentStatus => SizeHints {
                default: (4, 3),
                min: (2, 2),
                max: (8, 6),
            },
            WarehouseStock => SizeHints {
                default: (5, 3),
                min: (3, 2),
                max: (10, 6),
            },
            RevenueChart => SizeHints {
                default: (6, 4),
                min: (3, 2),
                max: (12, 8),
            },
            ActivityFeed => SizeHints {
                default: (4, 5),
                min: (2, 3),
                max: (6, 10),
            },
            QuickNotes => SizeHints {
                default: (3, 3),
                min: (2, 2),
                max: (6, 6),
            },
            CalendarPeek => SizeHints {
                default: (4, 4),
                min: (3, 3),
                max: (8, 8),
            },
        }
    }

    pub fn title(self) -> &'static str {
        use WidgetKind::*;
        match self {
            UpcomingEvents => "Upcoming events",
            StaffOnDuty => "Staff on duty",
            EquipmentStatus => "Equipment status",
            WarehouseStock => "Warehouse stock",
            RevenueChart => "Revenue",
            ActivityFeed => "Activity feed",
            QuickNotes => "Quick notes",
            CalendarPeek => "Calendar",
        }
    }

    pub fn default_size_px(self) -> Size {
        let (w, h) = self.hints().default;
        Size::new(w as f64 * GRID_PX, h as f64 * GRID_PX)
    }

    pub fn min_size_px(self) -> Size {
        let (w, h) = self.hints().min;
        Size::new(w as f64 * GRID_PX, h as f64 * GRID_PX)
    }

    pub fn max_size_px(self) -> Size {
        let (w, h) = self.hints().max;
        Size::new(w as f64 * GRID_PX, h as f64 * GRID_PX)
    }
}
