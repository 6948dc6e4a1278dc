pub mod arrange;
pub mod collision;
pub mod engine;
pub mod registry;

pub use arrange::{ArrangeItem, arrange};
pub use engine::{EngineResponse, LayoutEngine, WidgetCommand};
pub use registry::{GRID_PX, SizeHints, WidgetKind};

pub use crate::model::widget::WidgetDescriptor;
