pub mod migrate;
pub mod store;
pub mod widget;

pub use widget::WidgetDescriptor;
