mod interaction;
mod layout;
mod palette;
mod render;
mod segments;
mod sides;
mod spacing;
mod types;

pub use interaction::{emphasis, reduce, ChartEvent, Emphasis, GenerationCounter, Selection};
pub use layout::compute_label_layout;
pub use palette::{color_for, palette_index, DEFAULT_PALETTE};
pub use render::{escape_xml, render_chart, ChartStyle};
pub use types::{
    ArcDescriptor, ChartConfig, ChartItem, LabelLayout, LabelSide, Point, Segment,
};
