/// A 2D point in chart coordinates (SVG convention, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Which label column a segment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Left,
    Right,
}

impl LabelSide {
    pub fn opposite(self) -> Self {
        match self {
            LabelSide::Left => LabelSide::Right,
            LabelSide::Right => LabelSide::Left,
        }
    }

    /// Sign of a horizontal offset pointing away from the chart center
    pub fn sign(self) -> f64 {
        match self {
            LabelSide::Left => -1.0,
            LabelSide::Right => 1.0,
        }
    }
}

/// One weighted entry of the breakdown, owned by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct ChartItem {
    pub id: String,
    pub label: String,
    pub value: f64,
    /// Key for deterministic color assignment; entries sharing a key share a color
    pub color_key: String,
}

/// Geometry configuration for one chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    /// Distance from the center to each label's anchor point
    pub label_distance: f64,
    /// Minimum vertical gap between stacked labels on one side
    pub min_spacing: f64,
}

impl ChartConfig {
    /// Config for a chart centered in a square canvas of the given size
    pub fn centered(size: f64, min_spacing: f64) -> Self {
        let radius = size * 0.3;
        Self {
            center_x: size / 2.0,
            center_y: size / 2.0,
            radius,
            label_distance: radius + size * 0.05,
            min_spacing,
        }
    }
}

/// Everything a renderer needs to draw one wedge without further trigonometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcDescriptor {
    pub center: Point,
    pub radius: f64,
    pub start_point: Point,
    pub end_point: Point,
    /// SVG large-arc flag; set for any sweep over half the circle
    pub large_arc: bool,
    /// A 0-360 arc command degenerates to nothing; draw a closed circle instead
    pub full_circle: bool,
}

/// One wedge of the chart plus its label placement.
///
/// Angles are in degrees, clockwise, with 0 at the 12 o'clock position.
/// The placement fields (`side`, `label_pos`, `raw_label_y`, `adjusted_y`)
/// start at their pre-placement values and are owned by the classify,
/// balance and spacing stages.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: String,
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    pub arc: ArcDescriptor,
    /// Inner endpoint of the leader line, `label_distance` out along `mid_angle`
    pub anchor: Point,
    pub color_key: String,
    pub side: LabelSide,
    /// Label box anchor; x is offset outward from `anchor`, y follows `adjusted_y`
    pub label_pos: Point,
    pub raw_label_y: f64,
    pub adjusted_y: f64,
}

/// Finished layout: segments in input order plus top-to-bottom side orders.
///
/// `left_order` and `right_order` hold indices into `segments`.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub segments: Vec<Segment>,
    pub left_order: Vec<usize>,
    pub right_order: Vec<usize>,
}
