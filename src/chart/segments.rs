use super::types::{ArcDescriptor, ChartConfig, ChartItem, LabelSide, Point, Segment};

/// Project an angle onto a circle around `center`.
///
/// Chart angles are measured clockwise from 12 o'clock, so rotate by -90
/// degrees before the standard trig projection (y grows downward in SVG,
/// which makes positive angles sweep clockwise).
pub(crate) fn point_at(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = (angle_deg - 90.0).to_radians();
    Point {
        x: center.x + radius * rad.cos(),
        y: center.y + radius * rad.sin(),
    }
}

/// Turn weighted items into angular pie segments.
///
/// Items with a non-positive value are discarded. Returns an empty vector
/// when nothing survives; callers treat that as "no data". Segments come out
/// in input order and the cumulative sweep of the last one is clamped to
/// exactly 360 degrees.
pub fn build_segments(items: &[ChartItem], config: &ChartConfig) -> Vec<Segment> {
    let survivors: Vec<&ChartItem> = items.iter().filter(|item| item.value > 0.0).collect();
    let total: f64 = survivors.iter().map(|item| item.value).sum();
    if survivors.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    let center = Point {
        x: config.center_x,
        y: config.center_y,
    };
    // A single surviving item covers the whole circle. Handled explicitly:
    // a naive 0-360 arc command renders as nothing.
    let full_circle = survivors.len() == 1;
    let last = survivors.len() - 1;

    let mut segments = Vec::with_capacity(survivors.len());
    let mut cursor = 0.0_f64;

    for (i, item) in survivors.iter().enumerate() {
        let percentage = item.value / total * 100.0;
        let start_angle = cursor;
        // Clamp the final sweep so float drift cannot open a seam between
        // the last and first wedge.
        let end_angle = if i == last {
            360.0
        } else {
            cursor + percentage / 100.0 * 360.0
        };
        let mid_angle = (start_angle + end_angle) / 2.0;
        let anchor = point_at(center, config.label_distance, mid_angle);

        let arc = ArcDescriptor {
            center,
            radius: config.radius,
            start_point: point_at(center, config.radius, start_angle),
            end_point: point_at(center, config.radius, end_angle),
            large_arc: percentage > 50.0 || full_circle,
            full_circle,
        };

        segments.push(Segment {
            id: item.id.clone(),
            label: item.label.clone(),
            value: item.value,
            percentage,
            start_angle,
            end_angle,
            mid_angle,
            arc,
            anchor,
            color_key: item.color_key.clone(),
            side: LabelSide::Right,
            label_pos: anchor,
            raw_label_y: anchor.y,
            adjusted_y: anchor.y,
        });

        cursor = end_angle;
    }

    segments
}
