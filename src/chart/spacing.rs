use super::types::Segment;

/// Enforce the minimum vertical gap between stacked labels on each side.
///
/// Single forward pass per side over the top-to-bottom order: the first
/// label keeps its true position, every later label is pushed down just far
/// enough to clear the one above it. Crowding is absorbed downward on
/// purpose; the topmost label stays anchored to its real geometry at the
/// cost of longer leader lines further down a crowded column.
pub fn space_labels(
    segments: Vec<Segment>,
    left_order: &[usize],
    right_order: &[usize],
    min_spacing: f64,
) -> Vec<Segment> {
    let mut segments = segments;
    space_side(&mut segments, left_order, min_spacing);
    space_side(&mut segments, right_order, min_spacing);
    segments
}

fn space_side(segments: &mut [Segment], order: &[usize], min_spacing: f64) {
    let mut floor = f64::NEG_INFINITY;
    for &idx in order {
        let seg = &mut segments[idx];
        seg.adjusted_y = seg.raw_label_y.max(floor);
        seg.label_pos.y = seg.adjusted_y;
        floor = seg.adjusted_y + min_spacing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::segments::build_segments;
    use crate::chart::sides::{balance_sides, classify_sides, side_orders};
    use crate::chart::types::{ChartConfig, ChartItem};

    fn config(min_spacing: f64) -> ChartConfig {
        ChartConfig {
            center_x: 200.0,
            center_y: 200.0,
            radius: 120.0,
            label_distance: 140.0,
            min_spacing,
        }
    }

    fn spaced(values: &[f64], min_spacing: f64) -> (Vec<Segment>, Vec<usize>, Vec<usize>) {
        let items: Vec<ChartItem> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| ChartItem {
                id: format!("s{}", i),
                label: format!("s{}", i),
                value: v,
                color_key: format!("s{}", i),
            })
            .collect();
        let cfg = config(min_spacing);
        let segments = balance_sides(classify_sides(build_segments(&items, &cfg), &cfg), &cfg);
        let (left, right) = side_orders(&segments);
        let segments = space_labels(segments, &left, &right, min_spacing);
        (segments, left, right)
    }

    #[test]
    fn test_uncrowded_labels_keep_raw_position() {
        let (segments, _, _) = spaced(&[30.0, 30.0, 40.0], 5.0);
        for seg in &segments {
            assert_eq!(seg.adjusted_y, seg.raw_label_y);
        }
    }

    #[test]
    fn test_crowded_side_respects_min_spacing() {
        // Many slim wedges collide near the top of the right column.
        let (segments, left, right) = spaced(&[2.0, 2.0, 2.0, 2.0, 2.0, 90.0], 24.0);
        for order in [&left, &right] {
            for pair in order.windows(2) {
                let gap = segments[pair[1]].adjusted_y - segments[pair[0]].adjusted_y;
                assert!(gap >= 24.0 - 1e-9, "gap {} below min spacing", gap);
            }
        }
    }

    #[test]
    fn test_never_moves_a_label_upward() {
        let (segments, _, _) = spaced(&[2.0, 2.0, 2.0, 2.0, 2.0, 90.0], 24.0);
        for seg in &segments {
            assert!(seg.adjusted_y >= seg.raw_label_y);
        }
    }

    #[test]
    fn test_first_label_per_side_is_exact() {
        let (segments, left, right) = spaced(&[2.0, 2.0, 2.0, 2.0, 2.0, 90.0], 24.0);
        for order in [&left, &right] {
            if let Some(&top) = order.first() {
                assert_eq!(segments[top].adjusted_y, segments[top].raw_label_y);
            }
        }
    }

    #[test]
    fn test_label_pos_follows_adjusted_y() {
        let (segments, _, _) = spaced(&[2.0, 2.0, 2.0, 2.0, 2.0, 90.0], 24.0);
        for seg in &segments {
            assert_eq!(seg.label_pos.y, seg.adjusted_y);
        }
    }
}
