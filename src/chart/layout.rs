use super::segments::build_segments;
use super::sides::{balance_sides, classify_sides, side_orders};
use super::spacing::space_labels;
use super::types::{ChartConfig, ChartItem, LabelLayout};

/// Compute the full external-label layout for a radial breakdown.
///
/// Runs the pipeline stages in order: build segments, classify sides,
/// balance the columns, space the labels. Every call recomputes from
/// scratch; identical input produces an identical layout. Returns `None`
/// when no item has a positive value.
pub fn compute_label_layout(items: &[ChartItem], config: &ChartConfig) -> Option<LabelLayout> {
    let segments = build_segments(items, config);
    if segments.is_empty() {
        return None;
    }

    let segments = classify_sides(segments, config);
    let segments = balance_sides(segments, config);
    let (left_order, right_order) = side_orders(&segments);
    let segments = space_labels(segments, &left_order, &right_order, config.min_spacing);

    Some(LabelLayout {
        segments,
        left_order,
        right_order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, value: f64) -> ChartItem {
        ChartItem {
            id: id.to_string(),
            label: id.to_string(),
            value,
            color_key: id.to_string(),
        }
    }

    fn config() -> ChartConfig {
        ChartConfig {
            center_x: 200.0,
            center_y: 200.0,
            radius: 120.0,
            label_distance: 140.0,
            min_spacing: 18.0,
        }
    }

    #[test]
    fn test_empty_input_has_no_layout() {
        assert!(compute_label_layout(&[], &config()).is_none());
        assert!(compute_label_layout(&[item("A", 0.0), item("B", -2.0)], &config()).is_none());
    }

    #[test]
    fn test_segments_keep_input_order() {
        let items = [item("C", 10.0), item("A", 50.0), item("B", 40.0)];
        let layout = compute_label_layout(&items, &config()).unwrap();
        let ids: Vec<&str> = layout.segments.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["C", "A", "B"]);
    }

    #[test]
    fn test_orders_cover_every_segment_once() {
        let items: Vec<ChartItem> = (0..9)
            .map(|i| item(&format!("s{}", i), 3.0 + i as f64))
            .collect();
        let layout = compute_label_layout(&items, &config()).unwrap();

        let mut seen: Vec<usize> = layout
            .left_order
            .iter()
            .chain(layout.right_order.iter())
            .copied()
            .collect();
        seen.sort_unstable();
        let expected: Vec<usize> = (0..layout.segments.len()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_layout_is_pure() {
        let items = [
            item("stocks", 61.0),
            item("bonds", 18.5),
            item("gold", 9.0),
            item("cash", 11.5),
        ];
        let cfg = config();
        let a = compute_label_layout(&items, &cfg).unwrap();
        let b = compute_label_layout(&items, &cfg).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_crowded_breakdown_end_to_end() {
        // Five equal slivers plus a dominant segment: forces balancing, and
        // the wide min spacing forces collisions on both columns.
        let items: Vec<ChartItem> = [10.0, 10.0, 10.0, 10.0, 10.0, 50.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| item(&format!("s{}", i), v))
            .collect();
        let mut cfg = config();
        cfg.min_spacing = 140.0;
        let layout = compute_label_layout(&items, &cfg).unwrap();

        assert!(layout.left_order.len().abs_diff(layout.right_order.len()) <= 1);
        for order in [&layout.left_order, &layout.right_order] {
            for pair in order.windows(2) {
                let gap =
                    layout.segments[pair[1]].adjusted_y - layout.segments[pair[0]].adjusted_y;
                assert!(gap >= cfg.min_spacing - 1e-9);
            }
        }
        for seg in &layout.segments {
            assert!(seg.adjusted_y >= seg.raw_label_y);
        }
    }
}
