use super::types::{ChartConfig, LabelSide, Point, Segment};

/// Horizontal gap between a label's anchor point and its label box
pub(crate) const LABEL_OFFSET: f64 = 14.0;

/// Assign each segment a label side from its anchor's position relative to
/// the vertical centerline, plus a provisional label box position.
pub fn classify_sides(segments: Vec<Segment>, config: &ChartConfig) -> Vec<Segment> {
    segments
        .into_iter()
        .map(|mut seg| {
            seg.side = if seg.anchor.x < config.center_x {
                LabelSide::Left
            } else {
                LabelSide::Right
            };
            seg.label_pos = Point {
                x: seg.anchor.x + LABEL_OFFSET * seg.side.sign(),
                y: seg.anchor.y,
            };
            seg.raw_label_y = seg.anchor.y;
            seg.adjusted_y = seg.anchor.y;
            seg
        })
        .collect()
}

/// Rebalance side assignment so the two label columns differ by at most one.
///
/// When one side is over-populated, the segments whose anchors sit nearest
/// the centerline are the weakest fit for either side, so those are the ones
/// moved across. Moving flips the side flag and mirrors the label box across
/// the anchor; `raw_label_y` is untouched. Ties on centerline distance keep
/// input order (the sort is stable), so the result is deterministic.
pub fn balance_sides(segments: Vec<Segment>, config: &ChartConfig) -> Vec<Segment> {
    let n = segments.len();
    if n < 2 {
        return segments;
    }

    let left: Vec<usize> = indices_on(&segments, LabelSide::Left);
    let right: Vec<usize> = indices_on(&segments, LabelSide::Right);
    if left.len().abs_diff(right.len()) <= 1 {
        return segments;
    }

    let target = n.div_ceil(2);
    let mut crowded = if left.len() > right.len() { left } else { right };
    crowded.sort_by(|&a, &b| {
        let da = (segments[a].anchor.x - config.center_x).abs();
        let db = (segments[b].anchor.x - config.center_x).abs();
        da.total_cmp(&db)
    });

    let moves = crowded.len() - target;
    let mut segments = segments;
    for &idx in crowded.iter().take(moves) {
        let seg = &mut segments[idx];
        seg.side = seg.side.opposite();
        seg.label_pos.x = seg.anchor.x + LABEL_OFFSET * seg.side.sign();
    }
    segments
}

/// Top-to-bottom ordering of each side, as indices into `segments`.
///
/// Sorted fresh by `raw_label_y` rather than carried over from the angular
/// order: segments moved by the balancer land out of order relative to their
/// new neighbors.
pub fn side_orders(segments: &[Segment]) -> (Vec<usize>, Vec<usize>) {
    let mut left = indices_on(segments, LabelSide::Left);
    let mut right = indices_on(segments, LabelSide::Right);
    let by_raw_y = |&a: &usize, &b: &usize| {
        segments[a].raw_label_y.total_cmp(&segments[b].raw_label_y)
    };
    left.sort_by(by_raw_y);
    right.sort_by(by_raw_y);
    (left, right)
}

fn indices_on(segments: &[Segment], side: LabelSide) -> Vec<usize> {
    segments
        .iter()
        .enumerate()
        .filter(|(_, seg)| seg.side == side)
        .map(|(i, _)| i)
        .collect()
}
