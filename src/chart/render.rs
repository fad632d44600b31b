use crate::fonts::TextMeasure;

use super::interaction::{emphasis, Emphasis, Selection};
use super::layout::compute_label_layout;
use super::palette::{color_for, DEFAULT_PALETTE};
use super::types::{ArcDescriptor, ChartConfig, ChartItem, LabelLayout, Segment};

const LEADER_TICK: f64 = 6.0;
const TEXT_GAP: f64 = 10.0;
const DIM_OPACITY: f32 = 0.35;

/// Style configuration for chart rendering
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub background: String,
    pub text_color: String,
    pub muted_text: String,
    pub leader_stroke: String,
    pub wedge_stroke: String,
    pub palette: Vec<String>,
    pub font_family: String,
    pub font_size: f32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: "transparent".to_string(),
            text_color: "#333333".to_string(),
            muted_text: "#666666".to_string(),
            leader_stroke: "#999999".to_string(),
            wedge_stroke: "#ffffff".to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            font_family: "sans-serif".to_string(),
            font_size: 13.0,
        }
    }
}

impl ChartStyle {
    pub fn from_theme(theme: &crate::theme::Theme) -> Self {
        Self {
            background: theme.background_color.clone(),
            text_color: theme.text_color.clone(),
            muted_text: theme.muted_text_color.clone(),
            leader_stroke: theme.leader_color.clone(),
            wedge_stroke: theme.background_color.clone(),
            palette: theme.palette.clone(),
            font_family: "sans-serif".to_string(),
            font_size: 13.0,
        }
    }
}

/// Escape XML special characters
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a labeled allocation chart to an SVG fragment.
///
/// Computes the label layout for `items` and draws wedges, leader lines and
/// external labels. Returns `(svg, width, height)` with all content shifted
/// into positive coordinates; the caller wraps it in an `<svg>` element and
/// adds padding. A breakdown with no drawable data renders as a muted
/// placeholder message.
pub fn render_chart<T: TextMeasure>(
    items: &[ChartItem],
    config: &ChartConfig,
    style: &ChartStyle,
    selection: &Selection,
    measure: &mut T,
) -> Result<(String, f32, f32), String> {
    let Some(layout) = compute_label_layout(items, config) else {
        return Ok(render_no_data(config, style));
    };

    let bounds = layout_bounds(&layout, config, style, measure);
    let dx = -bounds.0;
    let dy = -bounds.1;

    let mut svg = String::new();
    svg.push_str(&format!(r#"<g transform="translate({:.2},{:.2})">"#, dx, dy));

    // Wedges first, leader lines and text on top.
    for seg in &layout.segments {
        svg.push_str(&render_wedge(seg, style, selection));
    }
    for seg in &layout.segments {
        svg.push_str(&render_label(seg, style, selection));
    }

    svg.push_str("</g>");

    let width = (bounds.2 - bounds.0) as f32;
    let height = (bounds.3 - bounds.1) as f32;
    Ok((svg, width, height))
}

fn render_no_data(config: &ChartConfig, style: &ChartStyle) -> (String, f32, f32) {
    let width = (config.center_x * 2.0).max(120.0);
    let height = (config.center_y * 2.0).max(60.0);
    let svg = format!(
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" fill="{}" text-anchor="middle">No data</text>"#,
        width / 2.0,
        height / 2.0,
        style.font_family,
        style.font_size,
        style.muted_text
    );
    (svg, width as f32, height as f32)
}

fn render_wedge(seg: &Segment, style: &ChartStyle, selection: &Selection) -> String {
    let fill = color_for(&seg.color_key, &style.palette);
    let (stroke_width, opacity_attr) = match emphasis(selection, None, &seg.id) {
        Emphasis::Active => (2.5, String::new()),
        Emphasis::Dimmed => (1.0, format!(r#" fill-opacity="{}""#, DIM_OPACITY)),
        Emphasis::Neutral => (1.0, String::new()),
    };

    let arc = &seg.arc;
    if arc.full_circle {
        // A 0-360 arc command renders as nothing; the degenerate single
        // segment is a plain circle.
        return format!(
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}" stroke="{}" stroke-width="{:.1}"{} />"#,
            arc.center.x, arc.center.y, arc.radius, fill, style.wedge_stroke, stroke_width,
            opacity_attr
        );
    }

    format!(
        r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{:.1}"{} />"#,
        wedge_path(arc),
        fill,
        style.wedge_stroke,
        stroke_width,
        opacity_attr
    )
}

fn wedge_path(arc: &ArcDescriptor) -> String {
    format!(
        "M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z",
        arc.center.x,
        arc.center.y,
        arc.start_point.x,
        arc.start_point.y,
        arc.radius,
        arc.radius,
        if arc.large_arc { 1 } else { 0 },
        arc.end_point.x,
        arc.end_point.y,
    )
}

fn render_label(seg: &Segment, style: &ChartStyle, selection: &Selection) -> String {
    let mut svg = String::new();
    let seg_emphasis = emphasis(selection, None, &seg.id);
    let opacity_attr = if seg_emphasis == Emphasis::Dimmed {
        format!(r#" opacity="{}""#, DIM_OPACITY)
    } else {
        String::new()
    };

    let sign = seg.side.sign();
    let elbow_x = seg.label_pos.x;
    let tick_x = elbow_x + LEADER_TICK * sign;

    svg.push_str(&format!(
        r#"<polyline points="{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}" fill="none" stroke="{}" stroke-width="1"{} />"#,
        seg.anchor.x, seg.anchor.y, elbow_x, seg.adjusted_y, tick_x, seg.adjusted_y,
        style.leader_stroke, opacity_attr
    ));

    let text_x = elbow_x + TEXT_GAP * sign;
    let text_y = seg.adjusted_y + f64::from(style.font_size) / 3.0;
    let text_anchor = if sign < 0.0 { "end" } else { "start" };
    let weight_attr = if seg_emphasis == Emphasis::Active {
        r#" font-weight="bold""#
    } else {
        ""
    };

    svg.push_str(&format!(
        r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.1}" fill="{}" text-anchor="{}"{}{}>{}</text>"#,
        text_x,
        text_y,
        style.font_family,
        style.font_size,
        style.text_color,
        text_anchor,
        weight_attr,
        opacity_attr,
        escape_xml(&label_text(seg)),
    ));

    svg
}

fn label_text(seg: &Segment) -> String {
    format!("{} {:.1}%", seg.label, seg.percentage)
}

/// Bounding box of the whole chart: wedges, anchors and measured label text.
/// Returns `(min_x, min_y, max_x, max_y)`.
fn layout_bounds<T: TextMeasure>(
    layout: &LabelLayout,
    config: &ChartConfig,
    style: &ChartStyle,
    measure: &mut T,
) -> (f64, f64, f64, f64) {
    let mut min_x = config.center_x - config.label_distance;
    let mut max_x = config.center_x + config.label_distance;
    let mut min_y = config.center_y - config.label_distance;
    let mut max_y = config.center_y + config.label_distance;

    for seg in &layout.segments {
        let (text_w, text_h) = measure.measure_label(&label_text(seg), style.font_size, false);
        let sign = seg.side.sign();
        let text_x = seg.label_pos.x + TEXT_GAP * sign;
        let far_x = text_x + f64::from(text_w) * sign;

        min_x = min_x.min(text_x.min(far_x));
        max_x = max_x.max(text_x.max(far_x));
        min_y = min_y.min(seg.adjusted_y - f64::from(text_h));
        max_y = max_y.max(seg.adjusted_y + f64::from(text_h));
    }

    (min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::types::ChartItem;

    /// Fixed-advance measurer so renderer tests stay independent of any
    /// installed fonts.
    struct FixedMeasure;

    impl TextMeasure for FixedMeasure {
        fn measure_label(&mut self, text: &str, font_size: f32, _bold: bool) -> (f32, f32) {
            (text.chars().count() as f32 * font_size * 0.6, font_size * 1.2)
        }
    }

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

    fn render(items: &[ChartItem], selection: &Selection) -> (String, f32, f32) {
        render_chart(
            items,
            &config(),
            &ChartStyle::default(),
            selection,
            &mut FixedMeasure,
        )
        .unwrap()
    }

    #[test]
    fn test_renders_wedge_leader_and_text_per_segment() {
        let (svg, _, _) = render(
            &[item("stocks", 60.0), item("bonds", 40.0)],
            &Selection::default(),
        );
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<text").count(), 2);
        assert!(svg.contains("stocks 60.0%"));
        assert!(svg.contains("bonds 40.0%"));
    }

    #[test]
    fn test_single_segment_renders_as_circle() {
        let (svg, _, _) = render(&[item("all", 5.0)], &Selection::default());
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
        assert!(svg.contains("all 100.0%"));
    }

    #[test]
    fn test_no_data_placeholder() {
        let (svg, width, height) = render(&[item("a", 0.0)], &Selection::default());
        assert!(svg.contains("No data"));
        assert!(width > 0.0 && height > 0.0);
    }

    #[test]
    fn test_selection_dims_other_segments() {
        let selection = Selection {
            active_segment_id: Some("bonds".to_string()),
        };
        let (svg, _, _) = render(
            &[item("stocks", 60.0), item("bonds", 40.0)],
            &selection,
        );
        assert!(svg.contains("fill-opacity"));
        assert!(svg.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_neutral_render_has_no_dimming() {
        let (svg, _, _) = render(
            &[item("stocks", 60.0), item("bonds", 40.0)],
            &Selection::default(),
        );
        assert!(!svg.contains("fill-opacity"));
        assert!(!svg.contains("font-weight"));
    }

    #[test]
    fn test_label_text_is_escaped() {
        let items = [ChartItem {
            id: "x".to_string(),
            label: "Stocks & <Shares>".to_string(),
            value: 1.0,
            color_key: "x".to_string(),
        }];
        let (svg, _, _) = render(&items, &Selection::default());
        assert!(svg.contains("Stocks &amp; &lt;Shares&gt;"));
        assert!(!svg.contains("<Shares>"));
    }

    #[test]
    fn test_fragment_is_well_formed_xml() {
        let items: Vec<ChartItem> = (0..6)
            .map(|i| item(&format!("s{}", i), 5.0 + i as f64))
            .collect();
        let (svg, _, _) = render(&items, &Selection::default());

        let mut reader = quick_xml::Reader::from_str(&svg);
        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("generated SVG is not well-formed XML: {}", e),
            }
            buf.clear();
        }
    }
}
