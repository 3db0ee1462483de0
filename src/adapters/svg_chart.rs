//! SVG line chart for a generated price series.

use crate::domain::series::PricePoint;

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 40.0;
/// Headroom above and below the price extremes.
const Y_MARGIN: f64 = 2.0;

pub const EMPTY_CHART_TEXT: &str = "No price data available.";

pub fn render_price_chart(series: &[PricePoint]) -> String {
    if series.is_empty() {
        return format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <text x="{cx:.0}" y="{cy:.0}" text-anchor="middle">{EMPTY_CHART_TEXT}</text>
</svg>
"#,
            w = WIDTH,
            h = HEIGHT,
            cx = WIDTH / 2.0,
            cy = HEIGHT / 2.0,
        );
    }

    let min_price = series
        .iter()
        .map(|p| p.price)
        .fold(f64::INFINITY, f64::min)
        - Y_MARGIN;
    let max_price = series
        .iter()
        .map(|p| p.price)
        .fold(f64::NEG_INFINITY, f64::max)
        + Y_MARGIN;

    let plot_width = WIDTH - 2.0 * PADDING;
    let plot_height = HEIGHT - 2.0 * PADDING;

    let scale_y = plot_height / (max_price - min_price);
    let scale_x = if series.len() > 1 {
        plot_width / (series.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<String> = series
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let x = PADDING + i as f64 * scale_x;
            let y = HEIGHT - PADDING - (point.price - min_price) * scale_y;
            format!("{:.1},{:.1}", x, y)
        })
        .collect();

    let first = &series[0];
    let last = &series[series.len() - 1];
    let baseline = HEIGHT - PADDING;
    let label_y = HEIGHT - PADDING / 2.0;

    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}">
  <line x1="{p:.0}" y1="{p:.0}" x2="{p:.0}" y2="{base:.0}" stroke="black"/>
  <line x1="{p:.0}" y1="{base:.0}" x2="{right:.0}" y2="{base:.0}" stroke="black"/>
  <polyline fill="none" stroke="blue" stroke-width="1" points="{points}"/>
  <text x="{p:.0}" y="{ly:.0}" text-anchor="start">{first_label}</text>
  <text x="{right:.0}" y="{ly:.0}" text-anchor="end">{last_label}</text>
  <text x="{p:.0}" y="{top_y:.0}" text-anchor="start">{max:.2}</text>
  <text x="{p:.0}" y="{bottom_y:.0}" text-anchor="start">{min:.2}</text>
</svg>
"#,
        w = WIDTH,
        h = HEIGHT,
        p = PADDING,
        base = baseline,
        right = WIDTH - PADDING,
        points = points.join(" "),
        ly = label_y,
        first_label = first.label,
        last_label = last.label,
        top_y = PADDING - 4.0,
        bottom_y = baseline - 4.0,
        max = max_price,
        min = min_price,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, price: f64) -> PricePoint {
        PricePoint {
            label: label.to_string(),
            price,
        }
    }

    #[test]
    fn empty_series_shows_placeholder() {
        let svg = render_price_chart(&[]);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(EMPTY_CHART_TEXT));
        assert!(!svg.contains("polyline"));
    }

    #[test]
    fn chart_has_dimensions() {
        let svg = render_price_chart(&[point("Now", 100.0)]);
        assert!(svg.contains(r#"width="500""#));
        assert!(svg.contains(r#"height="200""#));
    }

    #[test]
    fn single_point_sits_at_left_edge() {
        let svg = render_price_chart(&[point("Now", 100.0)]);
        // Flat series: the point is centred vertically in the padded domain.
        assert!(svg.contains(r#"points="40.0,100.0""#), "{svg}");
    }

    #[test]
    fn polyline_spans_plot_area() {
        let series = vec![
            point("Aug 1", 98.0),
            point("Aug 2", 100.0),
            point("Now", 102.0),
        ];
        let svg = render_price_chart(&series);
        // y domain is [96, 104]: 98 -> 160 - 2 * 15 = 130, 102 -> 160 - 6 * 15 = 70.
        assert!(
            svg.contains(r#"points="40.0,130.0 250.0,100.0 460.0,70.0""#),
            "{svg}"
        );
    }

    #[test]
    fn labels_first_and_last_points() {
        let series = vec![point("Aug 1", 98.0), point("Now", 102.0)];
        let svg = render_price_chart(&series);
        assert!(svg.contains(">Aug 1</text>"));
        assert!(svg.contains(">Now</text>"));
        assert!(svg.contains(">104.00</text>"));
        assert!(svg.contains(">96.00</text>"));
    }
}
