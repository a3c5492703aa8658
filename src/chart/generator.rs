//! Stacked-area SVG chart of modeled daily cost and profit.
//!
//! Hand-rendered SVG: the cost series is drawn as the bottom band, profit
//! stacked on top of it, with a dashed vertical marker at the regime
//! cutover. The stacked top edge therefore traces modeled revenue (after
//! the profit floor).

use crate::economics::model::ModeledRow;
use crate::utils::error::ChartError;
use chrono::{Datelike, Duration, NaiveDate};
use log::{debug, info};

const MARGIN_LEFT: usize = 70;
const MARGIN_RIGHT: usize = 25;
const MARGIN_TOP: usize = 45;
const MARGIN_BOTTOM: usize = 55;

const COST_COLOR: &str = "#e74c3c";
const PROFIT_COLOR: &str = "#2ecc71";

/// Chart configuration
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub title: String,
    pub width: usize,
    pub height: usize,
    /// Annotation next to the cutover marker
    pub cutover_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Modeled Sequencer Economics".to_string(),
            width: 1000,
            height: 600,
            cutover_label: "EIP-4844 (Dencun)".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Generate the stacked-area SVG from the modeled series
///
/// **Public** - main entry point for chart generation
///
/// # Arguments
/// * `rows` - modeled series in date order
/// * `cutover` - where to draw the regime marker
/// * `config` - optional title/size overrides
///
/// # Errors
/// * `ChartError::EmptySeries` - no finite rows to draw
/// * `ChartError::DegenerateGeometry` - configured size leaves no plot area
pub fn generate_chart(
    rows: &[ModeledRow],
    cutover: NaiveDate,
    config: Option<&ChartConfig>,
) -> Result<String, ChartError> {
    let config = config.cloned().unwrap_or_default();

    // Rows with non-finite values cannot be placed on the canvas
    let rows: Vec<&ModeledRow> = rows
        .iter()
        .filter(|r| r.cost_eth.is_finite() && r.profit_eth.is_finite())
        .collect();

    if rows.is_empty() {
        return Err(ChartError::EmptySeries);
    }

    if config.width <= MARGIN_LEFT + MARGIN_RIGHT + 100
        || config.height <= MARGIN_TOP + MARGIN_BOTTOM + 100
    {
        return Err(ChartError::DegenerateGeometry(config.width, config.height));
    }

    info!("Generating stacked-area chart for {} days", rows.len());

    let plot_w = (config.width - MARGIN_LEFT - MARGIN_RIGHT) as f64;
    let plot_h = (config.height - MARGIN_TOP - MARGIN_BOTTOM) as f64;

    let first = rows[0].date;
    let last = rows[rows.len() - 1].date;
    let day_span = (last - first).num_days().max(1) as f64;

    // Scale to the stacked peak with a little headroom
    let peak = rows
        .iter()
        .map(|r| r.cost_eth + r.profit_eth)
        .fold(0.0_f64, f64::max);
    let y_max = if peak > 0.0 { peak * 1.05 } else { 1.0 };

    let x_pos = |date: NaiveDate| -> f64 {
        MARGIN_LEFT as f64 + (date - first).num_days() as f64 / day_span * plot_w
    };
    let y_pos = |value: f64| -> f64 { MARGIN_TOP as f64 + plot_h * (1.0 - value / y_max) };

    let mut svg = String::new();

    // Header
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = config.width,
        h = config.height
    ));

    // Styles
    svg.push_str(
        r#"<style>text { font: 12px sans-serif; } .axis { stroke: #333; stroke-width: 1; } .grid { stroke: #ddd; stroke-width: 0.5; }</style>"#,
    );

    svg.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="white"/>"#,
        config.width, config.height
    ));

    // Title
    svg.push_str(&format!(
        r#"<text x="{}" y="24" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        config.width / 2,
        config.title
    ));

    render_y_axis(&mut svg, y_max, config.width, &y_pos);
    render_x_axis(&mut svg, first, last, config.height, &x_pos);

    // Cost band: baseline up to the cost edge
    let baseline = y_pos(0.0);
    let cost_path = area_path(&rows, baseline, |r| y_pos(r.cost_eth), &x_pos);
    svg.push_str(&format!(
        r#"<path d="{}" fill="{}" fill-opacity="0.9"/>"#,
        cost_path, COST_COLOR
    ));

    // Profit band: cost edge up to the stacked (revenue) edge
    let profit_path = band_path(
        &rows,
        |r| y_pos(r.cost_eth),
        |r| y_pos(r.cost_eth + r.profit_eth),
        &x_pos,
    );
    svg.push_str(&format!(
        r#"<path d="{}" fill="{}" fill-opacity="0.9"/>"#,
        profit_path, PROFIT_COLOR
    ));

    // Plot frame
    svg.push_str(&format!(
        r#"<line class="axis" x1="{l}" y1="{t}" x2="{l}" y2="{b}"/><line class="axis" x1="{l}" y1="{b}" x2="{r}" y2="{b}"/>"#,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = config.height - MARGIN_BOTTOM,
        r = config.width - MARGIN_RIGHT,
    ));

    render_cutover_marker(&mut svg, cutover, first, last, &config, &x_pos);
    render_legend(&mut svg, config.height);

    svg.push_str("</svg>");

    debug!("Chart rendered ({} bytes)", svg.len());

    Ok(svg)
}

/// Area polygon from the baseline to a top edge
///
/// **Private** - `M` at the baseline, along the top edge, back down, close
fn area_path(
    rows: &[&ModeledRow],
    baseline: f64,
    top: impl Fn(&ModeledRow) -> f64,
    x_pos: &impl Fn(NaiveDate) -> f64,
) -> String {
    let mut d = format!("M {:.2} {:.2}", x_pos(rows[0].date), baseline);
    for &row in rows {
        d.push_str(&format!(" L {:.2} {:.2}", x_pos(row.date), top(row)));
    }
    d.push_str(&format!(
        " L {:.2} {:.2} Z",
        x_pos(rows[rows.len() - 1].date),
        baseline
    ));
    d
}

/// Band polygon between a lower and an upper edge
///
/// **Private** - along the upper edge forward, lower edge in reverse, close
fn band_path(
    rows: &[&ModeledRow],
    lower: impl Fn(&ModeledRow) -> f64,
    upper: impl Fn(&ModeledRow) -> f64,
    x_pos: &impl Fn(NaiveDate) -> f64,
) -> String {
    let mut d = format!("M {:.2} {:.2}", x_pos(rows[0].date), upper(rows[0]));
    for &row in rows.iter().skip(1) {
        d.push_str(&format!(" L {:.2} {:.2}", x_pos(row.date), upper(row)));
    }
    for &row in rows.iter().rev() {
        d.push_str(&format!(" L {:.2} {:.2}", x_pos(row.date), lower(row)));
    }
    d.push('Z');
    d
}

fn render_y_axis(
    svg: &mut String,
    y_max: f64,
    width: usize,
    y_pos: &impl Fn(f64) -> f64,
) {
    const TICKS: usize = 5;
    for i in 0..=TICKS {
        let value = y_max * i as f64 / TICKS as f64;
        let y = y_pos(value);
        svg.push_str(&format!(
            r#"<line class="grid" x1="{}" y1="{y:.2}" x2="{}" y2="{y:.2}"/>"#,
            MARGIN_LEFT,
            width - MARGIN_RIGHT,
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{:.2}" text-anchor="end">{:.2}</text>"#,
            MARGIN_LEFT - 6,
            y + 4.0,
            value
        ));
    }

    // Axis label, rotated along the left edge
    svg.push_str(&format!(
        r#"<text x="16" y="{:.0}" transform="rotate(-90 16 {:.0})" text-anchor="middle">Daily Value (ETH)</text>"#,
        y_pos(y_max / 2.0),
        y_pos(y_max / 2.0)
    ));
}

fn render_x_axis(
    svg: &mut String,
    first: NaiveDate,
    last: NaiveDate,
    height: usize,
    x_pos: &impl Fn(NaiveDate) -> f64,
) {
    let label_y = height - MARGIN_BOTTOM + 18;

    // Tick on the first day and on every month boundary in the window
    let mut ticks = vec![first];
    let mut date = first + Duration::days(1);
    while date <= last {
        if date.day0() == 0 {
            ticks.push(date);
        }
        date += Duration::days(1);
    }

    for tick in ticks {
        let x = x_pos(tick);
        svg.push_str(&format!(
            r#"<line class="axis" x1="{x:.2}" y1="{}" x2="{x:.2}" y2="{}"/>"#,
            height - MARGIN_BOTTOM,
            height - MARGIN_BOTTOM + 5,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{label_y}" text-anchor="middle">{}</text>"#,
            tick.format("%b %d")
        ));
    }

    svg.push_str(&format!(
        r#"<text x="{:.2}" y="{}" text-anchor="middle">Date</text>"#,
        x_pos(first) + (x_pos(last) - x_pos(first)) / 2.0,
        height - 14
    ));
}

/// Dashed vertical marker at the regime cutover, skipped when the cutover
/// falls outside the charted window
fn render_cutover_marker(
    svg: &mut String,
    cutover: NaiveDate,
    first: NaiveDate,
    last: NaiveDate,
    config: &ChartConfig,
    x_pos: &impl Fn(NaiveDate) -> f64,
) {
    if cutover < first || cutover > last {
        debug!("Cutover {} outside charted window, marker skipped", cutover);
        return;
    }

    let x = x_pos(cutover);
    svg.push_str(&format!(
        r#"<line x1="{x:.2}" y1="{}" x2="{x:.2}" y2="{}" stroke="black" stroke-width="1.5" stroke-dasharray="6 4"/>"#,
        MARGIN_TOP,
        config.height - MARGIN_BOTTOM,
    ));
    svg.push_str(&format!(
        r#"<text x="{:.2}" y="{}" font-weight="bold">{}</text>"#,
        x + 6.0,
        MARGIN_TOP + 14,
        config.cutover_label
    ));
}

fn render_legend(svg: &mut String, height: usize) {
    let items = [
        ("Estimated L1 Data Cost", COST_COLOR),
        ("Sequencer Gross Profit", PROFIT_COLOR),
    ];

    let legend_y = height - 14;
    for (i, (label, color)) in items.iter().enumerate() {
        let x = MARGIN_LEFT + 120 + i * 220;
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="14" height="14" fill="{}" rx="2"/>"#,
            x,
            legend_y - 11,
            color
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}">{}</text>"#,
            x + 20,
            legend_y,
            label
        ));
    }
}
