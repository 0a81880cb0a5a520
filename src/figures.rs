//! Plotly-shaped figure values.
//!
//! A `Figure` is the `{data, layout}` pair plotly.js consumes. Embedding
//! figures pass through from the bundle untouched; only the seasonality
//! detail figure is assembled here, reproducing the offline producer's
//! trace styling exactly.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::artifact::SeasonalityRecord;
use crate::calendar::{month_ticks, MONTHS};

pub const TITLE_WRAP_WIDTH: usize = 60;

const BAND_FILL: &str = "rgba(68, 68, 68, 0.15)";
const MEAN_LINE: &str = "rgb(31, 119, 180)";
const DETAIL_HEIGHT: u32 = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    pub fn new(data: Vec<Value>, layout: Value) -> Self {
        Self { data, layout }
    }

    /// Degraded placeholder returned when a selector lookup fails. Keeps the
    /// plot region rendered and the page responsive instead of erroring.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            layout: json!({"height": DETAIL_HEIGHT, "showlegend": false}),
        }
    }
}

/// Greedy word wrap joined with `<br>`, the line-break marker plotly titles
/// understand. A single word longer than `width` gets its own line.
pub fn wrap_title(name: &str, width: usize) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in name.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
        } else if line.len() + 1 + word.len() <= width {
            line.push(' ');
            line.push_str(word);
        } else {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines.join("<br>")
}

/// The seasonality detail figure: three stacked-fill traces over a shared
/// implicit week-of-year x-axis. Trace order matters: the lower bound is
/// plotted first so the mean's `tonexty` fill shades down to it, and the
/// upper bound's fill shades down to the mean.
pub fn seasonality_figure(record: &SeasonalityRecord, cond_name: &str) -> Figure {
    let lower: Vec<f64> = record.hpd.iter().map(|b| b[0]).collect();
    let upper: Vec<f64> = record.hpd.iter().map(|b| b[1]).collect();

    let lower_bound = json!({
        "y": lower,
        "name": "Lower bound",
        "mode": "lines",
        "marker": {"color": BAND_FILL},
        "line": {"width": 0},
    });
    let mean = json!({
        "y": record.mean,
        "name": "Mean",
        "mode": "lines",
        "line": {"color": MEAN_LINE},
        "fillcolor": BAND_FILL,
        "fill": "tonexty",
    });
    let upper_bound = json!({
        "y": upper,
        "name": "Upper bound",
        "mode": "lines",
        "marker": {"color": "#444"},
        "line": {"width": 0},
        "fillcolor": BAND_FILL,
        "fill": "tonexty",
    });

    let layout = json!({
        "font": {"family": "Helvetica"},
        "yaxis": {
            "title": "DR seasonal fluctuation (95% C.I.)",
            "showexponent": "last",
            "tickformat": ",.0%",
        },
        "xaxis": {
            "tickvals": month_ticks(),
            "ticktext": MONTHS,
        },
        "height": DETAIL_HEIGHT,
        "title": wrap_title(cond_name, TITLE_WRAP_WIDTH),
        "showlegend": false,
    });

    Figure::new(vec![lower_bound, mean, upper_bound], layout)
}
