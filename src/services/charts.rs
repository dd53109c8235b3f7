//! Chart builders.
//!
//! Each builder returns a [`Figure`] that serializes to the JSON shape
//! plotly.js expects (`{ "data": [...], "layout": {...} }`), so the dashboard
//! page can hand it straight to `Plotly.newPlot`.

use rand::Rng;
use serde::Serialize;

use crate::helpers::round_1dp;

const CHART_HEIGHT: u32 = 300;
const CHART_MARGIN: u32 = 40;
const TRANSPARENT: &str = "rgba(0,0,0,0)";
const GRID_COLOR: &str = "rgba(255,255,255,0.1)";
const FONT_COLOR: &str = "white";
const PRIMARY: &str = "#6366f1";
const ACCENT: &str = "#10b981";

/// Maximum number of points drawn on the temperature chart.
pub const TEMPERATURE_POINTS: usize = 6;
/// Baseline for generated temperature filler (°C).
const FILLER_BASELINE_C: f64 = 20.0;
/// Maximum deviation of generated filler from the baseline (°C).
const FILLER_SPREAD_C: f64 = 3.0;

pub const HUMIDITY_AXIS: [f64; 2] = [0.0, 100.0];
pub const WIND_AXIS: [f64; 2] = [0.0, 20.0];

/// A renderable chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Scatter(ScatterTrace),
    Indicator(IndicatorTrace),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    pub mode: String,
    pub line: Line,
    pub marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorTrace {
    pub mode: String,
    pub value: f64,
    pub title: Title,
    pub gauge: Gauge,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    pub axis: GaugeAxis,
    pub bar: Bar,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeAxis {
    pub range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub color: String,
}

/// A colored band on a gauge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub range: [f64; 2],
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub paper_bgcolor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    pub font: Font,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisStyle>,
    pub height: u32,
    pub margin: Margin,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisStyle {
    pub gridcolor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

/// One point of a temperature series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub label: String,
    pub temperature_c: f64,
}

fn base_layout() -> Layout {
    Layout {
        paper_bgcolor: TRANSPARENT.to_string(),
        plot_bgcolor: None,
        font: Font {
            color: FONT_COLOR.to_string(),
        },
        xaxis: None,
        yaxis: None,
        height: CHART_HEIGHT,
        margin: Margin {
            l: CHART_MARGIN,
            r: CHART_MARGIN,
            t: CHART_MARGIN,
            b: CHART_MARGIN,
        },
    }
}

/// Line chart of temperatures.
///
/// Uses up to [`TEMPERATURE_POINTS`] points of `forecast` when given, otherwise
/// "Hour 1".."Hour 6" filler around 20°C drawn from `rng`.
pub fn temperature_chart<R: Rng>(forecast: Option<&[ForecastPoint]>, rng: &mut R) -> Figure {
    let (x, y): (Vec<String>, Vec<f64>) = match forecast {
        Some(points) => points
            .iter()
            .take(TEMPERATURE_POINTS)
            .map(|p| (p.label.clone(), p.temperature_c))
            .unzip(),
        None => (1..=TEMPERATURE_POINTS)
            .map(|i| {
                let t = FILLER_BASELINE_C + rng.random_range(-FILLER_SPREAD_C..=FILLER_SPREAD_C);
                (format!("Hour {}", i), round_1dp(t))
            })
            .unzip(),
    };

    let grid = AxisStyle {
        gridcolor: GRID_COLOR.to_string(),
    };

    Figure {
        data: vec![Trace::Scatter(ScatterTrace {
            x,
            y,
            mode: "lines+markers".to_string(),
            line: Line {
                color: PRIMARY.to_string(),
                width: 3,
            },
            marker: Marker { size: 8 },
        })],
        layout: Layout {
            plot_bgcolor: Some(TRANSPARENT.to_string()),
            xaxis: Some(grid.clone()),
            yaxis: Some(grid),
            ..base_layout()
        },
    }
}

fn gauge(title: &str, value: f64, axis: [f64; 2], bar: &str, steps: Vec<Step>) -> Figure {
    Figure {
        data: vec![Trace::Indicator(IndicatorTrace {
            mode: "gauge+number".to_string(),
            value,
            title: Title {
                text: title.to_string(),
            },
            gauge: Gauge {
                axis: GaugeAxis { range: axis },
                bar: Bar {
                    color: bar.to_string(),
                },
                steps,
            },
        })],
        layout: base_layout(),
    }
}

fn step(from: f64, to: f64, color: &str) -> Step {
    Step {
        range: [from, to],
        color: color.to_string(),
    }
}

/// Humidity gauge, 0–100 %.
pub fn humidity_gauge(humidity_pct: f64) -> Figure {
    gauge(
        "Humidity (%)",
        humidity_pct,
        HUMIDITY_AXIS,
        ACCENT,
        vec![
            step(0.0, 50.0, "rgba(16, 185, 129, 0.2)"),
            step(50.0, 100.0, "rgba(16, 185, 129, 0.4)"),
        ],
    )
}

/// Wind speed gauge, 0–20 m/s.
pub fn wind_gauge(wind_speed_mps: f64) -> Figure {
    gauge(
        "Wind Speed (m/s)",
        wind_speed_mps,
        WIND_AXIS,
        PRIMARY,
        vec![
            step(0.0, 5.0, "rgba(99, 102, 241, 0.2)"),
            step(5.0, 10.0, "rgba(99, 102, 241, 0.4)"),
            step(10.0, 20.0, "rgba(99, 102, 241, 0.6)"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn indicator(fig: &Figure) -> &IndicatorTrace {
        match &fig.data[0] {
            Trace::Indicator(t) => t,
            other => panic!("expected indicator trace, got {:?}", other),
        }
    }

    fn scatter(fig: &Figure) -> &ScatterTrace {
        match &fig.data[0] {
            Trace::Scatter(t) => t,
            other => panic!("expected scatter trace, got {:?}", other),
        }
    }

    #[test]
    fn test_humidity_gauge() {
        let fig = humidity_gauge(65.0);
        let trace = indicator(&fig);
        assert_eq!(trace.value, 65.0);
        assert_eq!(trace.gauge.axis.range, [0.0, 100.0]);
        assert_eq!(trace.gauge.steps.len(), 2);
        assert_eq!(fig.layout.height, 300);
    }

    #[test]
    fn test_wind_gauge() {
        let fig = wind_gauge(3.5);
        let trace = indicator(&fig);
        assert_eq!(trace.value, 3.5);
        assert_eq!(trace.gauge.axis.range, [0.0, 20.0]);
        let bands: Vec<[f64; 2]> = trace.gauge.steps.iter().map(|s| s.range).collect();
        assert_eq!(bands, vec![[0.0, 5.0], [5.0, 10.0], [10.0, 20.0]]);
    }

    #[test]
    fn test_out_of_range_values_are_kept() {
        assert_eq!(indicator(&wind_gauge(35.0)).value, 35.0);
        assert_eq!(indicator(&humidity_gauge(-5.0)).value, -5.0);
    }

    #[test]
    fn test_temperature_filler() {
        let mut rng = StdRng::seed_from_u64(11);
        let fig = temperature_chart(None, &mut rng);
        let trace = scatter(&fig);
        assert_eq!(
            trace.x,
            vec!["Hour 1", "Hour 2", "Hour 3", "Hour 4", "Hour 5", "Hour 6"]
        );
        assert!(trace.y.iter().all(|t| (17.0..=23.0).contains(t)));
        assert_eq!(trace.line.width, 3);
        assert_eq!(trace.marker.size, 8);
    }

    #[test]
    fn test_temperature_forecast_is_truncated() {
        let points: Vec<ForecastPoint> = (0..10)
            .map(|i| ForecastPoint {
                label: format!("{:02}:00", i),
                temperature_c: i as f64,
            })
            .collect();
        let mut rng = StdRng::seed_from_u64(0);
        let fig = temperature_chart(Some(&points), &mut rng);
        let trace = scatter(&fig);
        assert_eq!(trace.x.len(), 6);
        assert_eq!(trace.x[0], "00:00");
        assert_eq!(trace.y, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_figure_json_shape() {
        let json = serde_json::to_value(humidity_gauge(65.0)).unwrap();
        assert_eq!(json["data"][0]["type"], "indicator");
        assert_eq!(json["data"][0]["mode"], "gauge+number");
        assert_eq!(json["data"][0]["gauge"]["axis"]["range"][1], 100.0);
        assert_eq!(json["layout"]["margin"]["l"], 40);
        assert!(json["layout"].get("xaxis").is_none());

        let mut rng = StdRng::seed_from_u64(0);
        let json = serde_json::to_value(temperature_chart(None, &mut rng)).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert_eq!(json["layout"]["yaxis"]["gridcolor"], "rgba(255,255,255,0.1)");
    }
}
