//! Chart descriptions in the shape Chart.js expects for `new Chart(ctx, config)`.
//!
//! Formatter callbacks cannot travel as JSON, so tooltips and axis ticks carry a
//! [`CurrencyFormat`] instead; [`ChartConfig::tooltip_label`] and
//! [`ChartConfig::y_tick_label`] produce the text a backend should display.

use chrono::NaiveDate;
use models::{CategoryTotals, DailyTotals};
use serde::Serialize;

/// Slice colours, assigned in order and truncated to the number of labels.
pub const PALETTE: [&str; 10] = [
    "#4E79A7", "#F28E2B", "#E15759", "#76B7B2", "#59A14F", "#EDC949", "#AF7AA1", "#FF9DA7",
    "#9C755F", "#BAB0AB",
];

pub const TEXT_COLOR: &str = "#232526";
pub const LINE_COLOR: &str = "#4E79A7";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Pie,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyFormat {
    pub symbol: String,
    pub decimals: usize,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, decimals: usize) -> Self {
        Self {
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn format(&self, value: f64) -> String {
        format!("{}{:.*}", self.symbol, self.decimals, value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: ColorSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(String),
    PerPoint(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    pub legend: Legend,
    pub tooltip: Tooltip,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
    pub font: Font,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<LegendPosition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<LegendLabels>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabels {
    pub color: String,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tooltip {
    /// Prefix the value with "<label>: ".
    pub show_label: bool,
    pub value_format: CurrencyFormat,
}

impl Tooltip {
    pub fn label(&self, label: &str, value: f64) -> String {
        let value = self.value_format.format(value);
        if self.show_label {
            format!("{label}: {value}")
        } else {
            value
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<AxisTitle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTitle {
    pub display: bool,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ticks {
    pub precision: u32,
    pub format: CurrencyFormat,
}

impl ChartConfig {
    pub fn labels(&self) -> &[String] {
        &self.data.labels
    }

    /// Values of the first dataset.
    pub fn values(&self) -> &[f64] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    pub fn title(&self) -> Option<&str> {
        self.options.plugins.title.as_ref().map(|t| t.text.as_str())
    }

    /// Tooltip text for the point at `index`, if there is one.
    pub fn tooltip_label(&self, index: usize) -> Option<String> {
        let value = *self.values().get(index)?;
        let label = self.labels().get(index).map(String::as_str).unwrap_or("");
        Some(self.options.plugins.tooltip.label(label, value))
    }

    /// Y-axis tick text; `None` for charts without a value axis.
    pub fn y_tick_label(&self, value: f64) -> Option<String> {
        let ticks = self.options.scales.as_ref()?.y.ticks.as_ref()?;
        Some(ticks.format.format(value))
    }
}

/// Full English name of the month containing `date`.
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

pub fn weekly_title(month_name: &str) -> String {
    format!("Expenses in {month_name}")
}

/// Pie of the current month's spending per category.
pub fn pie_chart(totals: CategoryTotals, currency_symbol: &str) -> ChartConfig {
    let (labels, values) = totals.into_parallel();
    let colors = PALETTE
        .iter()
        .take(labels.len())
        .map(|c| c.to_string())
        .collect();

    ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: None,
                data: values,
                background_color: ColorSpec::PerPoint(colors),
                border_color: None,
                fill: None,
                tension: None,
            }],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                title: None,
                legend: Legend {
                    display: true,
                    position: Some(LegendPosition::Bottom),
                    labels: Some(LegendLabels {
                        color: TEXT_COLOR.to_string(),
                        font: Font {
                            size: 13,
                            weight: None,
                        },
                    }),
                },
                tooltip: Tooltip {
                    show_label: true,
                    value_format: CurrencyFormat::new(currency_symbol, 2),
                },
            },
            scales: None,
        },
    }
}

/// Line of spending per key day, titled with the month being shown.
pub fn weekly_line_chart(totals: DailyTotals, month_name: &str, currency_symbol: &str) -> ChartConfig {
    let (labels, values) = totals.into_parallel();

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: Some(format!("Total {currency_symbol}")),
                data: values,
                background_color: ColorSpec::Single(LINE_COLOR.to_string()),
                border_color: Some(LINE_COLOR.to_string()),
                fill: Some(false),
                tension: Some(0.3),
            }],
        },
        options: ChartOptions {
            responsive: true,
            maintain_aspect_ratio: false,
            plugins: Plugins {
                title: Some(Title {
                    display: true,
                    text: weekly_title(month_name),
                    font: Font {
                        size: 16,
                        weight: Some("bold".to_string()),
                    },
                    color: TEXT_COLOR.to_string(),
                }),
                legend: Legend {
                    display: false,
                    position: None,
                    labels: None,
                },
                tooltip: Tooltip {
                    show_label: false,
                    value_format: CurrencyFormat::new(currency_symbol, 2),
                },
            },
            scales: Some(Scales {
                x: Axis {
                    title: Some(AxisTitle {
                        display: true,
                        text: "Day of Month".to_string(),
                    }),
                    ..Axis::default()
                },
                y: Axis {
                    title: None,
                    begin_at_zero: Some(true),
                    ticks: Some(Ticks {
                        precision: 0,
                        format: CurrencyFormat::new(currency_symbol, 0),
                    }),
                },
            }),
        },
    }
}
