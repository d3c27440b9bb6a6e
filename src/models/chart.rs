//! Chart configuration models
//!
//! A [`LineChartConfig`] is everything a canvas needs to draw one chart:
//! the category labels, the datasets and the container styling. It carries
//! no drawing-library types so it can be built and inspected without a
//! backend.

use super::RateEntry;

/// Plain RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const ORANGE_RED: Rgb = Rgb(255, 69, 0);
    pub const GREEN_YELLOW: Rgb = Rgb(173, 255, 47);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartType {
    Line,
}

impl ChartType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Line => "line",
        }
    }
}

/// Cosmetic styling applied to the chart container
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub background: Rgb,
    pub text: Rgb,
    pub border_radius: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: Rgb::ORANGE_RED,
            text: Rgb::BLACK,
            border_radius: 15,
        }
    }
}

/// One plotted series
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub border_color: Rgb,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartConfig {
    pub chart_type: ChartType,
    pub title: Option<String>,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub style: ChartStyle,
}

impl LineChartConfig {
    pub const DATASET_LABEL: &'static str = "Divisa";

    /// Build the single-dataset chart for a window of entries
    pub fn from_entries(entries: &[RateEntry]) -> Self {
        Self {
            chart_type: ChartType::Line,
            title: None,
            labels: date_labels(entries),
            datasets: vec![Dataset {
                label: Self::DATASET_LABEL.to_string(),
                border_color: Rgb::GREEN_YELLOW,
                data: rate_values(entries),
            }],
            style: ChartStyle::default(),
        }
    }

    pub fn with_title(mut self, title: Option<&str>) -> Self {
        self.title = title.map(str::to_string);
        self
    }

    /// Number of points on the category axis
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// en-US short date labels (`M/D/YYYY`), one per entry
pub fn date_labels(entries: &[RateEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.date.format("%-m/%-d/%Y").to_string())
        .collect()
}

pub fn rate_values(entries: &[RateEntry]) -> Vec<f64> {
    entries.iter().map(|e| e.value).collect()
}
