use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{LineChartConfig, RateEntry, Rgb};
use crate::services::convert_service::{self, ConversionError};

/// Number of trailing entries that are charted and converted
pub const WINDOW_SIZE: usize = 10;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to draw chart: {0}")]
    Draw(String),

    #[error("Chart file error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// Something that can turn a chart configuration into a file
pub trait ChartCanvas {
    fn draw(&self, config: &LineChartConfig, path: &Path) -> Result<(), ChartError>;
}

/// The live chart: a drawn file plus the configuration it was drawn from
#[derive(Debug)]
pub struct ChartHandle {
    path: PathBuf,
    config: LineChartConfig,
}

impl ChartHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    /// Remove the chart. A file that is already gone counts as destroyed.
    pub fn destroy(self) -> Result<(), ChartError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Destroyed chart {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Where new charts get drawn
pub struct ChartTarget<'a> {
    pub canvas: &'a dyn ChartCanvas,
    pub path: &'a Path,
}

/// What a render produced: the result line and the chart now alive, if any
#[derive(Debug)]
pub struct RenderOutcome {
    pub result_text: String,
    pub chart: Option<ChartHandle>,
}

/// Last [`WINDOW_SIZE`] entries of a series
pub fn last_window(series: &[RateEntry]) -> &[RateEntry] {
    &series[series.len().saturating_sub(WINDOW_SIZE)..]
}

/// Destroy the outgoing chart. A file that cannot be removed is logged and
/// left behind; the handle is gone either way.
fn discard(previous: Option<ChartHandle>) {
    if let Some(chart) = previous {
        let path = chart.path.clone();
        if let Err(e) = chart.destroy() {
            warn!("Failed to remove chart {}: {}", path.display(), e);
        }
    }
}

/// Render a series: display the converted total and replace the chart.
///
/// `previous` is always consumed. With no data, or data that cannot be
/// converted, it is destroyed and no new chart is drawn. Otherwise it is
/// destroyed right before the new chart is drawn to `target.path`.
pub fn render(
    series: Option<&[RateEntry]>,
    amount: f64,
    previous: Option<ChartHandle>,
    target: &ChartTarget<'_>,
    title: Option<&str>,
) -> Result<RenderOutcome, ChartError> {
    let series = series.unwrap_or_default();

    if series.is_empty() {
        debug!("Empty series, clearing chart");
        discard(previous);
        return Ok(RenderOutcome {
            result_text: convert_service::format_result(None),
            chart: None,
        });
    }

    let window = last_window(series);
    let total = match convert_service::convert_amount(amount, window) {
        Ok(total) => total,
        Err(e) => {
            warn!("Cannot convert {}: {}", amount, e);
            discard(previous);
            return Err(e.into());
        }
    };

    let config = LineChartConfig::from_entries(window).with_title(title);

    discard(previous);
    target.canvas.draw(&config, target.path)?;
    info!("Chart drawn to {} ({} points)", target.path.display(), config.len());

    Ok(RenderOutcome {
        result_text: convert_service::format_result(Some(total)),
        chart: Some(ChartHandle {
            path: target.path.to_path_buf(),
            config,
        }),
    })
}

/// Output format picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => ChartFormat::Svg,
            _ => ChartFormat::Png,
        }
    }
}

/// Draws charts with plotters, PNG or SVG by file extension
pub struct PlottersCanvas {
    pub width: u32,
    pub height: u32,
}

impl PlottersCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ChartCanvas for PlottersCanvas {
    fn draw(&self, config: &LineChartConfig, path: &Path) -> Result<(), ChartError> {
        debug!(
            "Drawing {} chart of {} points to {}",
            config.chart_type.as_str(),
            config.len(),
            path.display()
        );
        let size = (self.width, self.height);
        match ChartFormat::from_path(path) {
            ChartFormat::Svg => draw_line_chart(SVGBackend::new(path, size).into_drawing_area(), config),
            ChartFormat::Png => draw_line_chart(BitMapBackend::new(path, size).into_drawing_area(), config),
        }
    }
}

fn to_rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Fill the whole area with `color`, cutting the corners to `radius`
fn fill_rounded<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    color: RGBColor,
    radius: u32,
) -> Result<(), ChartError> {
    let (w, h) = root.dim_in_pixel();
    let r = radius.min(w / 2).min(h / 2) as i32;
    let (w, h) = (w as i32, h as i32);

    root.draw(&Rectangle::new([(r, 0), (w - r, h)], color.filled()))
        .map_err(draw_err)?;
    root.draw(&Rectangle::new([(0, r), (w, h - r)], color.filled()))
        .map_err(draw_err)?;
    if r > 0 {
        for center in [(r, r), (w - r - 1, r), (r, h - r - 1), (w - r - 1, h - r - 1)] {
            root.draw(&Circle::new(center, r, color.filled()))
                .map_err(draw_err)?;
        }
    }
    Ok(())
}

fn draw_line_chart<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    config: &LineChartConfig,
) -> Result<(), ChartError> {
    if config.is_empty() {
        return Err(ChartError::Draw("no labels to plot".to_string()));
    }
    let text_color = to_rgb(config.style.text);

    root.fill(&to_rgb(Rgb::WHITE)).map_err(draw_err)?;
    fill_rounded(&root, to_rgb(config.style.background), config.style.border_radius)?;

    let values: Vec<f64> = config
        .datasets
        .iter()
        .flat_map(|d| d.data.iter().copied())
        .collect();
    let min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min_value.is_finite() || !max_value.is_finite() {
        return Err(ChartError::Draw("no finite values to plot".to_string()));
    }

    // Pad the value range so a flat series is still visible
    let value_range = (max_value - min_value).max(1e-8);
    let padding = value_range * 0.1;
    let last_index = (config.len() as i32 - 1).max(1);

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(70);
    if let Some(title) = &config.title {
        builder.caption(title, ("sans-serif", 24).into_font().color(&text_color));
    }
    let mut chart = builder
        .build_cartesian_2d(0i32..last_index, (min_value - padding)..(max_value + padding))
        .map_err(draw_err)?;

    let labels = &config.labels;
    let label_formatter = |x: &i32| {
        usize::try_from(*x)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .x_labels(labels.len().max(2))
        .x_label_formatter(&label_formatter)
        .label_style(("sans-serif", 12).into_font().color(&text_color))
        .axis_style(&text_color)
        .draw()
        .map_err(draw_err)?;

    for dataset in &config.datasets {
        let color = to_rgb(dataset.border_color);
        chart
            .draw_series(LineSeries::new(
                dataset.data.iter().enumerate().map(|(i, v)| (i as i32, *v)),
                color.stroke_width(2),
            ))
            .map_err(draw_err)?
            .label(dataset.label.clone())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 12).into_font().color(&text_color))
        .border_style(&text_color)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}
