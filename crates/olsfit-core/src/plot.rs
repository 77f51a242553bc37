use log::{debug, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PLOT_HEIGHT: u32 = 500;
pub const PLOT_WIDTH: u32 = 800;

const BG_COLOR: RGBColor = RGBColor(229, 212, 143);
const PLOT_BG_COLOR: RGBColor = RGBColor(211, 211, 211);
const POINT_COLOR: RGBColor = RGBColor(8, 146, 50);
const LINE_COLOR: RGBColor = RGBColor(255, 76, 0);

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("nothing to plot")]
    NoData,
    #[error("x, y and predictions differ in length: {len_x}, {len_y}, {len_pred}")]
    LengthMismatch { len_x: usize, len_y: usize, len_pred: usize },
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Axis range over the finite values, padded by 5% on each side.
pub fn padded_range<'a, I: IntoIterator<Item = &'a f64>>(values: I) -> Option<Range<f64>> {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;

    let span = max - min;
    if span == 0.0 {
        return Some((min - 1.0)..(max + 1.0));
    }
    Some((min - span * 0.05)..(max + span * 0.05))
}

/// Title, axis descriptions and legend entries of a regression plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotText {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub points: String,
    pub line: String,
}

impl Default for PlotText {
    fn default() -> Self {
        Self {
            title: "Linear regression".to_owned(),
            x_desc: "x".to_owned(),
            y_desc: "y".to_owned(),
            points: "Observed".to_owned(),
            line: "Fitted line".to_owned(),
        }
    }
}

fn draw_err<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Draw(e.to_string())
}

/// Draws the observations as dots and the fitted line through `y_pred`.
///
/// With `text`, the chart also gets a caption, labelled axes and a legend.
/// Without it nothing needs a font.
pub fn draw_regression<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    y_pred: &[f64],
    text: Option<&PlotText>,
) -> Result<(), PlotError> {
    if x.len() != y.len() || x.len() != y_pred.len() {
        return Err(PlotError::LengthMismatch {
            len_x: x.len(),
            len_y: y.len(),
            len_pred: y_pred.len(),
        });
    }
    let x_range = padded_range(x).ok_or(PlotError::NoData)?;
    let y_range = padded_range(y.iter().chain(y_pred)).ok_or(PlotError::NoData)?;

    root.fill(&BG_COLOR).map_err(draw_err)?;

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if let Some(text) = text {
        builder
            .caption(text.title.as_str(), ("sans-serif", 22))
            .x_label_area_size(40)
            .y_label_area_size(70);
    }
    let mut ctx = builder.build_cartesian_2d(x_range, y_range).map_err(draw_err)?;
    ctx.plotting_area().fill(&PLOT_BG_COLOR).map_err(draw_err)?;

    if let Some(text) = text {
        ctx.configure_mesh()
            .x_desc(text.x_desc.as_str())
            .y_desc(text.y_desc.as_str())
            .draw()
            .map_err(draw_err)?;
    }

    let points = ctx
        .draw_series(
            x.iter().zip(y).map(|(&xi, &yi)| Circle::new((xi, yi), 3, POINT_COLOR.filled())),
        )
        .map_err(draw_err)?;
    if let Some(text) = text {
        points
            .label(text.points.as_str())
            .legend(|(lx, ly)| Circle::new((lx, ly), 3, POINT_COLOR.filled()));
    }

    let mut line: Vec<(f64, f64)> = x.iter().copied().zip(y_pred.iter().copied()).collect();
    line.sort_by(|a, b| a.0.total_cmp(&b.0));
    let fitted = ctx
        .draw_series(LineSeries::new(line, LINE_COLOR.stroke_width(2)))
        .map_err(draw_err)?;
    if let Some(text) = text {
        fitted.label(text.line.as_str()).legend(|(lx, ly)| {
            PathElement::new(vec![(lx, ly), (lx + 20, ly)], LINE_COLOR.stroke_width(2))
        });
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(draw_err)?;
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

/// `<plot_dir>/<csv stem>.png`
pub fn plot_path(plot_dir: &Path, csv_path: &Path) -> PathBuf {
    let stem = csv_path.file_stem().and_then(|s| s.to_str()).unwrap_or("regression");
    plot_dir.join(format!("{stem}.png"))
}

/// Writes the plot as PNG. If the labelled chart cannot be drawn (no usable
/// system font), the data and line are still saved without text.
pub fn save_regression_png(
    path: &Path,
    x: &[f64],
    y: &[f64],
    y_pred: &[f64],
    text: &PlotText,
) -> Result<(), PlotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let root = BitMapBackend::new(path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    match draw_regression(&root, x, y, y_pred, Some(text)) {
        Ok(()) => {},
        Err(PlotError::Draw(msg)) => {
            warn!("Could not draw plot labels ({}), saving without text", msg);
            draw_regression(&root, x, y, y_pred, None)?;
        },
        Err(e) => return Err(e),
    }
    debug!("Plot saved to {}", path.display());
    Ok(())
}
