//! One APA heatmap panel: color scale, score and drawing.
//!
//! For an `n x n` matrix with `q = n / 4` and `t = ceil(n / 4)`:
//! - the color scale is `[0, max(3 * mean(rows ..q, last t cols), 1)]`,
//! - the score is `m[n/2, n/2] / mean(last t rows, cols ..q)`.
//!
//! The corner blocks are taken with the same widths the upstream analysis uses,
//! so for `n` not divisible by 4 the "last quarter" is one wider than the
//! "first quarter". Small matrices (`n < 4`) give empty blocks; their NaN means
//! flow into the scale and score instead of failing.

use std::path::Path;

use ndarray::{Array2, ArrayView2, s};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, warn};

use crate::config::FigureConfig;
use crate::core::colormap::{ColorScale, LinearSegmentedColormap, red_map};
use crate::core::matrix::load_matrix;
use crate::core::naming::panel_label;
use crate::error::ApaError;

const FONT: &str = "sans-serif";
const PANEL_MARGIN: u32 = 4;

/// Everything needed to draw one panel.
#[derive(Debug, Clone)]
pub struct PanelData {
    pub matrix: Array2<f64>,
    pub scale: ColorScale,
    pub score: f64,
    pub x_label: String,
}

impl PanelData {
    /// Measure `matrix` and label it. `path` is only used for error reporting.
    pub fn measure(
        matrix: Array2<f64>,
        path: &Path,
        index: u32,
        is_intra: bool,
    ) -> Result<Self, ApaError> {
        let score = apa_score(&matrix.view()).ok_or_else(|| {
            let (rows, cols) = matrix.dim();
            ApaError::Shape {
                path: path.to_path_buf(),
                rows,
                cols,
            }
        })?;
        let scale = color_scale(&matrix.view());
        let x_label = panel_label(index, is_intra);
        debug!(
            path = %path.display(),
            n = matrix.nrows(),
            high = scale.high,
            score,
            label = %x_label,
            "measured panel"
        );
        Ok(Self {
            matrix,
            scale,
            score,
            x_label,
        })
    }

    pub fn from_file(path: impl AsRef<Path>, index: u32, is_intra: bool) -> Result<Self, ApaError> {
        let path = path.as_ref();
        let matrix = load_matrix(path)?;
        Self::measure(matrix, path, index, is_intra)
    }

    pub fn title(&self) -> String {
        score_title(self.score)
    }
}

/// Rows `..q`, last `t` columns.
fn top_right<'a>(m: &ArrayView2<'a, f64>) -> ArrayView2<'a, f64> {
    let (rows, cols) = m.dim();
    let n = rows;
    let r_end = (n / 4).min(rows);
    let c_start = cols.saturating_sub(n.div_ceil(4));
    m.clone().slice_move(s![..r_end, c_start..])
}

/// Last `t` rows, columns `..q`.
fn bottom_left<'a>(m: &ArrayView2<'a, f64>) -> ArrayView2<'a, f64> {
    let (rows, cols) = m.dim();
    let n = rows;
    let r_start = rows.saturating_sub(n.div_ceil(4));
    let c_end = (n / 4).min(cols);
    m.clone().slice_move(s![r_start.., ..c_end])
}

fn block_mean(block: &ArrayView2<f64>, what: &str) -> f64 {
    match block.mean() {
        Some(mean) => mean,
        None => {
            warn!(block = what, "mean of empty block");
            f64::NAN
        }
    }
}

/// Color scale `[0, max(3 * mean(top-right), 1)]`. A NaN mean is kept as the
/// upper bound rather than clamped.
pub fn color_scale(m: &ArrayView2<f64>) -> ColorScale {
    let upper = 3.0 * block_mean(&top_right(m), "top-right");
    let high = if upper.is_nan() { upper } else { upper.max(1.0) };
    ColorScale::new(0.0, high)
}

/// Centre value over the bottom-left mean. `None` when the centre element
/// does not exist (empty matrix, or too few columns).
pub fn apa_score(m: &ArrayView2<f64>) -> Option<f64> {
    let c = m.nrows() / 2;
    let centre = *m.get((c, c))?;
    let denom = block_mean(&bottom_left(m), "bottom-left");
    if denom == 0.0 {
        warn!(centre, "divide by zero in APA score");
    }
    Some(centre / denom)
}

/// `APA score: x.xx`; non-finite scores print as `nan`, `inf`, `-inf`.
pub fn score_title(score: f64) -> String {
    let value = if score.is_nan() {
        "nan".to_string()
    } else if score.is_infinite() {
        if score > 0.0 { "inf" } else { "-inf" }.to_string()
    } else {
        format!("{score:.2}")
    };
    format!("APA score: {value}")
}

/// Horizontal padding that keeps the heatmap cells square inside `area`.
fn square_padding(area_px: (u32, u32), style: &FigureConfig) -> u32 {
    let (w, h) = area_px;
    let label_area = style.label_font_px + PANEL_MARGIN;
    let caption = style.title_font_px + 2 * PANEL_MARGIN;
    let plot_h = h.saturating_sub(caption + label_area + 2 * PANEL_MARGIN);
    let plot_w = w.saturating_sub(2 * PANEL_MARGIN);
    let side = plot_h.min(plot_w);
    PANEL_MARGIN + (plot_w - side) / 2
}

/// Draw `matrix` as a heatmap into `area`, row 0 at the top.
///
/// Tick labels are hidden and tick marks have zero length; the frame stays.
/// Cells whose color is undefined (NaN value or NaN scale) are left unpainted.
#[allow(clippy::too_many_arguments)]
pub fn render_panel<DB: DrawingBackend>(
    matrix: &Array2<f64>,
    color_map: &LinearSegmentedColormap,
    scale_low: f64,
    scale_high: f64,
    score: f64,
    area: &DrawingArea<DB, Shift>,
    x_label: &str,
    style: &FigureConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let scale = ColorScale::new(scale_low, scale_high);
    let (rows, cols) = matrix.dim();
    let (x_max, y_max) = (cols.max(1) as f64, rows.max(1) as f64);
    let pad = square_padding(area.dim_in_pixel(), style);

    let mut chart = ChartBuilder::on(area)
        .caption(score_title(score), (FONT, style.title_font_px))
        .margin(PANEL_MARGIN)
        .margin_left(pad)
        .margin_right(pad)
        .x_label_area_size(style.label_font_px + PANEL_MARGIN)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(0)
        .y_labels(0)
        .set_all_tick_mark_size(0)
        .x_desc(x_label)
        .axis_desc_style((FONT, style.label_font_px))
        .draw()?;

    chart.draw_series(matrix.indexed_iter().filter_map(|((r, c), &v)| {
        let color = color_map.map_value(v, scale)?;
        let (x, y) = (c as f64, (rows - r - 1) as f64);
        Some(Rectangle::new([(x, y), (x + 1.0, y + 1.0)], color.filled()))
    }))?;

    chart.draw_series(std::iter::once(Rectangle::new(
        [(0.0, 0.0), (x_max, y_max)],
        BLACK.stroke_width(1),
    )))?;

    Ok(())
}

/// Draw a measured panel with `color_map`.
pub fn render_panel_data<DB: DrawingBackend>(
    panel: &PanelData,
    color_map: &LinearSegmentedColormap,
    area: &DrawingArea<DB, Shift>,
    style: &FigureConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    render_panel(
        &panel.matrix,
        color_map,
        panel.scale.low,
        panel.scale.high,
        panel.score,
        area,
        &panel.x_label,
        style,
    )
}

/// Load the matrix at `path`, measure it and draw it with the red map.
pub fn render_from_file<DB: DrawingBackend>(
    path: impl AsRef<Path>,
    area: &DrawingArea<DB, Shift>,
    intra_index: u32,
    is_intra: bool,
    style: &FigureConfig,
) -> Result<(), ApaError> {
    let panel = PanelData::from_file(path, intra_index, is_intra)?;
    render_panel_data(&panel, red_map(), area, style).map_err(ApaError::render)
}
