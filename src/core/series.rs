//! Composing the panel series into one figure.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageFormat;
use plotters::coord::Shift;
use plotters::prelude::*;
use svg2pdf::usvg;
use tracing::{debug, info};

use crate::config::{FigureConfig, PanelSpec, SeriesConfig};
use crate::core::colormap::{LinearSegmentedColormap, red_map};
use crate::core::naming::{inter_name, intra_name};
use crate::core::panel::{PanelData, render_panel_data};
use crate::error::ApaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Svg,
    Pdf,
}

impl OutputFormat {
    /// Format implied by the extension of `path`; no extension means PNG.
    pub fn from_path(path: &Path) -> Result<Self, ApaError> {
        let ext = match path.extension() {
            Some(ext) if !ext.is_empty() => ext.to_string_lossy().to_ascii_lowercase(),
            _ => return Ok(OutputFormat::Png),
        };
        match ext.as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "bmp" => Ok(OutputFormat::Bmp),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            _ => Err(ApaError::UnsupportedFormat {
                path: path.to_path_buf(),
                extension: ext,
            }),
        }
    }

    fn image_format(self) -> Option<ImageFormat> {
        match self {
            OutputFormat::Png => Some(ImageFormat::Png),
            OutputFormat::Jpeg => Some(ImageFormat::Jpeg),
            OutputFormat::Bmp => Some(ImageFormat::Bmp),
            OutputFormat::Svg | OutputFormat::Pdf => None,
        }
    }
}

/// Destination file and format for `path`. A path without extension gets
/// `.png` appended.
pub fn output_target(path: &Path) -> Result<(PathBuf, OutputFormat), ApaError> {
    let format = OutputFormat::from_path(path)?;
    let has_ext = path.extension().is_some_and(|ext| !ext.is_empty());
    let target = if has_ext {
        path.to_path_buf()
    } else {
        path.with_extension("png")
    };
    Ok((target, format))
}

/// Input file of `spec` under `stem`.
pub fn panel_path(stem: &str, spec: &PanelSpec) -> String {
    match spec {
        PanelSpec::Intra { index } => intra_name(stem, *index),
        PanelSpec::Inter => inter_name(stem),
    }
}

/// Render the standard 8 intra + 1 inter series for `input_stem` into
/// `output_path`.
pub fn compose_series(input_stem: &str, output_path: impl AsRef<Path>) -> Result<(), ApaError> {
    compose_series_with(input_stem, output_path, &SeriesConfig::default())
}

/// Render the panels of `config` in order and save the figure.
///
/// Every input is loaded before the output is touched, so any load error
/// leaves no file behind. The output format is checked after loading.
pub fn compose_series_with(
    input_stem: &str,
    output_path: impl AsRef<Path>,
    config: &SeriesConfig,
) -> Result<(), ApaError> {
    let target = output_target(output_path.as_ref());

    let mut panels = Vec::with_capacity(config.panels.len());
    for spec in &config.panels {
        let path = panel_path(input_stem, spec);
        panels.push(PanelData::from_file(&path, spec.index(), spec.is_intra())?);
    }
    let (output_path, format) = target?;

    let (w, h) = config.figure.pixel_size();
    debug!(panels = panels.len(), width = w, height = h, ?format, "drawing figure");

    match format.image_format() {
        Some(image_format) => {
            let mut buf = vec![0u8; w as usize * h as usize * 3];
            {
                let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
                draw_figure(&root, &panels, red_map(), &config.figure)
                    .map_err(ApaError::render)?;
            }
            image::save_buffer_with_format(
                &output_path,
                &buf,
                w,
                h,
                image::ColorType::Rgb8,
                image_format,
            )?;
        }
        None => {
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (w, h)).into_drawing_area();
                draw_figure(&root, &panels, red_map(), &config.figure)
                    .map_err(ApaError::render)?;
            }
            if format == OutputFormat::Pdf {
                fs::write(&output_path, svg_to_pdf(&svg)?)?;
            } else {
                fs::write(&output_path, svg)?;
            }
        }
    }

    info!(path = %output_path.display(), "saved APA series");
    Ok(())
}

/// Convert a rendered SVG document to a single-page PDF.
fn svg_to_pdf(svg: &str) -> Result<Vec<u8>, ApaError> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| ApaError::Pdf(e.to_string()))?;
    svg2pdf::to_pdf(
        &tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| ApaError::Pdf(e.to_string()))
}

/// Fill the canvas and draw `panels` side by side in one row.
pub fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    panels: &[PanelData],
    color_map: &LinearSegmentedColormap,
    style: &FigureConfig,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    if !panels.is_empty() {
        let areas = root.split_evenly((1, panels.len()));
        for (panel, area) in panels.iter().zip(areas.iter()) {
            render_panel_data(panel, color_map, area, style)?;
        }
    }
    root.present()?;
    Ok(())
}
