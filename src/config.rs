use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ApaError;

/// One panel of the series, in drawing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PanelSpec {
    Intra { index: u32 },
    Inter,
}

impl PanelSpec {
    pub fn is_intra(&self) -> bool {
        matches!(self, PanelSpec::Intra { .. })
    }

    /// Distance-bin index; inter panels report 0, which nothing reads.
    pub fn index(&self) -> u32 {
        match self {
            PanelSpec::Intra { index } => *index,
            PanelSpec::Inter => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    #[serde(default = "FigureConfig::default_width_in")]
    pub width_in: f32,
    #[serde(default = "FigureConfig::default_height_in")]
    pub height_in: f32,
    #[serde(default = "FigureConfig::default_dpi")]
    pub dpi: f32,
    #[serde(default = "FigureConfig::default_title_font_px")]
    pub title_font_px: u32,
    #[serde(default = "FigureConfig::default_label_font_px")]
    pub label_font_px: u32,
}

impl FigureConfig {
    fn default_width_in() -> f32 {
        16.0
    }
    fn default_height_in() -> f32 {
        2.0
    }
    fn default_dpi() -> f32 {
        100.0
    }
    fn default_title_font_px() -> u32 {
        14
    }
    fn default_label_font_px() -> u32 {
        12
    }

    /// Canvas size in pixels, at least 1x1.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |inches: f32| ((inches * self.dpi).round() as u32).max(1);
        (px(self.width_in), px(self.height_in))
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: Self::default_width_in(),
            height_in: Self::default_height_in(),
            dpi: Self::default_dpi(),
            title_font_px: Self::default_title_font_px(),
            label_font_px: Self::default_label_font_px(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesConfig {
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default = "SeriesConfig::default_panels")]
    pub panels: Vec<PanelSpec>,
}

impl SeriesConfig {
    /// Number of intra distance bins in the standard layout.
    pub const INTRA_PANELS: u32 = 8;

    /// Intra 0..8 followed by the inter panel.
    pub fn default_panels() -> Vec<PanelSpec> {
        (0..Self::INTRA_PANELS)
            .map(|index| PanelSpec::Intra { index })
            .chain(std::iter::once(PanelSpec::Inter))
            .collect()
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ApaError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApaError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            figure: FigureConfig::default(),
            panels: Self::default_panels(),
        }
    }
}
