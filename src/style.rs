//! Plot style configuration.

use crate::errors::PlotResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sizes used when drawing a NAC chart.
///
/// Loaded from TOML; any missing field takes its default value. All sizes are
/// in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    /// Total width, including the legend strip.
    /// Default: 1000
    pub width: u32,

    /// Smallest chart height; taller charts grow with the number of metrics.
    /// Default: 500
    pub min_height: u32,

    /// Height per metric row.
    /// Default: 24
    pub row_height: u32,

    /// Marker radius.
    /// Default: 6
    pub marker_size: u32,

    pub margin: u32,
    pub x_label_area_size: u32,

    /// Room for metric names to the left of the chart.
    /// Default: 260
    pub y_label_area_size: u32,

    /// Strip to the right of the axes holding the legend.
    /// Default: 180
    pub legend_width: u32,

    pub caption_font_size: u32,
    pub label_font_size: u32,
    pub legend_font_size: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            min_height: 500,
            row_height: 24,
            marker_size: 6,
            margin: 20,
            x_label_area_size: 50,
            y_label_area_size: 260,
            legend_width: 180,
            caption_font_size: 22,
            label_font_size: 12,
            legend_font_size: 12,
        }
    }
}

impl PlotStyle {
    pub fn from_toml_str(contents: &str) -> PlotResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> PlotResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Chart size in pixels for `rows` metrics
    pub fn size(&self, rows: usize) -> (u32, u32) {
        let decoration = self
            .margin
            .saturating_mul(2)
            .saturating_add(self.x_label_area_size)
            .saturating_add(self.caption_font_size.saturating_mul(2));
        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        let rows_height = self.row_height.saturating_mul(rows);
        (
            self.width,
            self.min_height.max(rows_height.saturating_add(decoration)),
        )
    }

    /// Widths of the chart and of the legend strip to its right.
    ///
    /// The legend never takes more than half of the total width.
    pub fn split_width(&self) -> (u32, u32) {
        let legend = self.legend_width.min(self.width / 2);
        (self.width - legend, legend)
    }
}
