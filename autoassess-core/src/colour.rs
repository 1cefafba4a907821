//! Traffic-light categories and the fixed chart palette.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An RGB triple
pub type Rgb = (u8, u8, u8);

pub const BLACK: Rgb = (0x00, 0x00, 0x00);
/// Observational range error bars
pub const OBS_GREY: Rgb = (0x00, 0x00, 0x00);
/// Acceptable range error bars
pub const ACC_GREY: Rgb = (0x00, 0xFF, 0xFF);
/// Model uncertainty band
pub const STD_GREY: Rgb = (0xEE, 0xEE, 0xEE);

/// Performance category of a single test metric.
///
/// - `Green`: test within observational uncertainty or acceptable range
/// - `Amber`: within model uncertainty, or better than the reference while
///   neither lies within the observational bounds
/// - `Red`: worse than the reference and outside model uncertainty
/// - `Grey`: no observational uncertainty or acceptable range to judge against
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricColour {
    Red,
    Amber,
    Green,
    Grey,
}

impl MetricColour {
    pub fn rgb(&self) -> Rgb {
        match self {
            MetricColour::Red => (0xFF, 0x00, 0x00),
            MetricColour::Amber => (0xFF, 0x8C, 0x00),
            MetricColour::Green => (0x7C, 0xFC, 0x00),
            MetricColour::Grey => (0xA9, 0xA9, 0xA9),
        }
    }

    /// Hex colour string, e.g. `#FF8C00`
    pub fn hex(&self) -> String {
        let (r, g, b) = self.rgb();
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricColour::Red => "RED",
            MetricColour::Amber => "AMBER",
            MetricColour::Green => "GREEN",
            MetricColour::Grey => "GREY",
        }
    }
}

impl fmt::Display for MetricColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
