//! Settings for the ocean heat content diagnostic.

use crate::errors::DiagnosticResult;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings controlling the ocean heat content diagnostic.
///
/// Loaded from TOML; any missing field takes its default value.
///
/// ```
/// use autoassess_diagnostics::settings::OceanHeatContentSettings;
///
/// let settings = OceanHeatContentSettings::from_toml_str("max_depth = 700.0").unwrap();
/// assert_eq!(settings.min_depth, 0.0);
/// assert_eq!(settings.max_depth, 700.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OceanHeatContentSettings {
    /// Top of the integrated layer (m).
    /// Default: 0.0
    pub min_depth: f64,

    /// Bottom of the integrated layer (m).
    /// Default: unbounded
    pub max_depth: f64,

    /// Write a map of each time slice to `plot_dir`.
    /// Default: true
    pub write_plots: bool,

    /// Write the computed field to `work_dir`.
    /// Default: true
    pub write_netcdf: bool,

    pub plot_dir: PathBuf,
    pub work_dir: PathBuf,

    /// Extension for plot files.
    /// Default: "png"
    pub output_file_type: String,
}

impl Default for OceanHeatContentSettings {
    fn default() -> Self {
        Self {
            min_depth: 0.0,
            max_depth: f64::INFINITY,
            write_plots: true,
            write_netcdf: true,
            plot_dir: PathBuf::from("plots"),
            work_dir: PathBuf::from("work"),
            output_file_type: "png".to_string(),
        }
    }
}

impl OceanHeatContentSettings {
    pub fn from_toml_str(contents: &str) -> DiagnosticResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_file(path: &Path) -> DiagnosticResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
