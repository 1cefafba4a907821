use std::path::PathBuf;
use thiserror::Error;

/// Error type for chart rendering.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Unsupported plot format for {}; NAC plots are written as .svg", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Invalid plot style: {0}")]
    Style(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, PlotError>`.
pub type PlotResult<T> = Result<T, PlotError>;
