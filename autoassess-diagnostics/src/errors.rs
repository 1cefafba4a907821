use thiserror::Error;

/// Error type for diagnostics and data fixes.
#[derive(Error, Debug)]
pub enum DiagnosticError {
    #[error("Invalid depth axis: {0}")]
    InvalidDepthAxis(String),
    #[error("Shape mismatch for {what}: expected {expected}, got {found}")]
    ShapeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },
    #[error("Invalid settings: {0}")]
    Settings(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, DiagnosticError>`.
pub type DiagnosticResult<T> = Result<T, DiagnosticError>;
