use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The kind of flat metric file being read or written.
///
/// Used to name the offending file in format errors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MetricFileKind {
    /// One metric name per record
    Order,
    /// `name,value` records (reference, test and model uncertainty values)
    Model,
    /// `name,v1[,v2[,v3,v4]]` records (observational and acceptable ranges)
    Observation,
}

impl fmt::Display for MetricFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricFileKind::Order => write!(f, "Ordered metrics"),
            MetricFileKind::Model => write!(f, "Model metrics"),
            MetricFileKind::Observation => write!(f, "Obs metrics"),
        }
    }
}

/// Error type for invalid operations.
#[derive(Error, Debug)]
pub enum AutoassessError {
    #[error("{category} file is not properly configured")]
    ConfigFormat { category: MetricFileKind },
    #[error("{category} file has a non-numeric value {value:?} for metric {metric:?}")]
    InvalidValue {
        category: MetricFileKind,
        metric: String,
        value: String,
    },
    #[error("Required metrics file {} could not be opened: {source}", .path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience type for `Result<T, AutoassessError>`.
pub type AutoassessResult<T> = Result<T, AutoassessError>;
