//! Per-model corrections applied to CMIP output before it is used.
//!
//! Some models publish data with wrong units, scaled values or non-standard
//! coordinates. A [`Fix`] patches one variable of one model (or every variable,
//! for the `allvars` fixes). Metadata fixes run before data fixes.

mod miroc_esm;

pub use miroc_esm::{MirocEsmAllVars, MirocEsmCo2, MirocEsmGpp, MirocEsmTro3};

use crate::errors::DiagnosticResult;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A coordinate attached to a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub var_name: String,
    pub standard_name: Option<String>,
    pub long_name: Option<String>,
    pub units: String,
    /// Calendar of a time coordinate
    pub calendar: Option<String>,
    pub points: Vec<f64>,
    /// Data dimensions spanned by this coordinate; empty for scalar coordinates
    pub dims: Vec<usize>,
    /// Whether this is the dimension coordinate of its dimension
    pub is_dim_coord: bool,
}

impl Coordinate {
    pub fn new(var_name: impl Into<String>, units: impl Into<String>, points: Vec<f64>) -> Self {
        Self {
            var_name: var_name.into(),
            standard_name: None,
            long_name: None,
            units: units.into(),
            calendar: None,
            points,
            dims: Vec::new(),
            is_dim_coord: false,
        }
    }

    /// Attach as the dimension coordinate of `dim`
    pub fn on_dim(mut self, dim: usize) -> Self {
        self.dims = vec![dim];
        self.is_dim_coord = true;
        self
    }

    pub fn with_standard_name(mut self, name: impl Into<String>) -> Self {
        self.standard_name = Some(name.into());
        self
    }

    pub fn with_calendar(mut self, calendar: impl Into<String>) -> Self {
        self.calendar = Some(calendar.into());
        self
    }

    /// Matches either the variable name or the standard name
    pub fn is_named(&self, name: &str) -> bool {
        self.var_name == name || self.standard_name.as_deref() == Some(name)
    }
}

/// Variable metadata carried alongside the data array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableMetadata {
    pub short_name: String,
    pub units: String,
    pub coords: Vec<Coordinate>,
}

impl VariableMetadata {
    pub fn coord(&self, name: &str) -> Option<&Coordinate> {
        self.coords.iter().find(|c| c.is_named(name))
    }

    pub fn coord_mut(&mut self, name: &str) -> Option<&mut Coordinate> {
        self.coords.iter_mut().find(|c| c.is_named(name))
    }

    pub fn remove_coord(&mut self, name: &str) -> Option<Coordinate> {
        let index = self.coords.iter().position(|c| c.is_named(name))?;
        Some(self.coords.remove(index))
    }
}

/// A variable: data plus metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub data: ArrayD<f64>,
    pub metadata: VariableMetadata,
}

/// A correction for one variable of one model.
///
/// Both hooks default to returning the field unchanged.
pub trait Fix: Send + Sync {
    fn name(&self) -> &'static str;

    fn fix_metadata(&self, field: Field) -> DiagnosticResult<Field> {
        Ok(field)
    }

    fn fix_data(&self, field: Field) -> DiagnosticResult<Field> {
        Ok(field)
    }
}

/// Fixes that apply to `variable` from `model` in `project`.
///
/// Model-wide fixes come first, followed by the variable-specific fix.
pub fn get_fixes(project: &str, model: &str, variable: &str) -> Vec<Box<dyn Fix>> {
    let mut fixes: Vec<Box<dyn Fix>> = Vec::new();
    if let ("CMIP5", "MIROC-ESM") = (project, model) {
        fixes.push(Box::new(MirocEsmAllVars));
        match variable {
            "tro3" => fixes.push(Box::new(MirocEsmTro3)),
            "co2" => fixes.push(Box::new(MirocEsmCo2)),
            "gpp" => fixes.push(Box::new(MirocEsmGpp)),
            _ => {}
        }
    }
    fixes
}

/// Run the metadata and then the data hook of every fix
pub fn apply_fixes(fixes: &[Box<dyn Fix>], field: Field) -> DiagnosticResult<Field> {
    let mut field = field;
    for fix in fixes {
        debug!(fix = fix.name(), "Applying metadata fix");
        field = fix.fix_metadata(field)?;
    }
    for fix in fixes {
        debug!(fix = fix.name(), "Applying data fix");
        field = fix.fix_data(field)?;
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::ArrayD;

    fn field(short_name: &str, units: &str) -> Field {
        Field {
            data: ArrayD::from_elem(vec![2, 3], 1.5),
            metadata: VariableMetadata {
                short_name: short_name.to_string(),
                units: units.to_string(),
                coords: vec![Coordinate::new("time", "days since 1-1-1", vec![0.0, 31.0])
                    .with_standard_name("time")
                    .on_dim(0)],
            },
        }
    }

    #[test]
    fn registry_orders_model_wide_fix_first() {
        let names: Vec<_> = get_fixes("CMIP5", "MIROC-ESM", "tro3")
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(names, vec!["allvars", "tro3"]);

        let names: Vec<_> = get_fixes("CMIP5", "MIROC-ESM", "tas")
            .iter()
            .map(|f| f.name())
            .collect();
        assert_eq!(names, vec!["allvars"]);

        assert!(get_fixes("CMIP5", "HadGEM2-ES", "tro3").is_empty());
        assert!(get_fixes("CMIP6", "MIROC-ESM", "tro3").is_empty());
    }

    #[test]
    fn apply_runs_metadata_and_data_fixes() {
        let fixes = get_fixes("CMIP5", "MIROC-ESM", "tro3");
        let fixed = apply_fixes(&fixes, field("tro3", "1e-9")).unwrap();
        assert!(fixed.data.iter().all(|&v| v == 1500.0));
        assert_eq!(
            fixed.metadata.coord("time").unwrap().units,
            "days since 1850-01-01 00:00:00"
        );
    }

    #[test]
    fn coordinate_lookup_by_either_name() {
        let mut metadata = field("tas", "K").metadata;
        assert!(metadata.coord("time").is_some());
        assert!(metadata.coord("AR5PL35").is_none());
        assert!(metadata.remove_coord("time").is_some());
        assert!(metadata.coords.is_empty());
    }
}
