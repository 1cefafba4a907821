//! Fixes for CMIP5 MIROC-ESM output.

use super::{Coordinate, Field, Fix};
use crate::errors::DiagnosticResult;
use tracing::debug;

/// Ozone is published in mole fraction scaled by 1e-3
pub struct MirocEsmTro3;

impl Fix for MirocEsmTro3 {
    fn name(&self) -> &'static str {
        "tro3"
    }

    fn fix_data(&self, mut field: Field) -> DiagnosticResult<Field> {
        field.data *= 1000.0;
        Ok(field)
    }
}

/// CO2 concentration units are missing their ppm scaling
pub struct MirocEsmCo2;

impl Fix for MirocEsmCo2 {
    fn name(&self) -> &'static str {
        "co2"
    }

    fn fix_metadata(&self, mut field: Field) -> DiagnosticResult<Field> {
        field.metadata.units = "1.0e-6".to_string();
        Ok(field)
    }
}

/// GPP units; the values are converted downstream from the corrected units
pub struct MirocEsmGpp;

impl Fix for MirocEsmGpp {
    fn name(&self) -> &'static str {
        "gpp"
    }

    fn fix_metadata(&self, mut field: Field) -> DiagnosticResult<Field> {
        field.metadata.units = "g m-2 day-1".to_string();
        Ok(field)
    }
}

/// Time origins and pressure levels shared by every MIROC-ESM variable
pub struct MirocEsmAllVars;

const PRESSURE_LEVEL_COORD: &str = "AR5PL35";

fn rebased_time_units(units: &str) -> Option<&'static str> {
    match units.trim() {
        "days since 0000-01-01 00:00:00" => Some("days since 1849-01-01 00:00:00"),
        "days since 1-1-1" => Some("days since 1850-01-01 00:00:00"),
        _ => None,
    }
}

impl Fix for MirocEsmAllVars {
    fn name(&self) -> &'static str {
        "allvars"
    }

    fn fix_metadata(&self, mut field: Field) -> DiagnosticResult<Field> {
        if let Some(time) = field.metadata.coord_mut("time") {
            if let Some(units) = rebased_time_units(&time.units) {
                debug!(from = %time.units, to = units, "Rebasing time origin");
                time.units = units.to_string();
                if time.calendar.is_none() {
                    time.calendar = Some("standard".to_string());
                }
            }
        }

        if let Some(old) = field.metadata.remove_coord(PRESSURE_LEVEL_COORD) {
            let plev = Coordinate {
                var_name: "plev".to_string(),
                standard_name: Some("air_pressure".to_string()),
                long_name: Some("Pressure ".to_string()),
                is_dim_coord: true,
                ..old
            };
            debug!(dims = ?plev.dims, "Replaced {PRESSURE_LEVEL_COORD} with air_pressure");
            field.metadata.coords.push(plev);
        }

        Ok(field)
    }
}
