//! Normalised Assessment Criteria (NAC) plots.
//!
//! The assessment itself lives in [`autoassess_core`]; this crate renders the
//! result and provides the `plot_norm_ac` command line.

pub mod cli;
pub mod plot;
pub mod style;

pub mod errors;
