//! Diagnostics and data fixes for CMIP model output.
//!
//! - [`ocean_heat_content`]: depth-integrated ocean heat content per unit area
//! - [`fixes`]: per-model corrections to data and metadata

pub mod fixes;
pub mod ocean_heat_content;
pub mod settings;

pub mod errors;
