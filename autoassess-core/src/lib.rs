//! Metric classification for Normalised Assessment Criteria (NAC) charts.
//!
//! A NAC chart compares metrics from one or more test experiments against a
//! reference experiment. Every value is normalised by the reference, so the
//! reference sits at 1.0, and each test metric is given a traffic-light
//! [`MetricColour`](colour::MetricColour) describing how it performs against
//! model uncertainty and observational (or acceptable-range) bounds.
//!
//! ```
//! use autoassess_core::classify::MetricInputs;
//! use autoassess_core::colour::MetricColour;
//! use autoassess_core::interval::Interval;
//!
//! let colour = MetricInputs::new(1.5)
//!     .with_var(0.1)
//!     .with_obs(Interval::new(0.8, 1.2))
//!     .colour();
//! assert_eq!(colour, MetricColour::Red);
//! ```

pub mod classify;
pub mod colour;
pub mod interval;
pub mod limits;
pub mod marker;
pub mod metric_files;
pub mod nac;
pub mod normalise;

pub mod errors;

/// Metric values keyed by metric name, in insertion order
pub type MetricMap<T> = indexmap::IndexMap<String, T>;
