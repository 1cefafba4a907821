//! Traffic-light classification of test metrics.
//!
//! A test value is judged against the reference value, an optional symmetric
//! model uncertainty about the reference, and an optional observational
//! interval. An acceptable-range interval, when present, replaces the
//! observational interval entirely.
//!
//! Values have usually been normalised by the reference beforehand, in which
//! case the reference is 1.0.
//!
//! # Decision procedure
//!
//! 1. Without any model uncertainty or truth interval the colour is
//!    [`MetricColour::Grey`].
//! 2. With a model uncertainty `var`, the test is [`MetricColour::Amber`] when
//!    `ref - var <= test <= ref + var` and [`MetricColour::Red`] otherwise.
//! 3. With a truth interval (acceptable range, else observations) the colour
//!    defaults to red if still grey. A test inside the interval is
//!    [`MetricColour::Green`]. Otherwise, when the reference lies outside the
//!    interval and the test is at least as close to it as the reference, the
//!    test is amber, unless the test was already inside the model uncertainty.

use crate::colour::MetricColour;
use crate::errors::{AutoassessError, AutoassessResult};
use crate::interval::Interval;
use crate::MetricMap;
use std::collections::HashSet;
use tracing::debug;

/// Everything known about a single metric when classifying it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MetricInputs {
    pub test: f64,
    pub reference: f64,
    pub var: Option<f64>,
    pub obs: Option<Interval>,
    pub acc: Option<Interval>,
}

impl MetricInputs {
    /// Inputs for a test value that has already been normalised (reference of 1.0)
    pub fn new(test: f64) -> Self {
        Self {
            test,
            reference: 1.0,
            var: None,
            obs: None,
            acc: None,
        }
    }

    pub fn with_reference(mut self, reference: f64) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_var(mut self, var: impl Into<Option<f64>>) -> Self {
        self.var = var.into();
        self
    }

    pub fn with_obs(mut self, obs: impl Into<Option<Interval>>) -> Self {
        self.obs = obs.into();
        self
    }

    pub fn with_acc(mut self, acc: impl Into<Option<Interval>>) -> Self {
        self.acc = acc.into();
        self
    }

    /// Whether the test lies within the model uncertainty about the reference
    pub fn is_test_in_var(&self) -> bool {
        match self.var {
            Some(var) => self.reference - var <= self.test && self.test <= self.reference + var,
            None => false,
        }
    }

    /// The interval the test is judged against.
    ///
    /// The acceptable range takes precedence over the observational interval.
    pub fn truth(&self) -> Option<Interval> {
        self.acc.or(self.obs)
    }

    pub fn colour(&self) -> MetricColour {
        let is_test_in_var = self.is_test_in_var();

        let mut colour = match self.var {
            Some(_) if is_test_in_var => MetricColour::Amber,
            Some(_) => MetricColour::Red,
            None => MetricColour::Grey,
        };

        if let Some(truth) = self.truth() {
            if colour == MetricColour::Grey {
                colour = MetricColour::Red;
            }

            if truth.contains(self.test) {
                colour = MetricColour::Green;
            } else {
                let is_ref_in_obs = truth.contains(self.reference);
                // Closeness is measured to the nearest bound; the green branch
                // above means the test is never inside the interval here.
                let is_test_better = truth.distance(self.test) <= truth.distance(self.reference);
                if !is_test_in_var && !is_ref_in_obs && is_test_better {
                    colour = MetricColour::Amber;
                }
            }
        }

        colour
    }
}

/// Classify a single metric.
///
/// ```
/// use autoassess_core::classify::metric_colour;
/// use autoassess_core::colour::MetricColour;
/// use autoassess_core::interval::Interval;
///
/// assert_eq!(metric_colour(1.05, 1.0, Some(0.1), None, None), MetricColour::Amber);
/// assert_eq!(
///     metric_colour(0.95, 1.0, None, Some(Interval::new(0.9, 1.0)), None),
///     MetricColour::Green
/// );
/// ```
pub fn metric_colour(
    test: f64,
    reference: f64,
    var: Option<f64>,
    obs: Option<Interval>,
    acc: Option<Interval>,
) -> MetricColour {
    MetricInputs {
        test,
        reference,
        var,
        obs,
        acc,
    }
    .colour()
}

/// Returns an error if the two maps do not hold the same set of metrics
pub(crate) fn check_same_metrics<A, B>(
    test: &MetricMap<A>,
    reference: &MetricMap<B>,
    message: &str,
) -> AutoassessResult<()> {
    let test_keys: HashSet<&String> = test.keys().collect();
    let ref_keys: HashSet<&String> = reference.keys().collect();
    if test_keys != ref_keys {
        let mut missing: Vec<&str> = test_keys
            .symmetric_difference(&ref_keys)
            .map(|k| k.as_str())
            .collect();
        missing.sort_unstable();
        return Err(AutoassessError::Validation(format!(
            "{message} (differing metrics: {})",
            missing.join(", ")
        )));
    }
    Ok(())
}

/// Classify every metric in `test`.
///
/// If `reference` is `None` or empty every reference value is taken to be 1.0,
/// otherwise it must contain exactly the same metrics as `test`. Model
/// uncertainties, observational and acceptable ranges are looked up by metric
/// name and treated as absent when the metric is missing.
pub fn metric_colours(
    test: &MetricMap<f64>,
    reference: Option<&MetricMap<f64>>,
    var: &MetricMap<f64>,
    obs: &MetricMap<Interval>,
    acc: &MetricMap<Interval>,
) -> AutoassessResult<MetricMap<MetricColour>> {
    let reference = reference.filter(|r| !r.is_empty());
    if let Some(reference) = reference {
        check_same_metrics(
            test,
            reference,
            "If supplying ref it must have same metrics as test",
        )?;
    }

    let mut colours = MetricMap::with_capacity(test.len());
    for (metric, &value) in test {
        let inputs = MetricInputs {
            test: value,
            reference: reference.and_then(|r| r.get(metric).copied()).unwrap_or(1.0),
            var: var.get(metric).copied(),
            obs: obs.get(metric).copied(),
            acc: acc.get(metric).copied(),
        };
        let colour = inputs.colour();
        debug!(metric = %metric, test = value, colour = %colour, "Classified metric");
        colours.insert(metric.clone(), colour);
    }
    Ok(colours)
}
