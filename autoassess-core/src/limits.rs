//! Value-axis limits for NAC charts.

use crate::errors::{AutoassessError, AutoassessResult};
use crate::interval::Interval;
use crate::MetricMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fraction of the largest absolute value added beyond each end of the data
pub const LIMIT_PADDING: f64 = 0.05;

/// The value range is always widened to include at least `[0, 2]`
pub const MIN_RANGE: (f64, f64) = (0.0, 2.0);

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisLimits {
    pub min: f64,
    pub max: f64,
}

#[derive(Copy, Clone, Debug)]
struct Extent {
    min: f64,
    max: f64,
    max_abs: f64,
}

impl Extent {
    fn include(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.max_abs = self.max_abs.max(value.abs());
    }

    fn include_intervals(&mut self, intervals: &MetricMap<Interval>) {
        for interval in intervals.values() {
            self.include(interval.lo());
            self.include(interval.hi());
        }
    }
}

/// Determine the value-axis limits for a set of normalised experiments.
///
/// The range covers every experiment value and, when `extend` is set, every
/// observational and acceptable-range bound. Both ends are then padded by
/// [`LIMIT_PADDING`] of the largest absolute value before being widened to
/// contain [`MIN_RANGE`].
///
/// Returns an error if the experiments hold no values at all.
pub fn plot_limits(
    tests: &[MetricMap<f64>],
    obs: &MetricMap<Interval>,
    acc: &MetricMap<Interval>,
    extend: bool,
) -> AutoassessResult<AxisLimits> {
    let mut values = tests.iter().flat_map(|test| test.values().copied());
    let first = values.next().ok_or_else(|| {
        AutoassessError::Validation("No experiment metric values to determine limits from".into())
    })?;

    let mut extent = Extent {
        min: first,
        max: first,
        max_abs: first.abs(),
    };
    values.for_each(|value| extent.include(value));

    if extend {
        extent.include_intervals(obs);
        extent.include_intervals(acc);
    }

    let extra = extent.max_abs * LIMIT_PADDING;
    let limits = AxisLimits {
        min: (extent.min - extra).min(MIN_RANGE.0),
        max: (extent.max + extra).max(MIN_RANGE.1),
    };
    debug!(min = limits.min, max = limits.max, extend, "Computed plot limits");
    Ok(limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn map<T: Copy>(entries: &[(&str, T)]) -> MetricMap<T> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn clamped_to_minimum_range() {
        let tests = vec![map(&[("a", 1.0), ("b", 2.0)])];
        let limits = plot_limits(&tests, &MetricMap::new(), &MetricMap::new(), false).unwrap();
        assert_relative_eq!(limits.min, 0.0);
        assert_relative_eq!(limits.max, 2.1);
    }

    #[test]
    fn narrow_data_gets_full_minimum_range() {
        let tests = vec![map(&[("a", 1.0)]), map(&[("a", 1.1)])];
        let limits = plot_limits(&tests, &MetricMap::new(), &MetricMap::new(), false).unwrap();
        assert_eq!(limits, AxisLimits { min: 0.0, max: 2.0 });
    }

    #[test]
    fn padding_uses_max_abs_across_experiments() {
        let tests = vec![map(&[("a", -4.0)]), map(&[("a", 3.0)])];
        let limits = plot_limits(&tests, &MetricMap::new(), &MetricMap::new(), false).unwrap();
        assert_relative_eq!(limits.min, -4.2);
        assert_relative_eq!(limits.max, 3.2);
    }

    #[test]
    fn obs_and_acc_only_used_when_extending() {
        let tests = vec![map(&[("a", 1.0)])];
        let obs = map(&[("a", Interval::new(-1.0, 5.0))]);
        let acc = map(&[("a", Interval::new(0.5, 10.0))]);

        let limits = plot_limits(&tests, &obs, &acc, false).unwrap();
        assert_eq!(limits, AxisLimits { min: 0.0, max: 2.0 });

        let limits = plot_limits(&tests, &obs, &acc, true).unwrap();
        assert_relative_eq!(limits.min, -1.5);
        assert_relative_eq!(limits.max, 10.5);
    }

    #[test]
    fn empty_experiments_are_rejected() {
        assert!(plot_limits(&[], &MetricMap::new(), &MetricMap::new(), false).is_err());
        let tests = vec![MetricMap::new()];
        assert!(plot_limits(&tests, &MetricMap::new(), &MetricMap::new(), false).is_err());
    }
}
