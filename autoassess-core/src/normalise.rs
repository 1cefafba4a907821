//! Normalisation of metric values by a reference experiment.

use crate::classify::check_same_metrics;
use crate::errors::{AutoassessError, AutoassessResult};
use crate::interval::Interval;
use crate::MetricMap;

/// A metric value that can be expressed relative to a reference value.
pub trait Normalise: Sized {
    /// Divide every number held by `self` by `reference`
    fn normalised_by(&self, reference: f64) -> Self;
}

impl Normalise for f64 {
    fn normalised_by(&self, reference: f64) -> Self {
        self / reference
    }
}

impl Normalise for Interval {
    fn normalised_by(&self, reference: f64) -> Self {
        self.scaled_by(reference)
    }
}

/// Normalise the contents of `values` by the contents of `reference`.
///
/// In `strict` mode both maps must hold the same metrics. Otherwise metrics
/// missing from `reference` are silently dropped. The output keeps the order
/// of `values`.
///
/// ```
/// use autoassess_core::normalise::normalise;
/// use autoassess_core::MetricMap;
///
/// let test: MetricMap<f64> = [("a".to_string(), 3.0)].into_iter().collect();
/// let reference: MetricMap<f64> = [("a".to_string(), 2.0)].into_iter().collect();
/// let norm = normalise(&test, &reference, true).unwrap();
/// assert_eq!(norm["a"], 1.5);
/// ```
pub fn normalise<T: Normalise>(
    values: &MetricMap<T>,
    reference: &MetricMap<f64>,
    strict: bool,
) -> AutoassessResult<MetricMap<T>> {
    if strict {
        check_same_metrics(values, reference, "ref and test must have same set of metrics")?;
    }

    let mut norm = MetricMap::with_capacity(values.len());
    for (metric, value) in values {
        let Some(&divisor) = reference.get(metric) else {
            continue;
        };
        if divisor == 0.0 {
            return Err(AutoassessError::Validation(format!(
                "Reference value for metric {metric:?} is zero and cannot be used to normalise"
            )));
        }
        norm.insert(metric.clone(), value.normalised_by(divisor));
    }
    Ok(norm)
}
