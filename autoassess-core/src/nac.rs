//! Normalised Assessment Criteria (NAC) assessment.
//!
//! Collects the metrics of a reference experiment and one or more test
//! experiments, normalises everything by the reference and classifies each
//! test metric. The result carries everything a renderer needs to draw a NAC
//! chart.

use crate::classify::metric_colours;
use crate::colour::MetricColour;
use crate::errors::{AutoassessError, AutoassessResult};
use crate::interval::Interval;
use crate::limits::{plot_limits, AxisLimits};
use crate::marker::Marker;
use crate::metric_files::{read_model_metrics, read_obs_metrics, read_order_metrics};
use crate::normalise::normalise;
use crate::MetricMap;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Locations of the metric files describing one NAC chart
#[derive(Debug, Clone, Default)]
pub struct NacFiles {
    /// Metric file per test experiment, parallel to the experiment names
    pub experiments: Vec<PathBuf>,
    pub reference: PathBuf,
    pub order: Option<PathBuf>,
    pub var: Option<PathBuf>,
    pub obs: Option<PathBuf>,
}

/// Raw (un-normalised) inputs to a NAC assessment
#[derive(Debug, Clone, Default)]
pub struct NacInputs {
    pub reference_name: String,
    pub test_names: Vec<String>,
    pub reference: MetricMap<f64>,
    pub tests: Vec<MetricMap<f64>>,
    /// Plotting order; defaults to the sorted reference metrics when empty
    pub order: Vec<String>,
    pub var: MetricMap<f64>,
    pub obs: MetricMap<Interval>,
    pub acc: MetricMap<Interval>,
}

/// Normalised metrics and colours for one test experiment
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentAssessment {
    pub name: String,
    pub marker: Marker,
    pub values: MetricMap<f64>,
    pub colours: MetricMap<MetricColour>,
}

/// A fully assessed NAC chart
#[derive(Debug, Clone, Serialize)]
pub struct NacAssessment {
    pub reference_name: String,
    /// Metrics in plotting order, first metric drawn at the top
    pub metrics: Vec<String>,
    pub var: MetricMap<f64>,
    pub obs: MetricMap<Interval>,
    pub acc: MetricMap<Interval>,
    pub experiments: Vec<ExperimentAssessment>,
    pub limits: AxisLimits,
}

impl NacInputs {
    /// Read every input file.
    ///
    /// Experiment and reference files must exist; the order, model
    /// uncertainty and observation files are optional.
    pub fn from_files(
        reference_name: impl Into<String>,
        test_names: Vec<String>,
        files: &NacFiles,
    ) -> AutoassessResult<Self> {
        check_experiment_count(&test_names, files.experiments.len())?;

        let order = read_order_metrics(files.order.as_deref(), false)?;
        let reference = read_model_metrics(Some(files.reference.as_path()), true)?;
        let tests = files
            .experiments
            .iter()
            .map(|path| read_model_metrics(Some(path.as_path()), true))
            .collect::<AutoassessResult<Vec<_>>>()?;
        let var = read_model_metrics(files.var.as_deref(), false)?;
        let (obs, acc) = read_obs_metrics(files.obs.as_deref(), false)?;

        Ok(Self {
            reference_name: reference_name.into(),
            test_names,
            reference,
            tests,
            order,
            var,
            obs,
            acc,
        })
    }

    /// Normalise and classify all test experiments against the reference.
    ///
    /// `extend` widens the value axis to include observational and acceptable
    /// ranges.
    pub fn assess(&self, extend: bool) -> AutoassessResult<NacAssessment> {
        check_experiment_count(&self.test_names, self.tests.len())?;
        if self.tests.len() > Marker::SEQUENCE.len() {
            return Err(AutoassessError::Validation(format!(
                "At most {} test experiments can be plotted, got {}",
                Marker::SEQUENCE.len(),
                self.tests.len()
            )));
        }

        let metrics = if self.order.is_empty() {
            let mut metrics: Vec<String> = self.reference.keys().cloned().collect();
            metrics.sort();
            metrics
        } else {
            self.order.clone()
        };
        if metrics.is_empty() {
            return Err(AutoassessError::Validation(
                "No metrics to assess: the reference experiment has no metrics".into(),
            ));
        }

        let var = normalise(&self.var, &self.reference, false)?;
        let obs = normalise(&self.obs, &self.reference, false)?;
        let acc = normalise(&self.acc, &self.reference, false)?;

        let mut experiments = Vec::with_capacity(self.tests.len());
        for (index, (name, test)) in self.test_names.iter().zip(&self.tests).enumerate() {
            let values = normalise(test, &self.reference, true)?;
            let colours = metric_colours(&values, None, &var, &obs, &acc)?;
            let marker = Marker::for_experiment(index).ok_or_else(|| {
                AutoassessError::Validation(format!("No marker available for experiment {name}"))
            })?;
            experiments.push(ExperimentAssessment {
                name: name.clone(),
                marker,
                values,
                colours,
            });
        }

        let normalised: Vec<MetricMap<f64>> =
            experiments.iter().map(|e| e.values.clone()).collect();
        let limits = plot_limits(&normalised, &obs, &acc, extend)?;

        info!(
            reference = %self.reference_name,
            experiments = experiments.len(),
            metrics = metrics.len(),
            "Assessed NAC metrics"
        );

        Ok(NacAssessment {
            reference_name: self.reference_name.clone(),
            metrics,
            var,
            obs,
            acc,
            experiments,
            limits,
        })
    }
}

impl NacAssessment {
    /// Position of a metric counted from the top of the chart
    pub fn row(&self, metric: &str) -> Option<usize> {
        self.metrics.iter().position(|m| m == metric)
    }

    /// Number of metrics of each colour for one experiment
    pub fn colour_counts(&self, experiment: usize) -> MetricMap<usize> {
        let mut counts = MetricMap::new();
        if let Some(assessment) = self.experiments.get(experiment) {
            for colour in assessment.colours.values() {
                *counts.entry(colour.name().to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}

fn check_experiment_count(names: &[String], count: usize) -> AutoassessResult<()> {
    if names.len() != count {
        return Err(AutoassessError::Validation(format!(
            "Number of experiments and experiment files must be the same ({} names, {} files)",
            names.len(),
            count
        )));
    }
    Ok(())
}

/// Convenience wrapper around [`NacInputs::from_files`] and [`NacInputs::assess`]
pub fn assess_files(
    reference_name: &str,
    test_names: Vec<String>,
    files: &NacFiles,
    extend: bool,
) -> AutoassessResult<NacAssessment> {
    NacInputs::from_files(reference_name, test_names, files)?.assess(extend)
}
