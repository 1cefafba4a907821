//! Reading and writing flat metric files.
//!
//! All files are comma separated with optional `"` quoting. Lines starting
//! with `#` are comments and blank lines are ignored.
//!
//! | File | Record layout |
//! |------|---------------|
//! | ordered metrics | `name` |
//! | model metrics | `name,value` |
//! | observation metrics | `name,v1`, `name,v1,v2` or `name,v1,v2,v3,v4` |
//!
//! Model metric files hold reference, test and model uncertainty values.
//! Observation records hold an observational range (a single value becomes a
//! degenerate range) optionally followed by an acceptable range. If a metric is
//! relative (e.g. an error) the first value of each pair is normally zero.
//!
//! Readers take an optional path. No path, or an optional file that cannot be
//! opened, yields an empty collection; a `required` file that cannot be opened
//! is an error.

use crate::errors::{AutoassessError, AutoassessResult, MetricFileKind};
use crate::interval::Interval;
use crate::MetricMap;
use csv::{Reader, ReaderBuilder, StringRecord, Writer, WriterBuilder};
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};

/// A parsed observation record, distinguished by its number of values
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ObsRecord {
    /// A single observed value
    Single(f64),
    /// An observational range
    Range(Interval),
    /// An observational range followed by an acceptable range
    WithAcceptable { obs: Interval, acc: Interval },
}

impl ObsRecord {
    /// Observational interval of this record
    pub fn obs(&self) -> Interval {
        match self {
            ObsRecord::Single(value) => Interval::point(*value),
            ObsRecord::Range(obs) => *obs,
            ObsRecord::WithAcceptable { obs, .. } => *obs,
        }
    }

    /// Acceptable range, if the record has one
    pub fn acc(&self) -> Option<Interval> {
        match self {
            ObsRecord::WithAcceptable { acc, .. } => Some(*acc),
            _ => None,
        }
    }

    /// The values written after the metric name
    pub fn values(&self) -> Vec<f64> {
        match self {
            ObsRecord::Single(value) => vec![*value],
            ObsRecord::Range(obs) => vec![obs.lo(), obs.hi()],
            ObsRecord::WithAcceptable { obs, acc } => vec![obs.lo(), obs.hi(), acc.lo(), acc.hi()],
        }
    }

    fn parse(metric: &str, fields: &[&str]) -> AutoassessResult<Self> {
        let kind = MetricFileKind::Observation;
        let values = fields
            .iter()
            .map(|field| parse_value(kind, metric, field))
            .collect::<AutoassessResult<Vec<f64>>>()?;
        match values.as_slice() {
            [value] => Ok(ObsRecord::Single(*value)),
            [v1, v2] => Ok(ObsRecord::Range(Interval::new(*v1, *v2))),
            [v1, v2, v3, v4] => Ok(ObsRecord::WithAcceptable {
                obs: Interval::new(*v1, *v2),
                acc: Interval::new(*v3, *v4),
            }),
            _ => Err(AutoassessError::ConfigFormat { category: kind }),
        }
    }
}

fn parse_value(kind: MetricFileKind, metric: &str, field: &str) -> AutoassessResult<f64> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|_| AutoassessError::InvalidValue {
            category: kind,
            metric: metric.to_string(),
            value: field.to_string(),
        })
}

fn open_reader(
    csvfile: Option<&Path>,
    required: bool,
    kind: MetricFileKind,
) -> AutoassessResult<Option<Reader<File>>> {
    let Some(path) = csvfile else {
        return Ok(None);
    };
    match File::open(path) {
        Ok(file) => Ok(Some(
            ReaderBuilder::new()
                .has_headers(false)
                .flexible(true)
                .delimiter(b',')
                .quote(b'"')
                .comment(Some(b'#'))
                .from_reader(file),
        )),
        Err(source) if required => Err(AutoassessError::MissingFile {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) => {
            warn!(
                path = %path.display(),
                kind = %kind,
                error = %e,
                "Could not open metrics file; treating it as empty"
            );
            Ok(None)
        }
    }
}

fn split_record(record: &StringRecord, kind: MetricFileKind) -> AutoassessResult<(&str, Vec<&str>)> {
    let mut fields = record.iter();
    let metric = fields
        .next()
        .ok_or(AutoassessError::ConfigFormat { category: kind })?;
    Ok((metric, fields.collect()))
}

/// Read an ordered list of metric names, one per record.
pub fn read_order_metrics(csvfile: Option<&Path>, required: bool) -> AutoassessResult<Vec<String>> {
    let kind = MetricFileKind::Order;
    let mut metrics = Vec::new();
    if let Some(mut reader) = open_reader(csvfile, required, kind)? {
        for record in reader.records() {
            let record = record?;
            match record.len() {
                1 => metrics.push(record[0].to_string()),
                _ => return Err(AutoassessError::ConfigFormat { category: kind }),
            }
        }
    }
    debug!(count = metrics.len(), "Read ordered metrics");
    Ok(metrics)
}

/// Read `name,value` model metrics.
///
/// A metric listed more than once keeps its last value.
pub fn read_model_metrics(
    csvfile: Option<&Path>,
    required: bool,
) -> AutoassessResult<MetricMap<f64>> {
    let kind = MetricFileKind::Model;
    let mut metrics = MetricMap::new();
    if let Some(mut reader) = open_reader(csvfile, required, kind)? {
        for record in reader.records() {
            let record = record?;
            let (metric, values) = split_record(&record, kind)?;
            match values.as_slice() {
                [value] => {
                    let value = parse_value(kind, metric, value)?;
                    metrics.insert(metric.to_string(), value);
                }
                _ => return Err(AutoassessError::ConfigFormat { category: kind }),
            }
        }
    }
    debug!(count = metrics.len(), "Read model metrics");
    Ok(metrics)
}

/// Read observation metrics into separate observational and acceptable-range maps.
///
/// Every record contributes an observational interval; only four-value
/// records contribute an acceptable range.
pub fn read_obs_metrics(
    csvfile: Option<&Path>,
    required: bool,
) -> AutoassessResult<(MetricMap<Interval>, MetricMap<Interval>)> {
    let kind = MetricFileKind::Observation;
    let mut obs = MetricMap::new();
    let mut acc = MetricMap::new();
    if let Some(mut reader) = open_reader(csvfile, required, kind)? {
        for record in reader.records() {
            let record = record?;
            let (metric, values) = split_record(&record, kind)?;
            let parsed = ObsRecord::parse(metric, &values)?;
            obs.insert(metric.to_string(), parsed.obs());
            if let Some(range) = parsed.acc() {
                acc.insert(metric.to_string(), range);
            }
        }
    }
    debug!(obs = obs.len(), acc = acc.len(), "Read observation metrics");
    Ok((obs, acc))
}

/// Combine observational and acceptable ranges into observation records.
///
/// Only metrics present in `obs` are kept.
pub fn merge_obs_acc(
    obs: &MetricMap<Interval>,
    acc: &MetricMap<Interval>,
) -> MetricMap<ObsRecord> {
    obs.iter()
        .map(|(metric, &range)| {
            let record = match acc.get(metric) {
                Some(&acceptable) => ObsRecord::WithAcceptable {
                    obs: range,
                    acc: acceptable,
                },
                None => ObsRecord::Range(range),
            };
            (metric.clone(), record)
        })
        .collect()
}

fn open_writer(csvfile: &Path) -> AutoassessResult<Writer<File>> {
    Ok(WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(b',')
        .quote(b'"')
        .comment(Some(b'#'))
        .from_path(csvfile)?)
}

/// Write an ordered list of metric names. Nothing is written for an empty list.
pub fn write_order_metrics(csvfile: &Path, metrics: &[String]) -> AutoassessResult<()> {
    if metrics.is_empty() {
        return Ok(());
    }
    let mut writer = open_writer(csvfile)?;
    for metric in metrics {
        writer.write_record([metric])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write `name,value` model metrics. Nothing is written for an empty map.
pub fn write_model_metrics(csvfile: &Path, metrics: &MetricMap<f64>) -> AutoassessResult<()> {
    if metrics.is_empty() {
        return Ok(());
    }
    let mut writer = open_writer(csvfile)?;
    for (metric, value) in metrics {
        writer.write_record([metric.clone(), value.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

/// Write observational ranges, appending acceptable ranges where known.
///
/// Nothing is written if there are no observational ranges.
pub fn write_obs_metrics(
    csvfile: &Path,
    obs: &MetricMap<Interval>,
    acc: &MetricMap<Interval>,
) -> AutoassessResult<()> {
    let metrics = merge_obs_acc(obs, acc);
    if metrics.is_empty() {
        return Ok(());
    }
    let mut writer = open_writer(csvfile)?;
    for (metric, record) in &metrics {
        let mut row = vec![metric.clone()];
        row.extend(record.values().iter().map(f64::to_string));
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
