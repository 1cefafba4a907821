//! Integration tests for reading and writing flat metric files.

use autoassess_core::colour::MetricColour;
use autoassess_core::errors::{AutoassessError, MetricFileKind};
use autoassess_core::interval::Interval;
use autoassess_core::metric_files::{
    read_model_metrics, read_obs_metrics, read_order_metrics, write_model_metrics,
    write_obs_metrics, write_order_metrics,
};
use autoassess_core::nac::{assess_files, NacFiles};
use autoassess_core::MetricMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

mod reading {
    use super::*;

    #[test]
    fn order_metrics_skip_comments() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "order.csv",
            "# Metrics in plotting order\nTemperature\n\"Rainfall, JJA\"\n\n# end\nSnow\n",
        );
        let metrics = read_order_metrics(Some(path.as_path()), true).unwrap();
        assert_eq!(metrics, vec!["Temperature", "Rainfall, JJA", "Snow"]);
    }

    #[test]
    fn order_metrics_reject_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "order.csv", "Temperature,1.0\n");
        let err = read_order_metrics(Some(path.as_path()), false).unwrap_err();
        assert!(matches!(
            err,
            AutoassessError::ConfigFormat {
                category: MetricFileKind::Order
            }
        ));
        assert_eq!(err.to_string(), "Ordered metrics file is not properly configured");
    }

    #[test]
    fn model_metrics_keep_file_order() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "ref.csv", "b,2.5\na, -1e-3\n# c,3\nb,4.0\n");
        let metrics = read_model_metrics(Some(path.as_path()), true).unwrap();
        assert_eq!(metrics.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(metrics["a"], -1e-3);
        // Later duplicate wins
        assert_eq!(metrics["b"], 4.0);
    }

    #[test]
    fn model_metrics_reject_wrong_arity() {
        let dir = TempDir::new().unwrap();
        for contents in ["a\n", "a,1.0,2.0\n"] {
            let path = write(&dir, "bad.csv", contents);
            let err = read_model_metrics(Some(path.as_path()), false).unwrap_err();
            assert!(matches!(
                err,
                AutoassessError::ConfigFormat {
                    category: MetricFileKind::Model
                }
            ));
        }
    }

    #[test]
    fn model_metrics_reject_non_numeric() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "a,high\n");
        let err = read_model_metrics(Some(path.as_path()), false).unwrap_err();
        assert!(matches!(err, AutoassessError::InvalidValue { .. }));
    }

    #[test]
    fn obs_metrics_by_arity() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "obs.csv",
            "single,2.0\nrange,3.0,1.0\nboth,1.0,2.0,3.5,0.5\n",
        );
        let (obs, acc) = read_obs_metrics(Some(path.as_path()), true).unwrap();
        assert_eq!(obs["single"], Interval::point(2.0));
        assert_eq!(obs["range"], Interval::new(1.0, 3.0));
        assert_eq!(obs["both"], Interval::new(1.0, 2.0));
        assert_eq!(acc.len(), 1);
        assert_eq!(acc["both"], Interval::new(0.5, 3.5));
    }

    #[test]
    fn obs_metrics_reject_three_values() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "obs.csv", "bad,1.0,2.0,3.0\n");
        let err = read_obs_metrics(Some(path.as_path()), false).unwrap_err();
        assert_eq!(err.to_string(), "Obs metrics file is not properly configured");
    }

    #[test]
    fn missing_optional_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does_not_exist.csv");
        assert!(read_order_metrics(Some(path.as_path()), false).unwrap().is_empty());
        assert!(read_model_metrics(Some(path.as_path()), false).unwrap().is_empty());
        let (obs, acc) = read_obs_metrics(Some(path.as_path()), false).unwrap();
        assert!(obs.is_empty() && acc.is_empty());
        assert!(read_model_metrics(None, true).unwrap().is_empty());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("does_not_exist.csv");
        let err = read_model_metrics(Some(path.as_path()), true).unwrap_err();
        match err {
            AutoassessError::MissingFile { path: missing, .. } => assert_eq!(missing, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}

mod writing {
    use super::*;

    #[test]
    fn model_metrics_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.csv");
        let metrics: MetricMap<f64> = [
            ("Temperature".to_string(), 288.15),
            ("Rainfall, JJA".to_string(), 1.0e-5),
            ("Sea ice".to_string(), -0.1),
            ("#anomaly".to_string(), 1.5),
        ]
        .into_iter()
        .collect();

        write_model_metrics(&path, &metrics).unwrap();
        assert_eq!(read_model_metrics(Some(path.as_path()), true).unwrap(), metrics);
    }

    #[test]
    fn order_metrics_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("order.csv");
        let metrics = vec![
            "b".to_string(),
            "#a".to_string(),
            "\"quoted\"".to_string(),
        ];
        write_order_metrics(&path, &metrics).unwrap();
        assert_eq!(read_order_metrics(Some(path.as_path()), true).unwrap(), metrics);
    }

    #[test]
    fn obs_metrics_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("obs.csv");
        let obs: MetricMap<Interval> = [
            ("a".to_string(), Interval::new(2.0, 1.0)),
            ("b".to_string(), Interval::point(0.5)),
            ("#anomaly".to_string(), Interval::new(-0.2, 0.2)),
        ]
        .into_iter()
        .collect();
        let acc: MetricMap<Interval> = [
            ("a".to_string(), Interval::new(3.0, 0.0)),
            ("#anomaly".to_string(), Interval::new(-0.5, 0.5)),
        ]
        .into_iter()
        .collect();

        write_obs_metrics(&path, &obs, &acc).unwrap();
        let (read_obs, read_acc) = read_obs_metrics(Some(path.as_path()), true).unwrap();
        assert_eq!(read_obs, obs);
        assert_eq!(read_acc, acc);
        assert_eq!(read_acc["a"].lo(), 0.0);
    }

    #[test]
    fn empty_collections_write_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        write_order_metrics(&path, &[]).unwrap();
        write_model_metrics(&path, &MetricMap::new()).unwrap();
        write_obs_metrics(&path, &MetricMap::new(), &MetricMap::new()).unwrap();
        assert!(!path.exists());
    }
}

#[test]
fn assess_from_files() {
    let dir = TempDir::new().unwrap();
    let reference = write(&dir, "ref.csv", "temp,2.0\nprecip,4.0\n");
    let expt = write(&dir, "expt.csv", "temp,2.1\nprecip,4.6\n");
    let var = write(&dir, "var.csv", "temp,0.2\n");
    let obs = write(&dir, "obs.csv", "precip,4.4,4.8\n");
    let order = write(&dir, "order.csv", "temp\nprecip\n");

    let files = NacFiles {
        experiments: vec![expt],
        reference,
        order: Some(order),
        var: Some(var),
        obs: Some(obs),
    };
    let assessment = assess_files("ref", vec!["expt".to_string()], &files, true).unwrap();

    assert_eq!(assessment.metrics, vec!["temp", "precip"]);
    let colours = &assessment.experiments[0].colours;
    assert_eq!(colours["temp"], MetricColour::Amber);
    assert_eq!(colours["precip"], MetricColour::Green);
}

#[test]
fn assess_requires_matching_file_count() {
    let dir = TempDir::new().unwrap();
    let reference = write(&dir, "ref.csv", "temp,2.0\n");
    let files = NacFiles {
        experiments: vec![reference.clone()],
        reference,
        ..Default::default()
    };
    let err = assess_files("ref", vec!["a".into(), "b".into()], &files, false).unwrap_err();
    assert!(matches!(err, AutoassessError::Validation(_)));
}
