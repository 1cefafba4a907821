//! Ocean heat content per unit area.
//!
//! The heat content of a water column is the depth integral of potential
//! temperature scaled by the volumetric heat capacity of sea water:
//!
//! $$ \text{OHC} = \rho c_p \sum_k \theta_k \, \Delta z_k $$
//!
//! where $\Delta z_k$ is the thickness of layer $k$ lying between the
//! configured minimum and maximum depths.

use crate::errors::{DiagnosticError, DiagnosticResult};
use crate::settings::OceanHeatContentSettings;
use ndarray::{Array3, ArrayView4, Axis, Zip};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Specific heat capacity of sea water (J/kg/K)
pub const SEA_WATER_SPECIFIC_HEAT: f64 = 4000.0;

/// Reference density of sea water (kg/m^3)
pub const SEA_WATER_DENSITY: f64 = 1020.0;

/// Depth coordinate of an ocean field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthAxis {
    /// Layer centre depths (m)
    pub points: Vec<f64>,
    /// Layer `[top, bottom]` depths (m)
    pub bounds: Option<Vec<[f64; 2]>>,
}

impl DepthAxis {
    pub fn new(points: Vec<f64>) -> Self {
        Self {
            points,
            bounds: None,
        }
    }

    pub fn with_bounds(points: Vec<f64>, bounds: Vec<[f64; 2]>) -> DiagnosticResult<Self> {
        if points.len() != bounds.len() {
            return Err(DiagnosticError::ShapeMismatch {
                what: "depth bounds".to_string(),
                expected: points.len(),
                found: bounds.len(),
            });
        }
        Ok(Self {
            points,
            bounds: Some(bounds),
        })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounds halfway between neighbouring points.
    ///
    /// The outermost bounds are placed half a spacing beyond the first and
    /// last points.
    pub fn guess_bounds(&self) -> DiagnosticResult<Vec<[f64; 2]>> {
        let points = &self.points;
        if points.len() < 2 {
            return Err(DiagnosticError::InvalidDepthAxis(format!(
                "cannot guess bounds for a coordinate of length {}",
                points.len()
            )));
        }

        let n = points.len();
        let mut edges = Vec::with_capacity(n + 1);
        edges.push(points[0] - 0.5 * (points[1] - points[0]));
        edges.extend(points.windows(2).map(|w| 0.5 * (w[0] + w[1])));
        edges.push(points[n - 1] + 0.5 * (points[n - 1] - points[n - 2]));

        Ok(edges.windows(2).map(|w| [w[0], w[1]]).collect())
    }

    /// The explicit bounds, or guessed bounds if there are none
    pub fn bounds_or_guess(&self) -> DiagnosticResult<Vec<[f64; 2]>> {
        match &self.bounds {
            Some(bounds) => Ok(bounds.clone()),
            None => self.guess_bounds(),
        }
    }
}

/// Thickness of each layer that lies between `min_depth` and `max_depth`.
///
/// Layers entirely outside the range get a weight of zero and layers that
/// straddle a limit are clipped to it.
pub fn depth_weights(bounds: &[[f64; 2]], min_depth: f64, max_depth: f64) -> Vec<f64> {
    bounds
        .iter()
        .map(|&[a, b]| {
            let (top, bottom) = if a <= b { (a, b) } else { (b, a) };
            if bottom <= min_depth || top >= max_depth {
                return 0.0;
            }
            (bottom.min(max_depth) - top.max(min_depth)).max(0.0)
        })
        .collect()
}

/// Ocean heat content per unit area on a `(time, y, x)` grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OceanHeatContent {
    pub data: Array3<f64>,
    pub var_name: String,
    pub long_name: String,
    pub units: String,
}

/// Compute ocean heat content from sea water potential temperature.
///
/// `thetao` is laid out as `(time, depth, y, x)` with the depth dimension
/// described by `depth`. NaN values are treated as missing (e.g. below the sea
/// floor); a column with no valid layers remains NaN.
pub fn ocean_heat_content(
    thetao: ArrayView4<f64>,
    depth: &DepthAxis,
    settings: &OceanHeatContentSettings,
) -> DiagnosticResult<OceanHeatContent> {
    let (n_time, n_depth, n_y, n_x) = thetao.dim();
    if n_depth != depth.len() {
        return Err(DiagnosticError::ShapeMismatch {
            what: "depth dimension".to_string(),
            expected: depth.len(),
            found: n_depth,
        });
    }

    let bounds = depth.bounds_or_guess()?;
    let weights = depth_weights(&bounds, settings.min_depth, settings.max_depth);
    debug!(?weights, "Computed depth weights");

    let mut total = Array3::<f64>::zeros((n_time, n_y, n_x));
    let mut valid = Array3::<bool>::from_elem((n_time, n_y, n_x), false);

    for (layer, &weight) in weights.iter().enumerate() {
        if weight <= 0.0 {
            continue;
        }
        let scale = weight * SEA_WATER_SPECIFIC_HEAT * SEA_WATER_DENSITY;
        let slice = thetao.index_axis(Axis(1), layer);
        Zip::from(&mut total)
            .and(&mut valid)
            .and(&slice)
            .for_each(|t, v, &theta| {
                if !theta.is_nan() {
                    *t += theta * scale;
                    *v = true;
                }
            });
    }

    Zip::from(&mut total).and(&valid).for_each(|t, &v| {
        if !v {
            *t = f64::NAN;
        }
    });

    Ok(OceanHeatContent {
        data: total,
        var_name: "ohc".to_string(),
        long_name: "Ocean Heat Content per area unit".to_string(),
        units: "J m^-2".to_string(),
    })
}

/// Identifying attributes of an input dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetAttributes {
    pub project: String,
    pub model: String,
    pub ensemble: String,
    pub start_year: i32,
}

impl DatasetAttributes {
    /// Short label, e.g. `MIROC-ESM_r1i1p1_1850`
    pub fn alias(&self) -> String {
        format!("{}_{}_{}", self.model, self.ensemble, self.start_year)
    }

    /// File name of the map for one time slice, labelled `YYYY-MM`
    pub fn plot_filename(&self, time_label: &str, extension: &str) -> String {
        format!(
            "ohc2D_{}_{}_{}_{}.{}",
            self.project, self.model, self.ensemble, time_label, extension
        )
    }

    /// Location of the map for one time slice
    pub fn plot_path(&self, settings: &OceanHeatContentSettings, time_label: &str) -> PathBuf {
        settings
            .plot_dir
            .join(self.plot_filename(time_label, &settings.output_file_type))
    }
}

/// Location of the heat content file derived from a `thetao` input file
pub fn output_path(settings: &OceanHeatContentSettings, input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().replace("thetao", "ohc"))
        .unwrap_or_else(|| "ohc.nc".to_string());
    settings.work_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array4;

    const HEAT: f64 = SEA_WATER_SPECIFIC_HEAT * SEA_WATER_DENSITY;

    #[test]
    fn guessed_bounds_are_midpoints() {
        let axis = DepthAxis::new(vec![5.0, 15.0, 30.0]);
        let bounds = axis.guess_bounds().unwrap();
        assert_eq!(bounds, vec![[0.0, 10.0], [10.0, 22.5], [22.5, 37.5]]);
    }

    #[test]
    fn single_level_cannot_guess_bounds() {
        assert!(DepthAxis::new(vec![5.0]).guess_bounds().is_err());
    }

    #[test]
    fn weights_clipped_to_depth_range() {
        let bounds = [[0.0, 10.0], [10.0, 22.5], [22.5, 37.5]];
        assert_eq!(depth_weights(&bounds, 0.0, f64::INFINITY), vec![10.0, 12.5, 15.0]);
        assert_eq!(depth_weights(&bounds, 0.0, 20.0), vec![10.0, 10.0, 0.0]);
        assert_eq!(depth_weights(&bounds, 5.0, 30.0), vec![5.0, 12.5, 7.5]);
        assert_eq!(depth_weights(&bounds, 10.0, 22.5), vec![0.0, 12.5, 0.0]);
    }

    #[test]
    fn explicit_bounds_must_match_points() {
        assert!(DepthAxis::with_bounds(vec![1.0, 2.0], vec![[0.0, 1.5]]).is_err());
    }

    #[test]
    fn uniform_temperature_integrates_thickness() {
        let thetao = Array4::<f64>::from_elem((2, 3, 2, 2), 1.0);
        let axis = DepthAxis::new(vec![5.0, 15.0, 30.0]);
        let settings = OceanHeatContentSettings {
            max_depth: 20.0,
            ..Default::default()
        };
        let ohc = ocean_heat_content(thetao.view(), &axis, &settings).unwrap();

        assert_eq!(ohc.data.dim(), (2, 2, 2));
        for value in ohc.data.iter() {
            assert_relative_eq!(*value, 20.0 * HEAT);
        }
        assert_eq!(ohc.units, "J m^-2");
        assert_eq!(ohc.var_name, "ohc");
    }

    #[test]
    fn missing_values_are_skipped() {
        let mut thetao = Array4::<f64>::from_elem((1, 2, 1, 2), 2.0);
        let axis =
            DepthAxis::with_bounds(vec![5.0, 15.0], vec![[0.0, 10.0], [10.0, 20.0]]).unwrap();
        // Shallow column: bottom layer below the sea floor
        thetao[[0, 1, 0, 0]] = f64::NAN;
        // Land point
        thetao[[0, 0, 0, 1]] = f64::NAN;
        thetao[[0, 1, 0, 1]] = f64::NAN;

        let ohc =
            ocean_heat_content(thetao.view(), &axis, &OceanHeatContentSettings::default()).unwrap();
        assert_relative_eq!(ohc.data[[0, 0, 0]], 2.0 * 10.0 * HEAT);
        assert!(ohc.data[[0, 0, 1]].is_nan());
    }

    #[test]
    fn depth_dimension_must_match_axis() {
        let thetao = Array4::<f64>::zeros((1, 4, 1, 1));
        let axis = DepthAxis::new(vec![5.0, 15.0, 30.0]);
        let err = ocean_heat_content(thetao.view(), &axis, &OceanHeatContentSettings::default())
            .unwrap_err();
        assert!(matches!(err, DiagnosticError::ShapeMismatch { .. }));
    }

    #[test]
    fn file_naming() {
        let attributes = DatasetAttributes {
            project: "CMIP5".into(),
            model: "MIROC-ESM".into(),
            ensemble: "r1i1p1".into(),
            start_year: 1850,
        };
        assert_eq!(attributes.alias(), "MIROC-ESM_r1i1p1_1850");

        let settings = OceanHeatContentSettings::default();
        assert_eq!(
            attributes.plot_path(&settings, "1850-01"),
            PathBuf::from("plots/ohc2D_CMIP5_MIROC-ESM_r1i1p1_1850-01.png")
        );
        assert_eq!(
            output_path(&settings, Path::new("/data/thetao_Omon_MIROC-ESM.nc")),
            PathBuf::from("work/ohc_Omon_MIROC-ESM.nc")
        );
    }
}
