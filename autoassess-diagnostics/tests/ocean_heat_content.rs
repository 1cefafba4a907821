//! End-to-end heat content computation from settings on disk.

use approx::assert_relative_eq;
use autoassess_diagnostics::ocean_heat_content::{
    ocean_heat_content, DepthAxis, SEA_WATER_DENSITY, SEA_WATER_SPECIFIC_HEAT,
};
use autoassess_diagnostics::settings::OceanHeatContentSettings;
use ndarray::Array4;
use std::fs;
use tempfile::TempDir;

#[test]
fn upper_ocean_heat_content_from_settings_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ohc.toml");
    fs::write(&path, "min_depth = 0.0\nmax_depth = 100.0\nwrite_netcdf = false\n").unwrap();
    let settings = OceanHeatContentSettings::from_file(&path).unwrap();
    assert!(!settings.write_netcdf);

    // Layers 0-50, 50-150, 150-250 m; temperature warms towards the surface
    let axis = DepthAxis::with_bounds(
        vec![25.0, 100.0, 200.0],
        vec![[0.0, 50.0], [50.0, 150.0], [150.0, 250.0]],
    )
    .unwrap();
    let mut thetao = Array4::<f64>::zeros((3, 3, 1, 1));
    for t in 0..3 {
        thetao[[t, 0, 0, 0]] = 290.0 + t as f64;
        thetao[[t, 1, 0, 0]] = 280.0;
        thetao[[t, 2, 0, 0]] = 275.0;
    }

    let ohc = ocean_heat_content(thetao.view(), &axis, &settings).unwrap();
    let heat = SEA_WATER_SPECIFIC_HEAT * SEA_WATER_DENSITY;
    for t in 0..3 {
        let expected = ((290.0 + t as f64) * 50.0 + 280.0 * 50.0) * heat;
        assert_relative_eq!(ohc.data[[t, 0, 0]], expected, max_relative = 1e-12);
    }
    // Warming surface means increasing heat content
    assert!(ohc.data[[2, 0, 0]] > ohc.data[[0, 0, 0]]);
}

#[test]
fn missing_settings_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(OceanHeatContentSettings::from_file(&dir.path().join("missing.toml")).is_err());
}
