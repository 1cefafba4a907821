//! Experiment markers.
//!
//! Each test experiment on a NAC chart is drawn with its own marker, taken in
//! order from [`Marker::SEQUENCE`]. The later entries are less distinct but
//! extend the number of experiments that can share one chart.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Circle,
    Pentagon,
    Square,
    Star,
    ThinDiamond,
    Hexagon,
    TriangleUp,
    TriangleDown,
    TriangleLeft,
    TriangleRight,
    Plus,
    Cross,
    Diamond,
    RotatedHexagon,
    Point,
    Pixel,
}

impl Marker {
    /// Markers in the order they are assigned to experiments
    pub const SEQUENCE: [Marker; 16] = [
        Marker::Circle,
        Marker::Pentagon,
        Marker::Square,
        Marker::Star,
        Marker::ThinDiamond,
        Marker::Hexagon,
        Marker::TriangleUp,
        Marker::TriangleDown,
        Marker::TriangleLeft,
        Marker::TriangleRight,
        Marker::Plus,
        Marker::Cross,
        Marker::Diamond,
        Marker::RotatedHexagon,
        Marker::Point,
        Marker::Pixel,
    ];

    /// Marker for the `index`-th experiment, if there are enough markers
    pub fn for_experiment(index: usize) -> Option<Marker> {
        Self::SEQUENCE.get(index).copied()
    }

    /// Outline of the marker as a closed polygon.
    ///
    /// Vertices are on a unit scale centred on the origin with `y` pointing up,
    /// so every marker fits within a radius of 1.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        match self {
            Marker::Circle => regular_polygon(24, 1.0, 90.0),
            Marker::Pentagon => regular_polygon(5, 1.0, 90.0),
            Marker::Square => regular_polygon(4, 1.0, 45.0),
            Marker::Star => star(5, 1.0, 0.4),
            Marker::ThinDiamond => vec![(0.0, 1.0), (0.6, 0.0), (0.0, -1.0), (-0.6, 0.0)],
            Marker::Hexagon => regular_polygon(6, 1.0, 90.0),
            Marker::TriangleUp => regular_polygon(3, 1.0, 90.0),
            Marker::TriangleDown => regular_polygon(3, 1.0, 270.0),
            Marker::TriangleLeft => regular_polygon(3, 1.0, 180.0),
            Marker::TriangleRight => regular_polygon(3, 1.0, 0.0),
            Marker::Plus => plus(0.25),
            Marker::Cross => rotate(&plus(0.25), 45.0),
            Marker::Diamond => regular_polygon(4, 1.0, 90.0),
            Marker::RotatedHexagon => regular_polygon(6, 1.0, 0.0),
            Marker::Point => regular_polygon(12, 0.5, 90.0),
            Marker::Pixel => regular_polygon(4, 0.2, 45.0),
        }
    }
}

fn regular_polygon(sides: usize, radius: f64, start_deg: f64) -> Vec<(f64, f64)> {
    (0..sides)
        .map(|i| {
            let angle = (start_deg + 360.0 * i as f64 / sides as f64) * PI / 180.0;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn star(points: usize, outer: f64, inner: f64) -> Vec<(f64, f64)> {
    (0..2 * points)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = (90.0 + 180.0 * i as f64 / points as f64) * PI / 180.0;
            (radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

fn plus(half_width: f64) -> Vec<(f64, f64)> {
    let w = half_width;
    // Arm ends are pulled in so the corners stay within the unit circle
    let a = (1.0 - w * w).sqrt();
    vec![
        (-w, a),
        (w, a),
        (w, w),
        (a, w),
        (a, -w),
        (w, -w),
        (w, -a),
        (-w, -a),
        (-w, -w),
        (-a, -w),
        (-a, w),
        (-w, w),
    ]
}

fn rotate(vertices: &[(f64, f64)], deg: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = (deg * PI / 180.0).sin_cos();
    vertices
        .iter()
        .map(|&(x, y)| (x * cos - y * sin, x * sin + y * cos))
        .collect()
}
