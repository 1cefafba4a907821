//! Rendering of NAC charts.
//!
//! Each metric occupies one row, with the first metric at the top. The value
//! axis is the normalised value, so the reference experiment always sits on
//! the vertical line at 1.0. Behind the test markers are drawn:
//!
//! - the model uncertainty as a shaded band about 1.0
//! - the acceptable range as cyan capped bars
//! - the observational range as black capped bars

use crate::errors::{PlotError, PlotResult};
use crate::style::PlotStyle;
use autoassess_core::colour::{Rgb, ACC_GREY, BLACK as NAC_BLACK, OBS_GREY, STD_GREY};
use autoassess_core::interval::Interval;
use autoassess_core::marker::Marker;
use autoassess_core::nac::NacAssessment;
use autoassess_core::MetricMap;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Display;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

const CAP_HALF_HEIGHT: f64 = 0.2;
const FONT: &str = "sans-serif";
const LEGEND_PADDING: i32 = 10;

fn render_err<E: Display>(e: E) -> PlotError {
    PlotError::Render(e.to_string())
}

fn colour(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

/// Vertical position of the metric in row `row` (counted from the top)
fn row_y(rows: usize, row: usize) -> f64 {
    (rows - row) as f64
}

fn row_label(metrics: &[String], y: f64) -> String {
    let rounded = y.round();
    if (y - rounded).abs() > 1e-6 || rounded < 1.0 {
        return String::new();
    }
    let from_bottom = rounded as usize;
    if from_bottom > metrics.len() {
        return String::new();
    }
    metrics[metrics.len() - from_bottom].clone()
}

/// Marker outline in pixel offsets, with `y` pointing down
fn marker_vertices(marker: Marker, size: u32) -> Vec<(i32, i32)> {
    let scale = size as f64;
    marker
        .outline()
        .into_iter()
        .map(|(x, y)| ((x * scale).round() as i32, (-y * scale).round() as i32))
        .collect()
}

fn closed(vertices: &[(i32, i32)]) -> Vec<(i32, i32)> {
    let mut path = vertices.to_vec();
    if let Some(&first) = vertices.first() {
        path.push(first);
    }
    path
}

fn range_bars(
    metrics: &[String],
    ranges: &MetricMap<Interval>,
    style: ShapeStyle,
) -> Vec<PathElement<(f64, f64)>> {
    let rows = metrics.len();
    let mut elements = Vec::new();
    for (row, metric) in metrics.iter().enumerate() {
        let Some(range) = ranges.get(metric) else {
            continue;
        };
        let y = row_y(rows, row);
        elements.push(PathElement::new(vec![(range.lo(), y), (range.hi(), y)], style));
        for x in [range.lo(), range.hi()] {
            elements.push(PathElement::new(
                vec![(x, y - CAP_HALF_HEIGHT), (x, y + CAP_HALF_HEIGHT)],
                style,
            ));
        }
    }
    elements
}

/// Draw a NAC chart onto any drawing area
pub fn draw_nac<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    assessment: &NacAssessment,
    style: &PlotStyle,
    title: Option<&str>,
) -> PlotResult<()> {
    let metrics = &assessment.metrics;
    let rows = metrics.len();
    if rows == 0 {
        return Err(PlotError::Render("there are no metrics to plot".into()));
    }
    let top = rows as f64 + 0.5;

    root.fill(&WHITE).map_err(render_err)?;
    let (chart_width, _) = style.split_width();
    let (chart_area, legend_area) = root.split_horizontally(chart_width);

    let mut builder = ChartBuilder::on(&chart_area);
    builder
        .margin(style.margin)
        .x_label_area_size(style.x_label_area_size)
        .y_label_area_size(style.y_label_area_size);
    if let Some(title) = title {
        builder.caption(title, (FONT, style.caption_font_size));
    }
    let mut chart = builder
        .build_cartesian_2d(assessment.limits.min..assessment.limits.max, 0.5..top)
        .map_err(render_err)?;

    let label_formatter = |y: &f64| row_label(metrics, *y);
    chart
        .configure_mesh()
        .disable_mesh()
        .y_labels(rows)
        .y_label_formatter(&label_formatter)
        .x_desc("Normalised Assessment Criteria")
        .label_style((FONT, style.label_font_size))
        .axis_desc_style((FONT, style.label_font_size + 2))
        .draw()
        .map_err(render_err)?;

    // Model uncertainty about the reference
    chart
        .draw_series(metrics.iter().enumerate().filter_map(|(row, metric)| {
            let std = *assessment.var.get(metric)?;
            let y = row_y(rows, row);
            Some(Rectangle::new(
                [(1.0 - std, y - 0.5), (1.0 + std, y + 0.5)],
                colour(STD_GREY).filled(),
            ))
        }))
        .map_err(render_err)?;

    chart
        .draw_series(range_bars(
            metrics,
            &assessment.acc,
            colour(ACC_GREY).stroke_width(2),
        ))
        .map_err(render_err)?;
    chart
        .draw_series(range_bars(
            metrics,
            &assessment.obs,
            colour(OBS_GREY).stroke_width(2),
        ))
        .map_err(render_err)?;

    chart
        .draw_series([
            PathElement::new(vec![(0.0, 0.5), (0.0, top)], BLACK.mix(0.3)),
            PathElement::new(vec![(1.0, 0.5), (1.0, top)], BLACK),
        ])
        .map_err(render_err)?;

    let edge = colour(NAC_BLACK);
    for experiment in &assessment.experiments {
        let vertices = marker_vertices(experiment.marker, style.marker_size);
        let outline = closed(&vertices);

        let points = metrics.iter().enumerate().filter_map(|(row, metric)| {
            let value = *experiment.values.get(metric)?;
            let fill = colour(experiment.colours.get(metric)?.rgb());
            Some((value, row_y(rows, row), fill))
        });

        chart
            .draw_series(points.map(|(x, y, fill)| {
                EmptyElement::at((x, y))
                    + Polygon::new(vertices.clone(), fill.filled())
                    + PathElement::new(outline.clone(), edge)
            }))
            .map_err(render_err)?;
    }

    draw_legend(&legend_area, assessment, style)
}

/// Vertical centre of legend entry `index`, the heading being entry 0
fn legend_row_y(style: &PlotStyle, index: usize) -> i32 {
    let line = style
        .legend_font_size
        .max(style.marker_size.saturating_mul(2))
        .saturating_add(6);
    let top = style
        .margin
        .saturating_add(style.caption_font_size.saturating_mul(2));
    let offset = (index as u32).saturating_mul(line).saturating_add(line / 2);
    i32::try_from(top.saturating_add(offset)).unwrap_or(i32::MAX)
}

/// Legend keyed by experiment name, drawn in the strip right of the axes
fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    assessment: &NacAssessment,
    style: &PlotStyle,
) -> PlotResult<()> {
    let font_size = style.legend_font_size;
    let half_font = (font_size / 2) as i32;
    let marker = style.marker_size as i32;

    let heading_y = legend_row_y(style, 0);
    area.draw(&Text::new(
        format!("Vs {}", assessment.reference_name),
        (LEGEND_PADDING, heading_y - half_font),
        (FONT, font_size).into_font(),
    ))
    .map_err(render_err)?;

    let edge = colour(NAC_BLACK);
    let text_x = LEGEND_PADDING + 2 * marker + 6;
    for (index, experiment) in assessment.experiments.iter().enumerate() {
        let y = legend_row_y(style, index + 1);
        let centre = (LEGEND_PADDING + marker, y);
        let shifted: Vec<(i32, i32)> = marker_vertices(experiment.marker, style.marker_size)
            .into_iter()
            .map(|(dx, dy)| (centre.0 + dx, centre.1 + dy))
            .collect();
        area.draw(&Polygon::new(shifted, edge.filled()))
            .map_err(render_err)?;
        area.draw(&Text::new(
            experiment.name.clone(),
            (text_x, y - half_font),
            (FONT, font_size).into_font(),
        ))
        .map_err(render_err)?;
    }
    Ok(())
}

/// Render a NAC chart to an SVG document in memory
pub fn render_nac_svg(
    assessment: &NacAssessment,
    style: &PlotStyle,
    title: Option<&str>,
) -> PlotResult<String> {
    let mut buffer = String::new();
    {
        let root = SVGBackend::with_string(&mut buffer, style.size(assessment.metrics.len()))
            .into_drawing_area();
        draw_nac(&root, assessment, style, title)?;
        root.present().map_err(render_err)?;
    }
    Ok(buffer)
}

/// Render a NAC chart.
///
/// With an output path the chart is saved there, creating parent directories
/// as needed; only `.svg` files are supported. Without one, the SVG document
/// is written to stdout.
pub fn render_nac(
    assessment: &NacAssessment,
    style: &PlotStyle,
    title: Option<&str>,
    output: Option<&Path>,
) -> PlotResult<()> {
    let Some(path) = output else {
        let svg = render_nac_svg(assessment, style, title)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(svg.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    };

    let is_svg = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);
    if !is_svg {
        return Err(PlotError::UnsupportedFormat(path.to_path_buf()));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let root = SVGBackend::new(path, style.size(assessment.metrics.len())).into_drawing_area();
    draw_nac(&root, assessment, style, title)?;
    root.present().map_err(render_err)?;
    info!(path = %path.display(), "Wrote NAC plot");
    Ok(())
}
