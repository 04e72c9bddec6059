//! Riemann sum plots of `f(x) = 16 - x^2` over `[0, 2]`.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use ndarray::Array1;
use plotters::prelude::{Cross, LineSeries, Rectangle};

use crate::{
    foundation::{
        color::Rgb8,
        config::Config,
        error::{ChalkError, ChalkResult},
    },
    render::chart::{Axes, Chart, ChartRenderer, chart_err, fill, stroke},
};

/// Integration interval.
pub const X_RANGE: Range<f64> = 0.0..2.0;
/// Rectangles per plotted sum.
pub const DEFAULT_N: usize = 4;

const RESOLUTION: usize = 1000;
const FUNC_COLOR: Rgb8 = Rgb8::from_hex_u32(0x0A193B);
const FACE_COLOR: Rgb8 = Rgb8::from_hex_u32(0x9290F8);
const EDGE_COLOR: Rgb8 = Rgb8::from_hex_u32(0x3D104B);
const SCATTER_COLOR: Rgb8 = Rgb8::from_hex_u32(0xD5664F);

/// The plotted function.
pub fn f(x: f64) -> f64 {
    16.0 - x * x
}

/// Where each rectangle samples the function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RectangleMode {
    /// Function only, no rectangles.
    None,
    /// Left edge of each sub-interval.
    Left,
    /// Right edge of each sub-interval.
    Right,
    /// Center of each sub-interval.
    Midpoint,
}

impl RectangleMode {
    /// Every plotted mode, in output order.
    pub const ALL: [RectangleMode; 4] = [
        RectangleMode::None,
        RectangleMode::Left,
        RectangleMode::Right,
        RectangleMode::Midpoint,
    ];

    /// Output file stem.
    pub fn file_stem(self) -> &'static str {
        match self {
            RectangleMode::None => "function",
            RectangleMode::Left => "left_riemann_sum",
            RectangleMode::Right => "right_riemann_sum",
            RectangleMode::Midpoint => "midpoint_riemann_sum",
        }
    }
}

fn check_interval(range: &Range<f64>, n: usize) -> ChalkResult<f64> {
    if n == 0 {
        return Err(ChalkError::validation("riemann sum needs at least one rectangle"));
    }
    if range.start >= range.end {
        return Err(ChalkError::validation("riemann interval must be increasing"));
    }
    Ok((range.end - range.start) / n as f64)
}

/// Sample abscissas of the `n` rectangles. Empty for [`RectangleMode::None`].
pub fn sample_points(range: &Range<f64>, n: usize, mode: RectangleMode) -> ChalkResult<Vec<f64>> {
    let width = check_interval(range, n)?;
    let edges = Array1::linspace(range.start, range.end, n + 1);
    let points = match mode {
        RectangleMode::None => Vec::new(),
        RectangleMode::Left => edges.iter().take(n).copied().collect(),
        RectangleMode::Right => edges.iter().skip(1).copied().collect(),
        RectangleMode::Midpoint => edges.iter().take(n).map(|x| x + width / 2.0).collect(),
    };
    Ok(points)
}

/// Riemann sum of `func` over `range` with `n` rectangles.
pub fn riemann_sum(
    func: impl Fn(f64) -> f64,
    range: &Range<f64>,
    n: usize,
    mode: RectangleMode,
) -> ChalkResult<f64> {
    let width = check_interval(range, n)?;
    Ok(sample_points(range, n, mode)?
        .into_iter()
        .map(|x| func(x) * width)
        .sum())
}

fn draw_rectangles(chart: &mut Chart<'_, '_>, n: usize, mode: RectangleMode) -> ChalkResult<()> {
    let xs = sample_points(&X_RANGE, n, mode)?;
    if xs.is_empty() {
        return Ok(());
    }
    let width = (X_RANGE.end - X_RANGE.start) / n as f64;

    chart
        .draw_series(xs.iter().enumerate().map(|(i, &x)| {
            let left = X_RANGE.start + i as f64 * width;
            Rectangle::new([(left, 0.0), (left + width, f(x))], fill(FACE_COLOR, 0.5))
        }))
        .map_err(chart_err)?;
    chart
        .draw_series(xs.iter().enumerate().map(|(i, &x)| {
            let left = X_RANGE.start + i as f64 * width;
            Rectangle::new(
                [(left, 0.0), (left + width, f(x))],
                stroke(EDGE_COLOR, 0.5, 3),
            )
        }))
        .map_err(chart_err)?;
    chart
        .draw_series(
            xs.iter()
                .map(|&x| Cross::new((x, f(x)), 6, stroke(SCATTER_COLOR, 1.0, 3))),
        )
        .map_err(chart_err)?;
    Ok(())
}

/// Plot the function and, unless `mode` is `None`, its `n` rectangles.
pub fn render_one(
    renderer: &mut ChartRenderer,
    mode: RectangleMode,
    n: usize,
    out_dir: &Path,
) -> ChalkResult<PathBuf> {
    let mut axes = Axes::new(X_RANGE, -0.5..16.5);
    axes.x_labels = 9;
    axes.y_labels = 5;

    let curve: Vec<(f64, f64)> = Array1::linspace(X_RANGE.start, X_RANGE.end, RESOLUTION)
        .iter()
        .map(|&x| (x, f(x)))
        .collect();
    let path = out_dir.join(format!("{}.png", mode.file_stem()));
    renderer.render_png(&axes, &path, |chart| {
        chart
            .draw_series(LineSeries::new(curve, stroke(FUNC_COLOR, 0.8, 3)))
            .map_err(chart_err)?;
        draw_rectangles(chart, n, mode)
    })
}

/// Plot the function alone and with left, right and midpoint rectangles.
#[tracing::instrument(skip(cfg))]
pub fn render(out_dir: &Path, cfg: &Config) -> ChalkResult<Vec<PathBuf>> {
    let mut renderer = ChartRenderer::new(cfg);
    let mut written = Vec::with_capacity(RectangleMode::ALL.len());
    for mode in RectangleMode::ALL {
        let sum = riemann_sum(f, &X_RANGE, DEFAULT_N, mode)?;
        tracing::debug!(mode = mode.file_stem(), sum, "riemann sum");
        written.push(render_one(&mut renderer, mode, DEFAULT_N, out_dir)?);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/figures/riemann.rs"]
mod tests;
