//! Activation function plots.

use std::path::{Path, PathBuf};

use ndarray::Array1;
use plotters::prelude::LineSeries;

use crate::{
    foundation::{
        color::Rgb8,
        config::{Config, Theme},
        error::ChalkResult,
    },
    render::chart::{Axes, ChartRenderer, chart_err, stroke},
};

/// Sampled x range.
pub const X_RANGE: (f64, f64) = (-5.0, 5.0);
/// Samples per curve.
pub const RESOLUTION: usize = 1000;
/// Negative slope of the plotted leaky ReLU.
pub const LEAKY_ALPHA: f64 = 0.1;

const LINE_WIDTH: u32 = 3;
const LINE_ALPHA: f64 = 0.8;

/// Logistic sigmoid.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Heaviside step with value 0.5 at zero.
pub fn step(x: f64) -> f64 {
    if x < 0.0 {
        0.0
    } else if x > 0.0 {
        1.0
    } else {
        0.5
    }
}

/// Hyperbolic tangent.
pub fn tanh(x: f64) -> f64 {
    x.tanh()
}

/// Rectified linear unit.
pub fn relu(x: f64) -> f64 {
    x.max(0.0)
}

/// Leaky ReLU: `max(alpha * x, x)`.
pub fn leaky_relu(x: f64, alpha: f64) -> f64 {
    (alpha * x).max(x)
}

/// A plotted activation function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Activation {
    /// [`sigmoid`].
    Sigmoid,
    /// [`step`].
    Step,
    /// [`tanh`].
    Tanh,
    /// [`relu`].
    Relu,
    /// [`leaky_relu`] with [`LEAKY_ALPHA`].
    LeakyRelu,
}

impl Activation {
    /// Every plotted function, in output order.
    pub const ALL: [Activation; 5] = [
        Activation::Sigmoid,
        Activation::Step,
        Activation::Tanh,
        Activation::Relu,
        Activation::LeakyRelu,
    ];

    /// File name stem.
    pub fn name(self) -> &'static str {
        match self {
            Activation::Sigmoid => "sigmoid",
            Activation::Step => "step",
            Activation::Tanh => "tanh",
            Activation::Relu => "relu",
            Activation::LeakyRelu => "leaky_relu",
        }
    }

    /// Evaluate at `x`.
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Sigmoid => sigmoid(x),
            Activation::Step => step(x),
            Activation::Tanh => tanh(x),
            Activation::Relu => relu(x),
            Activation::LeakyRelu => leaky_relu(x, LEAKY_ALPHA),
        }
    }

    /// Visible y range and its tick count (ticks every 0.5).
    pub fn y_range(self) -> (f64, f64, usize) {
        match self {
            Activation::Tanh => (-1.5, 1.5, 7),
            _ => (-0.5, 1.5, 5),
        }
    }

    /// `RESOLUTION` evenly spaced samples over `X_RANGE`.
    pub fn sample(self) -> Vec<(f64, f64)> {
        Array1::linspace(X_RANGE.0, X_RANGE.1, RESOLUTION)
            .iter()
            .map(|&x| (x, self.apply(x)))
            .collect()
    }
}

fn line_color(theme: Theme) -> Rgb8 {
    match theme {
        Theme::Light => Rgb8::from_hex_u32(0x0A193B),
        Theme::Dark => Rgb8::from_hex_u32(0x9B67CC),
    }
}

/// Plot one function to `{out_dir}/{name}_{theme}.png`.
pub fn render_one(
    renderer: &mut ChartRenderer,
    activation: Activation,
    out_dir: &Path,
) -> ChalkResult<PathBuf> {
    let theme = renderer.config().theme;
    let (y0, y1, ticks) = activation.y_range();
    let mut axes = Axes::new(X_RANGE.0..X_RANGE.1, y0..y1);
    axes.x_labels = 11;
    axes.y_labels = ticks;
    axes.zero_spines = true;

    let path = out_dir.join(format!("{}_{}.png", activation.name(), theme.name()));
    let line = stroke(line_color(theme), LINE_ALPHA, LINE_WIDTH);
    renderer.render_png(&axes, &path, |chart| {
        chart
            .draw_series(LineSeries::new(activation.sample(), line))
            .map_err(chart_err)?;
        Ok(())
    })
}

/// Plot every activation function with the configured theme.
#[tracing::instrument(skip(cfg), fields(theme = cfg.theme.name()))]
pub fn render(out_dir: &Path, cfg: &Config) -> ChalkResult<Vec<PathBuf>> {
    let mut renderer = ChartRenderer::new(cfg);
    Activation::ALL
        .iter()
        .map(|&a| render_one(&mut renderer, a, out_dir))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/figures/activation.rs"]
mod tests;
