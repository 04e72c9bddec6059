//! Shared 2D chart scaffolding for the plot figures.
//!
//! Charts are drawn with `plotters` into an SVG string and rasterized by the same
//! [`SvgRasterizer`] as the grid figures, so every figure shares one font database.

use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use plotters::{coord::types::RangedCoordf64, prelude::*};

use crate::{
    foundation::{
        color::Rgb8,
        config::{Config, Theme},
        error::{ChalkError, ChalkResult},
    },
    render::raster::{FrameRasterizer, SvgRasterizer, write_png},
};

/// Chart context handed to figure drawing callbacks.
pub type Chart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Background, grid and ink colors of a chart ("darkgrid" look).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartTheme {
    /// Grid line color.
    pub grid: Rgb8,
    /// Plot area background.
    pub face: Rgb8,
    /// Axis, spine and tick label color.
    pub ink: Rgb8,
}

impl ChartTheme {
    /// Palette for a light or dark page.
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                grid: Rgb8::from_hex_u32(0xAAB3C8),
                face: Rgb8::from_hex_u32(0xDCDBEE),
                ink: Rgb8::BLACK,
            },
            Theme::Dark => Self {
                grid: Rgb8::from_hex_u32(0x474072),
                face: Rgb8::from_hex_u32(0x2C2847),
                ink: Rgb8::WHITE,
            },
        }
    }
}

/// Axis ranges and decorations of one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes {
    /// Visible x range.
    pub x: Range<f64>,
    /// Visible y range.
    pub y: Range<f64>,
    /// Approximate number of x tick labels.
    pub x_labels: usize,
    /// Approximate number of y tick labels.
    pub y_labels: usize,
    /// X axis caption.
    pub x_desc: Option<String>,
    /// Y axis caption.
    pub y_desc: Option<String>,
    /// Draw spines through the origin instead of only along the plot edges.
    pub zero_spines: bool,
    /// Where to draw the legend of the labelled series, if at all.
    pub legend: Option<SeriesLabelPosition>,
}

impl Axes {
    /// Axes over the given ranges with default decorations.
    pub fn new(x: Range<f64>, y: Range<f64>) -> Self {
        Self {
            x,
            y,
            x_labels: 10,
            y_labels: 5,
            x_desc: None,
            y_desc: None,
            zero_spines: false,
            legend: None,
        }
    }

    /// Same axes with captions.
    pub fn with_desc(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_desc = Some(x.into());
        self.y_desc = Some(y.into());
        self
    }

    /// Same axes with a legend box at `position`.
    pub fn with_legend(mut self, position: SeriesLabelPosition) -> Self {
        self.legend = Some(position);
        self
    }
}

/// Outline style.
pub fn stroke(color: Rgb8, alpha: f64, width: u32) -> ShapeStyle {
    ShapeStyle {
        color: color.to_plotters().mix(alpha),
        filled: false,
        stroke_width: width,
    }
}

/// Solid fill style.
pub fn fill(color: Rgb8, alpha: f64) -> ShapeStyle {
    ShapeStyle {
        color: color.to_plotters().mix(alpha),
        filled: true,
        stroke_width: 1,
    }
}

pub(crate) fn chart_err<E: std::fmt::Display>(e: E) -> ChalkError {
    ChalkError::render(format!("draw chart: {e}"))
}

/// Draw a chart into an SVG document of `size` pixels.
pub fn chart_svg<F>(size: (u32, u32), theme: &ChartTheme, axes: &Axes, draw: F) -> ChalkResult<String>
where
    F: FnOnce(&mut Chart<'_, '_>) -> ChalkResult<()>,
{
    if axes.x.start >= axes.x.end || axes.y.start >= axes.y.end {
        return Err(ChalkError::validation("chart axis ranges must be increasing"));
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        let mut chart = ChartBuilder::on(&root)
            .margin(16)
            .x_label_area_size(if axes.x_desc.is_some() { 44 } else { 30 })
            .y_label_area_size(if axes.y_desc.is_some() { 56 } else { 44 })
            .build_cartesian_2d(axes.x.clone(), axes.y.clone())
            .map_err(chart_err)?;

        chart
            .plotting_area()
            .fill(&theme.face.to_plotters())
            .map_err(chart_err)?;

        let ink = theme.ink.to_plotters();
        let mut mesh = chart.configure_mesh();
        mesh.bold_line_style(stroke(theme.grid, 1.0, 1))
            .light_line_style(ShapeStyle {
                color: TRANSPARENT,
                filled: false,
                stroke_width: 0,
            })
            .axis_style(stroke(theme.ink, 1.0, 1))
            .label_style(("sans-serif", 13).into_font().color(&ink))
            .x_labels(axes.x_labels)
            .y_labels(axes.y_labels);
        if let Some(desc) = &axes.x_desc {
            mesh.x_desc(desc.as_str());
        }
        if let Some(desc) = &axes.y_desc {
            mesh.y_desc(desc.as_str());
        }
        mesh.draw().map_err(chart_err)?;

        if axes.zero_spines {
            let spine = stroke(theme.ink, 1.0, 1);
            if axes.y.start <= 0.0 && 0.0 <= axes.y.end {
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(axes.x.start, 0.0), (axes.x.end, 0.0)],
                        spine,
                    )))
                    .map_err(chart_err)?;
            }
            if axes.x.start <= 0.0 && 0.0 <= axes.x.end {
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(0.0, axes.y.start), (0.0, axes.y.end)],
                        spine,
                    )))
                    .map_err(chart_err)?;
            }
        }

        draw(&mut chart)?;
        if let Some(position) = &axes.legend {
            chart
                .configure_series_labels()
                .position(position.clone())
                .background_style(fill(theme.face, 0.8))
                .border_style(stroke(theme.grid, 1.0, 1))
                .label_font(("sans-serif", 13).into_font().color(&ink))
                .draw()
                .map_err(chart_err)?;
        }
        root.present().map_err(chart_err)?;
    }
    Ok(svg)
}

/// Renders chart figures to PNG files.
pub struct ChartRenderer {
    rasterizer: SvgRasterizer,
    cfg: Config,
}

impl ChartRenderer {
    /// Renderer with a fresh rasterizer for the configured fonts.
    pub fn new(cfg: &Config) -> Self {
        Self::with_rasterizer(SvgRasterizer::for_config(cfg), cfg)
    }

    /// Renderer reusing an existing rasterizer.
    pub fn with_rasterizer(rasterizer: SvgRasterizer, cfg: &Config) -> Self {
        Self {
            rasterizer,
            cfg: cfg.clone(),
        }
    }

    /// Default figure size (6.4 x 4.8 inches) at the configured dpi.
    pub fn figure_px(&self) -> (u32, u32) {
        (self.cfg.px(6.4), self.cfg.px(4.8))
    }

    /// Palette for the configured theme.
    pub fn theme(&self) -> ChartTheme {
        ChartTheme::for_theme(self.cfg.theme)
    }

    /// Render configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Draw a chart with `draw` and write it as PNG.
    pub fn render_png<F>(&mut self, axes: &Axes, path: &Path, draw: F) -> ChalkResult<PathBuf>
    where
        F: FnOnce(&mut Chart<'_, '_>) -> ChalkResult<()>,
    {
        let svg = chart_svg(self.figure_px(), &self.theme(), axes, draw)?;
        let img = self.rasterizer.rasterize(&svg)?;
        write_png(&img, path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/chart.rs"]
mod tests;
