//! Annotated grid figures: one colored cell per value with the value centered inside.
//!
//! Colors are resolved per cell before drawing ([`paint_cells`]), so a figure can either use the
//! base/highlight pair or hand in its own per-cell paint (the Sudoku boards do).

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{
    foundation::{
        color::Rgb8,
        config::Config,
        error::{ChalkError, ChalkResult},
    },
    grid::model::{CellLabel, CellRange, Grid, GridShape},
    render::raster::{FrameRasterizer, SvgRasterizer, write_png},
};

const FONT_FAMILY: &str = "DejaVu Sans, Arial, Helvetica, sans-serif";

/// Text and background color of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellColors {
    /// Label color.
    pub text: Rgb8,
    /// Fill color.
    pub background: Rgb8,
}

impl CellColors {
    /// Build a color pair.
    pub const fn new(text: Rgb8, background: Rgb8) -> Self {
        Self { text, background }
    }
}

/// Which cells, if any, use the highlight colors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    /// Every cell uses the base colors.
    #[default]
    None,
    /// Cells inside the range use the highlight colors. An empty range highlights nothing.
    Region(CellRange),
}

/// Visual parameters of a grid figure.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Colors of ordinary cells.
    pub base: CellColors,
    /// Colors of highlighted cells; `None` leaves highlighted cells in the base colors.
    pub highlight: Option<CellColors>,
    /// Label size in points.
    pub font_size_pt: f32,
    /// Bold labels.
    pub bold: bool,
    /// Figure size in inches (width, height).
    pub figure_in: (f32, f32),
    /// Space between neighbouring cells, in pixels.
    pub gap_px: f32,
    /// Space around the whole grid, in pixels.
    pub margin_px: f32,
    /// Cell outline color; `None` draws no outline.
    pub outline: Option<Rgb8>,
}

impl GridStyle {
    /// A 4x4 inch figure with bold labels and no highlight colors.
    pub fn new(base: CellColors, font_size_pt: f32) -> Self {
        Self {
            base,
            highlight: None,
            font_size_pt,
            bold: true,
            figure_in: (4.0, 4.0),
            gap_px: 8.0,
            margin_px: 8.0,
            outline: Some(Rgb8::BLACK),
        }
    }

    /// Same style with highlight colors.
    pub fn with_highlight(mut self, highlight: CellColors) -> Self {
        self.highlight = Some(highlight);
        self
    }
}

/// Resolve per-cell colors for a grid of `shape`.
pub fn paint_cells(shape: GridShape, style: &GridStyle, highlight: &Highlight) -> Grid<CellColors> {
    let mut paint = Grid::filled(shape, style.base);
    if let (Highlight::Region(range), Some(colors)) = (highlight, style.highlight)
        && !range.is_empty()
    {
        paint = paint_range(&paint, range, colors);
    }
    paint
}

/// Copy of `paint` with every cell of `range` set to `colors`. Cells outside the grid are ignored.
pub fn paint_range(paint: &Grid<CellColors>, range: &CellRange, colors: CellColors) -> Grid<CellColors> {
    let mut cells = paint.cells().to_owned();
    for idx in range.iter() {
        if let Some(c) = cells.get_mut((idx.row, idx.col)) {
            *c = colors;
        }
    }
    Grid::from(cells)
}

/// Build the SVG document for a grid figure.
pub fn grid_svg<T: CellLabel>(
    values: &Grid<T>,
    paint: &Grid<CellColors>,
    style: &GridStyle,
    cfg: &Config,
) -> ChalkResult<String> {
    let shape = values.shape();
    if paint.shape() != shape {
        return Err(ChalkError::validation(format!(
            "paint grid {}x{} does not match values {}x{}",
            paint.shape().rows,
            paint.shape().cols,
            shape.rows,
            shape.cols
        )));
    }
    if shape.is_empty() {
        return Err(ChalkError::validation("cannot render an empty grid"));
    }

    let width = cfg.px(style.figure_in.0) as f32;
    let height = cfg.px(style.figure_in.1) as f32;
    let cell_w = cell_extent(width, shape.cols, style)?;
    let cell_h = cell_extent(height, shape.rows, style)?;
    let font_px = cfg.pt_to_px(style.font_size_pt);
    let weight = if style.bold { "bold" } else { "normal" };
    let outline = match style.outline {
        Some(c) => format!(r#" stroke="{}" stroke-width="1""#, c.to_hex()),
        None => String::new(),
    };

    let mut svg = String::with_capacity(256 + shape.len() * 320);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    ));
    svg.push('\n');

    for ((idx, value), (_, colors)) in values.iter_cells().zip(paint.iter_cells()) {
        let x = style.margin_px + idx.col as f32 * (cell_w + style.gap_px);
        let y = style.margin_px + idx.row as f32 * (cell_h + style.gap_px);
        svg.push_str(&format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{cell_w:.2}" height="{cell_h:.2}" fill="{}"{outline}/>"#,
            colors.background.to_hex()
        ));
        svg.push('\n');

        let label = value.label();
        if label.is_empty() {
            continue;
        }
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{:.2}" fill="{}" font-family="{FONT_FAMILY}" font-size="{font_px:.2}" font-weight="{weight}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
            x + cell_w / 2.0,
            y + cell_h / 2.0,
            colors.text.to_hex(),
            escape_text(&label)
        ));
        svg.push('\n');
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

fn cell_extent(total: f32, count: usize, style: &GridStyle) -> ChalkResult<f32> {
    let gaps = (count.saturating_sub(1)) as f32 * style.gap_px;
    let extent = (total - 2.0 * style.margin_px - gaps) / count as f32;
    if extent <= 1.0 {
        return Err(ChalkError::validation(format!(
            "figure too small for {count} cells per side"
        )));
    }
    Ok(extent)
}

pub(crate) fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders grid figures to pixels and PNG files.
pub struct GridRenderer {
    rasterizer: SvgRasterizer,
    cfg: Config,
}

impl GridRenderer {
    /// Renderer with a fresh rasterizer for the configured fonts.
    pub fn new(cfg: &Config) -> Self {
        Self::with_rasterizer(SvgRasterizer::for_config(cfg), cfg)
    }

    /// Renderer reusing an existing rasterizer (font database loading is the expensive part).
    pub fn with_rasterizer(rasterizer: SvgRasterizer, cfg: &Config) -> Self {
        Self {
            rasterizer,
            cfg: cfg.clone(),
        }
    }

    /// Rasterizer shared with other figures of the same run.
    pub fn rasterizer_mut(&mut self) -> &mut SvgRasterizer {
        &mut self.rasterizer
    }

    /// Render `values` with base colors and an optional highlighted region.
    pub fn render<T: CellLabel>(
        &mut self,
        values: &Grid<T>,
        style: &GridStyle,
        highlight: &Highlight,
    ) -> ChalkResult<RgbaImage> {
        let paint = paint_cells(values.shape(), style, highlight);
        self.render_painted(values, &paint, style)
    }

    /// Render `values` with caller-resolved per-cell colors.
    pub fn render_painted<T: CellLabel>(
        &mut self,
        values: &Grid<T>,
        paint: &Grid<CellColors>,
        style: &GridStyle,
    ) -> ChalkResult<RgbaImage> {
        let svg = grid_svg(values, paint, style, &self.cfg)?;
        self.rasterizer.rasterize(&svg)
    }

    /// Render and write a PNG to `path`.
    pub fn render_png<T: CellLabel>(
        &mut self,
        values: &Grid<T>,
        style: &GridStyle,
        highlight: &Highlight,
        path: &Path,
    ) -> ChalkResult<PathBuf> {
        let img = self.render(values, style, highlight)?;
        write_png(&img, path)
    }

    /// Render caller-painted cells and write a PNG to `path`.
    pub fn render_painted_png<T: CellLabel>(
        &mut self,
        values: &Grid<T>,
        paint: &Grid<CellColors>,
        style: &GridStyle,
        path: &Path,
    ) -> ChalkResult<PathBuf> {
        let img = self.render_painted(values, paint, style)?;
        write_png(&img, path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
