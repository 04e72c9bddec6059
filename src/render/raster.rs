//! SVG rasterization and PNG file I/O.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use image::RgbaImage;

use crate::foundation::{
    config::Config,
    error::{ChalkError, ChalkResult},
};

/// Turns an SVG document into pixels.
///
/// Figures describe themselves as SVG text; the rasterizer is the only place that touches fonts
/// and pixel buffers. Composite frames go through this trait so a failing rasterizer only costs
/// the frame it was asked to draw.
pub trait FrameRasterizer {
    /// Rasterize `svg` at its intrinsic size into straight-alpha RGBA8.
    fn rasterize(&mut self, svg: &str) -> ChalkResult<RgbaImage>;
}

/// In-process rasterizer backed by `usvg` + `resvg`.
pub struct SvgRasterizer {
    opts: usvg::Options<'static>,
}

impl SvgRasterizer {
    /// Rasterizer using system fonts only.
    pub fn new() -> Self {
        Self::with_font_dir(None)
    }

    /// Rasterizer using system fonts plus every `.ttf`/`.otf`/`.ttc` in `dir`.
    pub fn with_font_dir(dir: Option<&Path>) -> Self {
        let opts = usvg::Options {
            fontdb: build_fontdb(dir),
            ..Default::default()
        };
        Self { opts }
    }

    /// Rasterizer loading the configured extra font directory, if any.
    pub fn for_config(cfg: &Config) -> Self {
        let r = Self::with_font_dir(cfg.font_dir.as_deref());
        tracing::debug!(faces = r.font_face_count(), "loaded font database");
        r
    }

    /// Number of font faces available to `<text>` elements.
    pub fn font_face_count(&self) -> usize {
        self.opts.fontdb.faces().count()
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRasterizer for SvgRasterizer {
    fn rasterize(&mut self, svg: &str) -> ChalkResult<RgbaImage> {
        let tree = usvg::Tree::from_str(svg, &self.opts)
            .map_err(|e| ChalkError::render(format!("parse svg: {e}")))?;

        let size = tree.size();
        let width = to_px(size.width())?;
        let height = to_px(size.height())?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| ChalkError::render("failed to allocate svg pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );

        let mut straight = Vec::with_capacity(pixmap.pixels().len() * 4);
        for px in pixmap.pixels() {
            let c = px.demultiply();
            straight.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, straight)
            .ok_or_else(|| ChalkError::render("svg pixmap byte length mismatch"))
    }
}

fn to_px(v: f32) -> ChalkResult<u32> {
    const MAX_DIM: u32 = 16_384;
    if !v.is_finite() || v <= 0.0 {
        return Err(ChalkError::render("svg has invalid width/height"));
    }
    let px = (v.ceil() as u32).max(1);
    if px > MAX_DIM {
        return Err(ChalkError::render(format!(
            "svg raster size too large: {px} (max {MAX_DIM})"
        )));
    }
    Ok(px)
}

fn build_fontdb(dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = dir {
        load_fonts_from_dir(&mut db, dir);
    }
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory is not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(font = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent_dir(path: &Path) -> ChalkResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Write an RGBA image as PNG, creating parent directories.
pub fn write_png(img: &RgbaImage, path: &Path) -> ChalkResult<PathBuf> {
    ensure_parent_dir(path)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| ChalkError::encode(format!("write png '{}': {e}", path.display())))?;
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "wrote png");
    Ok(path.to_path_buf())
}

/// Read any supported raster file into RGBA8.
pub fn read_rgba(path: &Path) -> ChalkResult<RgbaImage> {
    let img = image::open(path).with_context(|| format!("read image '{}'", path.display()))?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
